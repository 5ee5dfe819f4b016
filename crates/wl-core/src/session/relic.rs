//! Relic raid sessions: runs of pickup/drop/return/capture events on one relic.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::contribution::{Contribution, Subject, compute_contribution, window_around};
use crate::event::{Event, EventKind};
use crate::reference::{ReferenceData, RelicType};
use crate::segment::{SegmentPolicy, segment};
use crate::session::{Session, SessionSpan};
use crate::types::{Realm, SessionDomain};

/// Relic events keyed by relic name.
#[derive(Debug, Clone, Copy)]
pub struct RelicPolicy {
    max_gap: Duration,
}

impl RelicPolicy {
    #[must_use]
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_gap: config.gaps.for_domain(SessionDomain::RelicRaid),
        }
    }
}

impl SegmentPolicy for RelicPolicy {
    fn domain(&self) -> SessionDomain {
        SessionDomain::RelicRaid
    }

    fn qualifies(&self, event: &Event) -> bool {
        event.event_type().is_relic()
    }

    fn discriminator<'e>(&self, event: &'e Event) -> Option<&'e str> {
        event.relic()
    }

    fn max_gap(&self) -> Duration {
        self.max_gap
    }
}

/// How a relic raid ended, by precedence `Captured > Returned > InTransit > Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelicOutcome {
    /// Only drops were seen.
    Unknown,
    /// Picked up, never returned or captured within the session.
    InTransit,
    Returned,
    Captured,
}

impl RelicOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::InTransit => "in_transit",
            Self::Returned => "returned",
            Self::Captured => "captured",
        }
    }

    fn of_event(event: &Event) -> Self {
        match event.kind {
            EventKind::RelicCapture { .. } => Self::Captured,
            EventKind::RelicReturn { .. } => Self::Returned,
            EventKind::RelicPickup { .. } => Self::InTransit,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RelicOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed raid on one relic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelicRaidSession {
    #[serde(flatten)]
    pub span: SessionSpan,
    pub relic_type: Option<RelicType>,
    pub home_realm: Option<Realm>,
    pub outcome: RelicOutcome,
    /// Everyone who picked the relic up, in order of first pickup.
    pub carriers: Vec<String>,
    pub contribution: Contribution,
    pub score: f64,
}

impl RelicRaidSession {
    #[must_use]
    pub fn relic(&self) -> &str {
        self.span.discriminator.as_deref().unwrap_or_default()
    }
}

impl Session for RelicRaidSession {
    fn span(&self) -> &SessionSpan {
        &self.span
    }

    fn stats(&self) -> &Contribution {
        &self.contribution
    }
}

/// Segments the log into relic raids.
#[must_use]
pub fn relic_sessions(
    events: &[Event],
    reference: &dyn ReferenceData,
    config: &AnalysisConfig,
    subject: &Subject,
) -> Vec<RelicRaidSession> {
    segment(events, &RelicPolicy::new(config))
        .into_iter()
        .map(|seg| {
            let span = SessionSpan::from_segment(SessionDomain::RelicRaid, seg, events);
            close(span, events, reference, config, subject)
        })
        .collect()
}

fn close(
    span: SessionSpan,
    events: &[Event],
    reference: &dyn ReferenceData,
    config: &AnalysisConfig,
    subject: &Subject,
) -> RelicRaidSession {
    let relic = span.discriminator.as_deref().unwrap_or_default();
    let info = reference.relic(relic);
    if info.is_none() {
        tracing::warn!(relic, "unknown relic");
    }

    let mut outcome = RelicOutcome::Unknown;
    let mut carriers: Vec<String> = Vec::new();
    for event in span.events(events) {
        outcome = outcome.max(RelicOutcome::of_event(event));
        if let EventKind::RelicPickup { carrier, .. } = &event.kind {
            if !carriers.iter().any(|c| c.eq_ignore_ascii_case(carrier)) {
                carriers.push(carrier.clone());
            }
        }
    }

    let window = window_around(
        events,
        span.first_index(),
        span.last_index(),
        config.contribution.window_padding(),
    );
    let contribution = compute_contribution(events, window, subject);

    tracing::debug!(
        relic,
        %outcome,
        carriers = carriers.len(),
        duration_ms = span.duration_ms,
        "relic raid closed"
    );

    RelicRaidSession {
        relic_type: info.map(|i| i.relic_type),
        home_realm: info.map(|i| i.home_realm),
        outcome,
        carriers,
        score: contribution.score(&config.contribution.weights),
        contribution,
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::fixtures::*;
    use crate::reference::BuiltinReference;

    const HAMMER: &str = "Thor's Hammer";

    fn raids(events: &[Event]) -> Vec<RelicRaidSession> {
        relic_sessions(
            events,
            &BuiltinReference,
            &AnalysisConfig::default(),
            &Subject::default(),
        )
    }

    #[test]
    fn full_raid_is_captured() {
        let events = vec![
            pickup(at(0), HAMMER, "You"),
            relic_drop(at(120), HAMMER, "You"),
            pickup(at(150), HAMMER, "Arthur"),
            relic_capture(at(500), HAMMER),
        ];
        let sessions = raids(&events);
        assert_eq!(sessions.len(), 1);
        let raid = &sessions[0];
        assert_eq!(raid.relic(), HAMMER);
        assert_eq!(raid.outcome, RelicOutcome::Captured);
        assert_eq!(raid.carriers, vec!["You".to_string(), "Arthur".to_string()]);
        assert_eq!(raid.relic_type, Some(RelicType::Strength));
        assert_eq!(raid.home_realm, Some(Realm::Midgard));
        assert_eq!(raid.contribution.relic_carries, 1);
    }

    #[test]
    fn ten_minute_gap_splits_raids() {
        let events = vec![
            pickup(at_ms(0), HAMMER, "You"),
            relic_return(at_ms(600_000), HAMMER),
            pickup(at_ms(1_200_001), HAMMER, "Arthur"),
        ];
        let sessions = raids(&events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].outcome, RelicOutcome::Returned);
        assert_eq!(sessions[1].outcome, RelicOutcome::InTransit);
    }

    #[test]
    fn capture_wins_over_return() {
        let events = vec![relic_capture(at(0), HAMMER), relic_return(at(10), HAMMER)];
        assert_eq!(raids(&events)[0].outcome, RelicOutcome::Captured);
    }

    #[test]
    fn drop_only_is_unknown() {
        let events = vec![relic_drop(at(0), HAMMER, "Sven")];
        assert_eq!(raids(&events)[0].outcome, RelicOutcome::Unknown);
    }

    #[test]
    fn different_relics_are_separate_raids() {
        let events = vec![
            pickup(at(0), HAMMER, "You"),
            pickup(at(0), "Horn of Valhalla", "Arthur"),
        ];
        let sessions = raids(&events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[1].relic(), "Horn of Valhalla");
    }

    #[test]
    fn unknown_relic_has_no_metadata() {
        let events = vec![pickup(at(0), "Holy Grail", "You")];
        let raid = &raids(&events)[0];
        assert_eq!(raid.relic_type, None);
        assert_eq!(raid.home_realm, None);
    }
}
