//! Siege sessions: runs of keep events on the same keep.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::contribution::{Contribution, Subject, compute_contribution, window_around};
use crate::event::Event;
use crate::phase::{SiegeOutcome, SiegePhase, detect_phase};
use crate::reference::{KeepType, ReferenceData};
use crate::segment::{SegmentPolicy, segment};
use crate::session::{Session, SessionSpan};
use crate::types::{Realm, SessionDomain};

/// Structure damage, doors, guard kills and captures, keyed by keep name.
#[derive(Debug, Clone, Copy)]
pub struct SiegePolicy {
    max_gap: Duration,
}

impl SiegePolicy {
    #[must_use]
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_gap: config.gaps.for_domain(SessionDomain::Siege),
        }
    }
}

impl SegmentPolicy for SiegePolicy {
    fn domain(&self) -> SessionDomain {
        SessionDomain::Siege
    }

    fn qualifies(&self, event: &Event) -> bool {
        event.event_type().is_siege()
    }

    fn discriminator<'e>(&self, event: &'e Event) -> Option<&'e str> {
        event.keep()
    }

    fn max_gap(&self) -> Duration {
        self.max_gap
    }
}

/// A closed siege of one keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiegeSession {
    #[serde(flatten)]
    pub span: SessionSpan,
    /// `Standard` when the keep is not in the reference data.
    pub keep_type: KeepType,
    /// Owning realm, when known.
    pub realm: Option<Realm>,
    pub phase: SiegePhase,
    pub outcome: SiegeOutcome,
    /// Subject's contribution over the padded session window.
    pub contribution: Contribution,
    pub score: f64,
}

impl SiegeSession {
    #[must_use]
    pub fn keep(&self) -> &str {
        self.span.discriminator.as_deref().unwrap_or_default()
    }
}

impl Session for SiegeSession {
    fn span(&self) -> &SessionSpan {
        &self.span
    }

    fn stats(&self) -> &Contribution {
        &self.contribution
    }
}

/// Number of sieges per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub attack_success: u64,
    pub defense_success: u64,
    pub unknown: u64,
}

impl OutcomeCounts {
    #[must_use]
    pub fn from_sessions(sessions: &[SiegeSession]) -> Self {
        let mut counts = Self::default();
        for session in sessions {
            match session.outcome {
                SiegeOutcome::AttackSuccess => counts.attack_success += 1,
                SiegeOutcome::DefenseSuccess => counts.defense_success += 1,
                SiegeOutcome::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.attack_success + self.defense_success + self.unknown
    }
}

/// Segments the log into sieges and classifies each one.
#[must_use]
pub fn siege_sessions(
    events: &[Event],
    reference: &dyn ReferenceData,
    config: &AnalysisConfig,
    subject: &Subject,
) -> Vec<SiegeSession> {
    segment(events, &SiegePolicy::new(config))
        .into_iter()
        .map(|seg| {
            let span = SessionSpan::from_segment(SessionDomain::Siege, seg, events);
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
) -> SiegeSession {
    let keep = span.discriminator.as_deref().unwrap_or_default();
    let info = reference.keep(keep);
    if info.is_none() {
        tracing::warn!(keep, "unknown keep; assuming a standard keep");
    }

    let phase = detect_phase(span.events(events));
    let window = window_around(
        events,
        span.first_index(),
        span.last_index(),
        config.contribution.window_padding(),
    );
    let contribution = compute_contribution(events, window, subject);

    tracing::debug!(
        keep,
        %phase,
        events = span.event_indices.len(),
        duration_ms = span.duration_ms,
        "siege closed"
    );

    SiegeSession {
        keep_type: info.map(|i| i.keep_type).unwrap_or_default(),
        realm: info.map(|i| i.realm),
        phase,
        outcome: SiegeOutcome::from_phase(phase),
        score: contribution.score(&config.contribution.weights),
        contribution,
        span,
    }
}
