//! Battleground sessions.
//!
//! Zone entries drive segmentation: entering a known battleground opens a
//! session, entering any other zone closes it. Membership is then enriched
//! with every combat event from the opening entry up to the next session's
//! start (or end of log).

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::contribution::{Contribution, Subject, contribution_of};
use crate::event::Event;
use crate::reference::{BattlegroundInfo, ReferenceData};
use crate::segment::{Segment, SegmentPolicy, segment};
use crate::session::{Session, SessionSpan};
use crate::types::SessionDomain;

/// Zone entries keyed by zone name; only battleground zones open a session.
pub struct BattlegroundPolicy<'r> {
    reference: &'r dyn ReferenceData,
    max_gap: Duration,
}

impl<'r> BattlegroundPolicy<'r> {
    #[must_use]
    pub fn new(reference: &'r dyn ReferenceData, config: &AnalysisConfig) -> Self {
        Self {
            reference,
            max_gap: config.gaps.for_domain(SessionDomain::Battleground),
        }
    }
}

impl SegmentPolicy for BattlegroundPolicy<'_> {
    fn domain(&self) -> SessionDomain {
        SessionDomain::Battleground
    }

    fn qualifies(&self, event: &Event) -> bool {
        event.zone().is_some()
    }

    fn discriminator<'e>(&self, event: &'e Event) -> Option<&'e str> {
        event.zone()
    }

    fn max_gap(&self) -> Duration {
        self.max_gap
    }

    fn opens(&self, event: &Event) -> bool {
        event
            .zone()
            .is_some_and(|zone| self.reference.is_battleground(zone))
    }
}

/// A closed battleground visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlegroundSession {
    /// `event_indices` holds the zone entries plus the enriched combat events.
    #[serde(flatten)]
    pub span: SessionSpan,
    /// Level bracket of the zone.
    pub bracket: Option<BattlegroundInfo>,
    pub stats: Contribution,
    pub score: f64,
}

impl BattlegroundSession {
    #[must_use]
    pub fn zone(&self) -> &str {
        self.span.discriminator.as_deref().unwrap_or_default()
    }
}

impl Session for BattlegroundSession {
    fn span(&self) -> &SessionSpan {
        &self.span
    }

    fn stats(&self) -> &Contribution {
        &self.stats
    }
}

/// Segments the log into battleground visits and enriches each with combat.
#[must_use]
pub fn battleground_sessions(
    events: &[Event],
    reference: &dyn ReferenceData,
    config: &AnalysisConfig,
    subject: &Subject,
) -> Vec<BattlegroundSession> {
    let segments = segment(events, &BattlegroundPolicy::new(reference, config));
    let bounds: Vec<usize> = segments
        .iter()
        .skip(1)
        .map(Segment::first)
        .chain(std::iter::once(events.len()))
        .collect();

    segments
        .into_iter()
        .zip(bounds)
        .map(|(seg, bound)| {
            let window = seg.first()..bound;
            let zone = seg.discriminator.clone().unwrap_or_default();

            let mut indices = seg.indices;
            indices.extend(window.filter(|&i| events[i].is_combat()));
            indices.sort_unstable();
            indices.dedup();

            let span = SessionSpan::new(
                SessionDomain::Battleground,
                Some(zone.clone()),
                indices,
                events,
            );
            let stats = contribution_of(span.events(events), subject);

            tracing::debug!(
                zone = %zone,
                events = span.event_indices.len(),
                duration_ms = span.duration_ms,
                "battleground session closed"
            );

            BattlegroundSession {
                bracket: reference.battleground(&zone),
                score: stats.score(&config.contribution.weights),
                stats,
                span,
            }
        })
        .collect()
}
