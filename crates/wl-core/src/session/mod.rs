//! Closed sessions, one module per domain.
//!
//! Each domain module supplies a [`SegmentPolicy`](crate::segment::SegmentPolicy)
//! and a function turning the resulting segments into typed sessions with
//! their derived records computed once, at close.

mod battleground;
mod combat;
mod relic;
mod siege;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::contribution::Contribution;
use crate::event::{Event, elapsed};
use crate::segment::Segment;
use crate::types::{SessionDomain, SessionId};

pub use battleground::{BattlegroundPolicy, BattlegroundSession, battleground_sessions};
pub use combat::{CombatPolicy, CombatSession, combat_sessions};
pub use relic::{RelicOutcome, RelicPolicy, RelicRaidSession, relic_sessions};
pub use siege::{OutcomeCounts, SiegePolicy, SiegeSession, siege_sessions};

/// Fields shared by every session type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpan {
    pub id: SessionId,
    pub domain: SessionDomain,
    /// Keep, relic or zone name. `None` for combat.
    pub discriminator: Option<String>,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_ms: i64,
    /// Member events as indices into the log, ascending.
    pub event_indices: Vec<usize>,
}

impl SessionSpan {
    /// Builds the span of a segment.
    pub(crate) fn from_segment(domain: SessionDomain, segment: Segment, events: &[Event]) -> Self {
        Self::new(domain, segment.discriminator, segment.indices, events)
    }

    /// `event_indices` must be non-empty and ascending.
    pub(crate) fn new(
        domain: SessionDomain,
        discriminator: Option<String>,
        event_indices: Vec<usize>,
        events: &[Event],
    ) -> Self {
        let first = event_indices[0];
        let last = event_indices[event_indices.len() - 1];
        let start = events[first].timestamp;
        let end = events[last].timestamp;
        Self {
            id: SessionId::derive(domain, discriminator.as_deref(), first),
            domain,
            discriminator,
            start,
            end,
            duration_ms: elapsed(start, end).max(Duration::zero()).num_milliseconds(),
            event_indices,
        }
    }

    #[must_use]
    pub fn first_index(&self) -> usize {
        self.event_indices[0]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.event_indices[self.event_indices.len() - 1]
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::milliseconds(self.duration_ms)
    }

    /// Member events, in log order.
    pub fn events<'e>(&self, events: &'e [Event]) -> impl Iterator<Item = &'e Event> {
        self.event_indices.iter().map(move |&i| &events[i])
    }
}

/// Common read access to closed sessions of any domain.
pub trait Session {
    fn span(&self) -> &SessionSpan;

    /// The subject's contribution during the session.
    fn stats(&self) -> &Contribution;

    /// Key sessions are grouped by when aggregating.
    ///
    /// Defaults to the discriminator, or the domain name for domains without one.
    fn group_key(&self) -> String {
        let span = self.span();
        span.discriminator
            .clone()
            .unwrap_or_else(|| span.domain.to_string())
    }
}
