//! Siege phase and outcome classification.
//!
//! Phases are ordered by how far an attack got:
//!
//! ```text
//! Approach < OuterSiege < InnerSiege < LordFight < Capture
//! ```
//!
//! The phase of a siege is the furthest phase any of its events proves, so
//! the result does not depend on event order. [`PhaseTracker`] is the same
//! rule applied one event at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{Door, Event, EventKind};

/// How far an attack on a keep progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiegePhase {
    /// Structure damage or guard kills only; no door down.
    #[default]
    Approach,
    OuterSiege,
    InnerSiege,
    LordFight,
    Capture,
}

impl SiegePhase {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approach => "approach",
            Self::OuterSiege => "outer_siege",
            Self::InnerSiege => "inner_siege",
            Self::LordFight => "lord_fight",
            Self::Capture => "capture",
        }
    }

    /// The phase a single event proves, if any.
    #[must_use]
    pub fn of_event(event: &Event) -> Option<Self> {
        match &event.kind {
            EventKind::KeepCapture { .. } => Some(Self::Capture),
            EventKind::GuardKill { lord: true, .. } => Some(Self::LordFight),
            EventKind::DoorDestroyed { .. } => match event.destroyed_door() {
                Some(Door::Inner) => Some(Self::InnerSiege),
                Some(Door::Outer) => Some(Self::OuterSiege),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for SiegePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a siege ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiegeOutcome {
    /// The keep was captured or its lord killed.
    AttackSuccess,
    /// The outer door never fell.
    DefenseSuccess,
    /// Doors fell but the log shows neither a capture nor a lord kill.
    ///
    /// Either the attack was repelled after a breach or the log stops early;
    /// the log alone cannot tell which.
    Unknown,
}

impl SiegeOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AttackSuccess => "attack_success",
            Self::DefenseSuccess => "defense_success",
            Self::Unknown => "unknown",
        }
    }

    /// Outcome implied by the furthest phase reached.
    ///
    /// An inner door can only fall after the outer one, so any phase past
    /// `Approach` counts as a breach.
    #[must_use]
    pub const fn from_phase(phase: SiegePhase) -> Self {
        match phase {
            SiegePhase::Capture | SiegePhase::LordFight => Self::AttackSuccess,
            SiegePhase::InnerSiege | SiegePhase::OuterSiege => Self::Unknown,
            SiegePhase::Approach => Self::DefenseSuccess,
        }
    }
}

impl fmt::Display for SiegeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental phase detection. Phases only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTracker {
    phase: SiegePhase,
}

impl PhaseTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event; returns the phase after it.
    pub fn observe(&mut self, event: &Event) -> SiegePhase {
        if let Some(phase) = SiegePhase::of_event(event) {
            if phase > self.phase {
                tracing::trace!(from = %self.phase, to = %phase, "siege phase advanced");
                self.phase = phase;
            }
        }
        self.phase
    }

    #[must_use]
    pub const fn phase(&self) -> SiegePhase {
        self.phase
    }

    #[must_use]
    pub const fn outcome(&self) -> SiegeOutcome {
        SiegeOutcome::from_phase(self.phase)
    }
}

/// Furthest phase proven by any of the events.
pub fn detect_phase<'a>(events: impl IntoIterator<Item = &'a Event>) -> SiegePhase {
    events
        .into_iter()
        .fold(PhaseTracker::new(), |mut tracker, event| {
            tracker.observe(event);
            tracker
        })
        .phase()
}

/// Outcome of a siege made of the given events.
pub fn detect_outcome<'a>(events: impl IntoIterator<Item = &'a Event>) -> SiegeOutcome {
    SiegeOutcome::from_phase(detect_phase(events))
}
