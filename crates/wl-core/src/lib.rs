//! Session segmentation and statistics for realm-vs-realm combat logs.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the typed event model and time-of-day arithmetic
//! - Segmentation: one gap-and-discriminator engine with per-domain policies
//!   (combat instances, combat sessions, sieges, relic raids, battlegrounds)
//! - Siege phases: phase progression and outcome classification
//! - Contribution: per-character metrics over a window of events
//! - Aggregation: grouped and overall statistics over closed sessions
//! - Reference data: read-only keep, relic and battleground lookups

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod contribution;
pub mod event;
pub mod event_type;
pub mod phase;
pub mod reference;
pub mod segment;
pub mod session;
pub mod types;

pub use aggregate::{AggregateConfig, AggregateStatistics, GroupStats, aggregate, aggregate_by};
pub use analysis::{Analysis, AnalysisReport, analyze};
pub use config::{AnalysisConfig, ConfigError, ContributionConfig, GapConfig};
pub use contribution::{
    Contribution, ContributionWeights, Subject, compute_contribution, contribution_of, kdr,
    window_around,
};
pub use event::{Door, Event, EventKind, elapsed};
pub use event_type::{EventType, UnknownEventType};
pub use phase::{PhaseTracker, SiegeOutcome, SiegePhase, detect_outcome, detect_phase};
pub use reference::{
    BattlegroundInfo, BuiltinReference, InMemoryReference, KeepInfo, KeepType, ReferenceData,
    RelicInfo, RelicType,
};
pub use segment::{Segment, SegmentPolicy, segment};
pub use session::{
    BattlegroundSession, CombatSession, OutcomeCounts, RelicOutcome, RelicRaidSession, Session,
    SessionSpan, SiegeSession,
};
pub use types::{EntityName, Realm, SessionDomain, SessionId, ValidationError};
