//! One-call analysis of a whole log.
//!
//! Runs every session domain over the same immutable event list. The domains
//! share nothing mutable, so they are segmented in parallel.

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateConfig, AggregateStatistics, aggregate, aggregate_by};
use crate::config::AnalysisConfig;
use crate::contribution::Subject;
use crate::event::Event;
use crate::reference::ReferenceData;
use crate::session::{
    BattlegroundSession, CombatSession, OutcomeCounts, RelicRaidSession, SiegeSession,
    battleground_sessions, combat_sessions, relic_sessions, siege_sessions,
};
use crate::types::SessionDomain;

/// Closed sessions of every domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub combat_instances: Vec<CombatSession>,
    pub combat_sessions: Vec<CombatSession>,
    pub sieges: Vec<SiegeSession>,
    pub relic_raids: Vec<RelicRaidSession>,
    pub battlegrounds: Vec<BattlegroundSession>,
}

/// Aggregated statistics of every domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub combat_instances: AggregateStatistics,
    pub combat_sessions: AggregateStatistics,
    pub sieges: AggregateStatistics,
    pub siege_outcomes: OutcomeCounts,
    pub relic_raids: AggregateStatistics,
    pub battlegrounds: AggregateStatistics,
}

/// Segments `events` into sessions of every domain.
///
/// `config` is assumed validated (see [`AnalysisConfig::validate`]).
pub fn analyze(
    events: &[Event],
    reference: &dyn ReferenceData,
    config: &AnalysisConfig,
    subject: &Subject,
) -> Analysis {
    tracing::debug!(events = events.len(), subject = %subject.name(), "analyzing log");

    let ((combat_instances, combat_sessions), (sieges, (relic_raids, battlegrounds))) = rayon::join(
        || {
            rayon::join(
                || combat_sessions(events, SessionDomain::CombatInstance, config, subject),
                || combat_sessions(events, SessionDomain::CombatSession, config, subject),
            )
        },
        || {
            rayon::join(
                || siege_sessions(events, reference, config, subject),
                || {
                    rayon::join(
                        || relic_sessions(events, reference, config, subject),
                        || battleground_sessions(events, reference, config, subject),
                    )
                },
            )
        },
    );

    let analysis = Analysis {
        combat_instances,
        combat_sessions,
        sieges,
        relic_raids,
        battlegrounds,
    };
    tracing::info!(
        combat_instances = analysis.combat_instances.len(),
        combat_sessions = analysis.combat_sessions.len(),
        sieges = analysis.sieges.len(),
        relic_raids = analysis.relic_raids.len(),
        battlegrounds = analysis.battlegrounds.len(),
        "analysis complete"
    );
    analysis
}

impl Analysis {
    /// Aggregates every domain.
    #[must_use]
    pub fn report(&self, config: &AggregateConfig) -> AnalysisReport {
        AnalysisReport {
            combat_instances: aggregate(&self.combat_instances, config),
            combat_sessions: aggregate(&self.combat_sessions, config),
            sieges: aggregate(&self.sieges, config),
            siege_outcomes: OutcomeCounts::from_sessions(&self.sieges),
            relic_raids: aggregate(&self.relic_raids, config),
            battlegrounds: aggregate(&self.battlegrounds, config),
        }
    }

    /// Siege statistics grouped by keep type instead of keep name.
    #[must_use]
    pub fn sieges_by_keep_type(&self, config: &AggregateConfig) -> AggregateStatistics {
        aggregate_by(&self.sieges, config, |siege| siege.keep_type.to_string())
    }
}
