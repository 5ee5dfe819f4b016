//! Tunables for segmentation, contribution scoring and aggregation.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::AggregateConfig;
use crate::contribution::{ContributionWeights, Subject};
use crate::types::{EntityName, SessionDomain};

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("gap threshold `{name}` must be positive, got {value} ms")]
    NonPositiveGap { name: &'static str, value: i64 },

    #[error("contribution weight `{name}` must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("contribution window padding must not be negative, got {value} ms")]
    NegativePadding { value: i64 },

    #[error("self alias cannot be empty")]
    EmptyAlias,
}

/// Maximum idle time between consecutive qualifying events, per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Default: 30000 (30 seconds).
    pub combat_instance_ms: i64,
    /// Default: 300000 (5 minutes).
    pub combat_session_ms: i64,
    /// Default: 300000 (5 minutes).
    pub siege_ms: i64,
    /// Default: 600000 (10 minutes).
    pub relic_raid_ms: i64,
    /// Default: 300000 (5 minutes).
    pub battleground_ms: i64,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            combat_instance_ms: 30_000,
            combat_session_ms: 300_000,
            siege_ms: 300_000,
            relic_raid_ms: 600_000,
            battleground_ms: 300_000,
        }
    }
}

impl GapConfig {
    /// Threshold for one domain.
    #[must_use]
    pub fn for_domain(&self, domain: SessionDomain) -> Duration {
        let ms = match domain {
            SessionDomain::CombatInstance => self.combat_instance_ms,
            SessionDomain::CombatSession => self.combat_session_ms,
            SessionDomain::Siege => self.siege_ms,
            SessionDomain::RelicRaid => self.relic_raid_ms,
            SessionDomain::Battleground => self.battleground_ms,
        };
        Duration::milliseconds(ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let gaps = [
            ("combat_instance_ms", self.combat_instance_ms),
            ("combat_session_ms", self.combat_session_ms),
            ("siege_ms", self.siege_ms),
            ("relic_raid_ms", self.relic_raid_ms),
            ("battleground_ms", self.battleground_ms),
        ];
        for (name, value) in gaps {
            if value <= 0 {
                return Err(ConfigError::NonPositiveGap { name, value });
            }
        }
        Ok(())
    }
}

/// Contribution window and score weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionConfig {
    /// How far a siege or relic window extends past the session on each side.
    /// Default: 30000 (30 seconds).
    pub window_padding_ms: i64,
    #[serde(flatten)]
    pub weights: ContributionWeights,
}

impl Default for ContributionConfig {
    fn default() -> Self {
        Self {
            window_padding_ms: 30_000,
            weights: ContributionWeights::default(),
        }
    }
}

impl ContributionConfig {
    #[must_use]
    pub fn window_padding(&self) -> Duration {
        Duration::milliseconds(self.window_padding_ms)
    }
}

/// Everything the analysis pipeline can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Character whose contribution is computed.
    pub owner_name: EntityName,
    /// How the log refers to its owner.
    pub self_alias: String,
    pub gaps: GapConfig,
    pub contribution: ContributionConfig,
    pub aggregate: AggregateConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            owner_name: EntityName::self_alias(),
            self_alias: EntityName::SELF_ALIAS.to_string(),
            gaps: GapConfig::default(),
            contribution: ContributionConfig::default(),
            aggregate: AggregateConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Checks every value; the analysis functions assume a validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.self_alias.trim().is_empty() {
            return Err(ConfigError::EmptyAlias);
        }
        self.gaps.validate()?;
        if self.contribution.window_padding_ms < 0 {
            return Err(ConfigError::NegativePadding {
                value: self.contribution.window_padding_ms,
            });
        }
        self.contribution.weights.validate()
    }

    /// The entity contributions are computed for.
    #[must_use]
    pub fn subject(&self) -> Subject {
        Subject::new(self.owner_name.clone(), &self.self_alias)
    }
}
