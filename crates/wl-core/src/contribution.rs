//! Per-entity contribution over a window of events.
//!
//! A contribution record counts what one character did inside a slice of the
//! log: damage and healing in both directions, player kills and deaths, keep
//! structure damage, guard and lord kills, relic carries. The composite score
//! is a weighted linear sum of the positive fields.

use std::ops::Range;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::event::{Event, EventKind, elapsed};
use crate::types::EntityName;

/// The character a contribution is computed for.
///
/// Logs refer to their owner with a self alias ("You"). The alias is resolved
/// to the owner's name before any comparison, so `You` and the owner's name in
/// third-person lines count as the same character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    owner: EntityName,
    alias: String,
}

impl Subject {
    #[must_use]
    pub fn new(owner: EntityName, alias: &str) -> Self {
        Self {
            owner,
            alias: alias.trim().to_string(),
        }
    }

    /// The log owner with the default `"You"` alias.
    #[must_use]
    pub fn owner(owner: EntityName) -> Self {
        Self::new(owner, EntityName::SELF_ALIAS)
    }

    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.owner
    }

    /// Whether a raw name from the log refers to this subject.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(&self.alias) {
            return true;
        }
        self.owner.matches(raw)
    }
}

impl Default for Subject {
    fn default() -> Self {
        Self::owner(EntityName::self_alias())
    }
}

/// Weights of the composite contribution score.
///
/// All weights must be finite and non-negative so the score stays
/// monotonic in every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionWeights {
    /// Per point of damage dealt. Default: 0.001.
    pub damage_weight: f64,
    /// Per point of keep structure damage. Default: 0.002.
    pub structure_damage_weight: f64,
    /// Per point of healing done. Default: 0.001.
    pub healing_weight: f64,
    /// Per player kill. Default: 1.0.
    pub kill_weight: f64,
    /// Per guard kill, lords included. Default: 0.5.
    pub guard_kill_weight: f64,
    /// Per lord kill, on top of the guard kill. Default: 5.0.
    pub lord_kill_weight: f64,
    /// Per relic pickup. Default: 2.0.
    pub relic_carry_weight: f64,
}

impl Default for ContributionWeights {
    fn default() -> Self {
        Self {
            damage_weight: 0.001,
            structure_damage_weight: 0.002,
            healing_weight: 0.001,
            kill_weight: 1.0,
            guard_kill_weight: 0.5,
            lord_kill_weight: 5.0,
            relic_carry_weight: 2.0,
        }
    }
}

impl ContributionWeights {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("damage_weight", self.damage_weight),
            ("structure_damage_weight", self.structure_damage_weight),
            ("healing_weight", self.healing_weight),
            ("kill_weight", self.kill_weight),
            ("guard_kill_weight", self.guard_kill_weight),
            ("lord_kill_weight", self.lord_kill_weight),
            ("relic_carry_weight", self.relic_carry_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// What one character did inside a window of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub structure_damage: u64,
    pub healing_done: u64,
    pub healing_received: u64,
    /// Player characters killed. Guards and lords are not players.
    pub player_kills: u64,
    pub deaths: u64,
    /// Keep guards killed, lords included.
    pub guard_kills: u64,
    pub lord_kills: u64,
    pub relic_carries: u64,
}

impl Contribution {
    /// Kill/death ratio. With no deaths the ratio is the kill count.
    #[must_use]
    pub fn kdr(&self) -> f64 {
        kdr(self.player_kills, self.deaths)
    }

    /// Weighted composite score. Never negative, never NaN for valid weights.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, weights: &ContributionWeights) -> f64 {
        self.damage_dealt as f64 * weights.damage_weight
            + self.structure_damage as f64 * weights.structure_damage_weight
            + self.healing_done as f64 * weights.healing_weight
            + self.player_kills as f64 * weights.kill_weight
            + self.guard_kills as f64 * weights.guard_kill_weight
            + self.lord_kills as f64 * weights.lord_kill_weight
            + self.relic_carries as f64 * weights.relic_carry_weight
    }

    fn record(&mut self, event: &Event, subject: &Subject) {
        match &event.kind {
            EventKind::Damage {
                source,
                target,
                amount,
                ..
            } => {
                if subject.matches(source) {
                    self.damage_dealt += u64::from(*amount);
                }
                if subject.matches(target) {
                    self.damage_taken += u64::from(*amount);
                }
            }
            EventKind::Healing {
                source,
                target,
                amount,
            } => {
                if subject.matches(source) {
                    self.healing_done += u64::from(*amount);
                }
                if subject.matches(target) {
                    self.healing_received += u64::from(*amount);
                }
            }
            EventKind::Death { victim, killer } => {
                if subject.matches(victim) {
                    self.deaths += 1;
                } else if killer.as_deref().is_some_and(|k| subject.matches(k)) {
                    self.player_kills += 1;
                }
            }
            EventKind::StructureDamage { source, amount, .. } if subject.matches(source) => {
                self.structure_damage += u64::from(*amount);
            }
            EventKind::GuardKill { killer, lord, .. } if subject.matches(killer) => {
                self.guard_kills += 1;
                if *lord {
                    self.lord_kills += 1;
                }
            }
            EventKind::RelicPickup { carrier, .. } if subject.matches(carrier) => {
                self.relic_carries += 1;
            }
            _ => {}
        }
    }
}

/// `kills / deaths`, falling back to `kills` when there are no deaths.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn kdr(kills: u64, deaths: u64) -> f64 {
    if deaths == 0 {
        kills as f64
    } else {
        kills as f64 / deaths as f64
    }
}

/// Computes the subject's contribution over `events[window]`.
///
/// An empty window yields an all-zero record.
#[must_use]
pub fn compute_contribution(events: &[Event], window: Range<usize>, subject: &Subject) -> Contribution {
    events
        .get(window)
        .map_or_else(Contribution::default, |slice| contribution_of(slice, subject))
}

/// Computes the subject's contribution over exactly the given events.
#[must_use]
pub fn contribution_of<'e>(
    events: impl IntoIterator<Item = &'e Event>,
    subject: &Subject,
) -> Contribution {
    events
        .into_iter()
        .fold(Contribution::default(), |mut contribution, event| {
            contribution.record(event, subject);
            contribution
        })
}

/// Widens `first..=last` to every neighbouring event within `padding`.
///
/// The walk stops at the first event further than `padding` away, or at an
/// event out of chronological order.
#[must_use]
pub fn window_around(events: &[Event], first: usize, last: usize, padding: Duration) -> Range<usize> {
    if events.is_empty() {
        return 0..0;
    }
    let last = last.min(events.len() - 1);
    let first = first.min(last);
    let within = |from: usize, to: usize| {
        let gap = elapsed(events[from].timestamp, events[to].timestamp);
        gap >= Duration::zero() && gap <= padding
    };

    let mut start = first;
    while start > 0 && within(start - 1, first) {
        start -= 1;
    }

    let mut end = last;
    while end + 1 < events.len() && within(last, end + 1) {
        end += 1;
    }

    start..end + 1
}
