//! Cross-session statistics.
//!
//! Folds a list of closed sessions into per-group and overall totals, then
//! picks the best performing group (highest KDR among groups with enough
//! kills) and the most played group (most sessions). Results are recomputed
//! from the session list every time; nothing is patched incrementally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contribution::kdr;
use crate::session::Session;

/// Configuration for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Groups with fewer player kills are never "best performing".
    /// Default: 5.
    pub min_kills_for_best: u64,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            min_kills_for_best: 5,
        }
    }
}

/// Summed statistics for one group of sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub key: String,
    pub sessions: u64,
    pub kills: u64,
    pub deaths: u64,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub structure_damage: u64,
    pub healing_done: u64,
    pub guard_kills: u64,
    pub lord_kills: u64,
    pub total_duration_ms: i64,
    /// Mean session duration. Zero when there are no sessions.
    pub average_duration_ms: i64,
    /// `kills / deaths`, or `kills` with no deaths.
    pub kdr: f64,
}

impl GroupStats {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    fn add<S: Session + ?Sized>(&mut self, session: &S) {
        let stats = session.stats();
        self.sessions += 1;
        self.kills += stats.player_kills;
        self.deaths += stats.deaths;
        self.damage_dealt += stats.damage_dealt;
        self.damage_taken += stats.damage_taken;
        self.structure_damage += stats.structure_damage;
        self.healing_done += stats.healing_done;
        self.guard_kills += stats.guard_kills;
        self.lord_kills += stats.lord_kills;
        self.total_duration_ms += session.span().duration_ms;
    }

    #[allow(clippy::cast_possible_wrap)]
    fn finish(&mut self) {
        self.kdr = kdr(self.kills, self.deaths);
        self.average_duration_ms = if self.sessions == 0 {
            0
        } else {
            self.total_duration_ms / self.sessions as i64
        };
    }
}

/// Statistics over a list of sessions of one domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub overall: GroupStats,
    /// Per-group totals, ordered by key.
    pub groups: BTreeMap<String, GroupStats>,
    /// Key of the group with the highest KDR among those meeting the kill gate.
    pub best_performing: Option<String>,
    /// Key of the group with the most sessions.
    pub most_played: Option<String>,
}

impl AggregateStatistics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overall.sessions == 0
    }
}

/// Aggregates sessions grouped by [`Session::group_key`].
#[must_use]
pub fn aggregate<S: Session>(sessions: &[S], config: &AggregateConfig) -> AggregateStatistics {
    aggregate_by(sessions, config, S::group_key)
}

/// Aggregates sessions grouped by an arbitrary key.
///
/// Ties for best performing and most played go to the first key in order.
pub fn aggregate_by<S, F>(sessions: &[S], config: &AggregateConfig, key: F) -> AggregateStatistics
where
    S: Session,
    F: Fn(&S) -> String,
{
    let mut overall = GroupStats::new("overall");
    let mut groups: BTreeMap<String, GroupStats> = BTreeMap::new();

    for session in sessions {
        overall.add(session);
        let group_key = key(session);
        groups
            .entry(group_key.clone())
            .or_insert_with(|| GroupStats::new(group_key))
            .add(session);
    }

    overall.finish();
    for group in groups.values_mut() {
        group.finish();
    }

    let best_performing = best_performing(&groups, config.min_kills_for_best);
    let most_played = most_played(&groups);

    tracing::debug!(
        sessions = overall.sessions,
        groups = groups.len(),
        ?best_performing,
        ?most_played,
        "aggregated sessions"
    );

    AggregateStatistics {
        overall,
        groups,
        best_performing,
        most_played,
    }
}

fn best_performing(groups: &BTreeMap<String, GroupStats>, min_kills: u64) -> Option<String> {
    let mut best: Option<&GroupStats> = None;
    for group in groups.values().filter(|g| g.kills >= min_kills) {
        if best.is_none_or(|b| group.kdr > b.kdr) {
            best = Some(group);
        }
    }
    best.map(|g| g.key.clone())
}

fn most_played(groups: &BTreeMap<String, GroupStats>) -> Option<String> {
    let mut most: Option<&GroupStats> = None;
    for group in groups.values() {
        if most.is_none_or(|m| group.sessions > m.sessions) {
            most = Some(group);
        }
    }
    most.map(|g| g.key.clone())
}
