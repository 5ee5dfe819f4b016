//! Combat instances and combat sessions.
//!
//! Both are runs of combat events with no discriminator; they differ only in
//! the gap threshold (a short one splits single fights, a long one groups
//! fights into a play session).

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::contribution::{Contribution, Subject, contribution_of};
use crate::event::Event;
use crate::segment::{SegmentPolicy, segment};
use crate::session::{Session, SessionSpan};
use crate::types::SessionDomain;

/// Damage, healing, styles, spells and deaths, split by idle time only.
#[derive(Debug, Clone, Copy)]
pub struct CombatPolicy {
    domain: SessionDomain,
    max_gap: Duration,
}

impl CombatPolicy {
    /// Policy for `CombatInstance` or `CombatSession`, with the configured gap.
    #[must_use]
    pub fn new(domain: SessionDomain, config: &AnalysisConfig) -> Self {
        debug_assert!(matches!(
            domain,
            SessionDomain::CombatInstance | SessionDomain::CombatSession
        ));
        Self {
            domain,
            max_gap: config.gaps.for_domain(domain),
        }
    }
}

impl SegmentPolicy for CombatPolicy {
    fn domain(&self) -> SessionDomain {
        self.domain
    }

    fn qualifies(&self, event: &Event) -> bool {
        event.is_combat()
    }

    fn discriminator<'e>(&self, _event: &'e Event) -> Option<&'e str> {
        None
    }

    fn max_gap(&self) -> Duration {
        self.max_gap
    }
}

/// A closed combat instance or combat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSession {
    #[serde(flatten)]
    pub span: SessionSpan,
    pub stats: Contribution,
    pub score: f64,
}

impl Session for CombatSession {
    fn span(&self) -> &SessionSpan {
        &self.span
    }

    fn stats(&self) -> &Contribution {
        &self.stats
    }
}

/// Segments the log into combat sessions of the given domain.
///
/// Stats cover the member combat events only.
#[must_use]
pub fn combat_sessions(
    events: &[Event],
    domain: SessionDomain,
    config: &AnalysisConfig,
    subject: &Subject,
) -> Vec<CombatSession> {
    let policy = CombatPolicy::new(domain, config);
    segment(events, &policy)
        .into_iter()
        .map(|seg| {
            let span = SessionSpan::from_segment(domain, seg, events);
            let stats = contribution_of(span.events(events), subject);
            CombatSession {
                score: stats.score(&config.contribution.weights),
                span,
                stats,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::fixtures::*;

    fn instances(events: &[Event]) -> Vec<CombatSession> {
        combat_sessions(
            events,
            SessionDomain::CombatInstance,
            &AnalysisConfig::default(),
            &Subject::default(),
        )
    }

    #[test]
    fn short_gap_splits_instances_long_gap_keeps_session() {
        let events = vec![
            damage(at(0), "You", "Sven", 100),
            damage(at(10), "Sven", "You", 40),
            damage(at(100), "You", "Bjorn", 80),
            death(at(105), "Bjorn", Some("You")),
        ];

        let split = instances(&events);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].span.event_indices, vec![0, 1]);
        assert_eq!(split[0].span.duration_ms, 10_000);
        assert_eq!(split[1].stats.player_kills, 1);

        let sessions = combat_sessions(
            &events,
            SessionDomain::CombatSession,
            &AnalysisConfig::default(),
            &Subject::default(),
        );
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].stats.damage_dealt, 180);
        assert_eq!(sessions[0].stats.damage_taken, 40);
    }

    #[test]
    fn non_combat_events_do_not_open_sessions() {
        let events = vec![
            zone(at(0), "Emain Macha"),
            door(at(5), "Dun Crauchon", "Outer Door"),
        ];
        assert!(instances(&events).is_empty());
    }

    #[test]
    fn combat_sessions_have_no_discriminator() {
        let events = vec![damage(at(0), "You", "Sven", 1), damage(at(1), "You", "Bjorn", 1)];
        let sessions = instances(&events);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].span.discriminator, None);
        assert_eq!(sessions[0].group_key(), "combat_instance");
    }

    #[test]
    fn keep_events_mid_fight_are_not_counted() {
        let events = vec![
            damage(at(0), "You", "Sven", 100),
            guard(at(5), "You", "Caer Benowyc", true),
            structure(at(8), "You", "Caer Benowyc", 500),
            damage(at(10), "You", "Sven", 50),
        ];
        let sessions = instances(&events);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].span.event_indices, vec![0, 3]);
        assert_eq!(sessions[0].stats.damage_dealt, 150);
        assert_eq!(sessions[0].stats.guard_kills, 0);
        assert_eq!(sessions[0].stats.lord_kills, 0);
        assert_eq!(sessions[0].stats.structure_damage, 0);
    }

    #[test]
    fn score_uses_configured_weights() {
        let events = vec![death(at(0), "Sven", Some("You"))];
        let sessions = instances(&events);
        assert_eq!(sessions[0].score, 1.0);
    }
}
