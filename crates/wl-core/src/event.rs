//! Typed combat-log events.
//!
//! Events arrive already classified from the line parser. They are immutable
//! once created; sessions refer to them by index into the shared log.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event_type::EventType;
use crate::types::Realm;

/// A single typed log event.
///
/// Log timestamps have time-of-day resolution only (`[HH:MM:SS]`), so they
/// wrap at midnight. Use [`elapsed`] rather than plain subtraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Time of day the line was written.
    pub timestamp: NaiveTime,
    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Variant-specific event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Damage {
        source: String,
        target: String,
        amount: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        damage_type: Option<String>,
    },
    Healing {
        source: String,
        target: String,
        amount: u32,
    },
    CombatStyle {
        source: String,
        style: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    SpellCast {
        caster: String,
        spell: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    /// A character died. `killer` is absent when the log does not say who.
    Death {
        victim: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        killer: Option<String>,
    },
    ZoneEntry {
        zone: String,
    },
    StructureDamage {
        source: String,
        keep: String,
        structure: String,
        amount: u32,
    },
    /// A keep door was destroyed.
    ///
    /// `door` is set when the parser could identify the door; otherwise it is
    /// classified from `door_name` (see [`Door::classify`]).
    DoorDestroyed {
        keep: String,
        door_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        door: Option<Door>,
    },
    /// A keep guard died. `lord` marks the keep lord.
    GuardKill {
        killer: String,
        guard: String,
        keep: String,
        #[serde(default)]
        lord: bool,
    },
    KeepCapture {
        keep: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        realm: Option<Realm>,
    },
    RelicPickup {
        relic: String,
        carrier: String,
    },
    RelicDrop {
        relic: String,
        carrier: String,
    },
    RelicReturn {
        relic: String,
    },
    RelicCapture {
        relic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        realm: Option<Realm>,
    },
}

/// Which door of a keep an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Door {
    Outer,
    Inner,
    /// Postern doors, tower doors and anything unrecognised.
    Other,
}

impl Door {
    /// Classifies a free-text door name.
    ///
    /// Substring matching misfires on names that mention both words or
    /// neither; prefer an explicit [`Door`] from the parser when available.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("inner") {
            Self::Inner
        } else if lower.contains("outer") {
            Self::Outer
        } else {
            Self::Other
        }
    }
}

impl Event {
    #[must_use]
    pub const fn new(timestamp: NaiveTime, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match &self.kind {
            EventKind::Damage { .. } => EventType::Damage,
            EventKind::Healing { .. } => EventType::Healing,
            EventKind::CombatStyle { .. } => EventType::CombatStyle,
            EventKind::SpellCast { .. } => EventType::SpellCast,
            EventKind::Death { .. } => EventType::Death,
            EventKind::ZoneEntry { .. } => EventType::ZoneEntry,
            EventKind::StructureDamage { .. } => EventType::StructureDamage,
            EventKind::DoorDestroyed { .. } => EventType::DoorDestroyed,
            EventKind::GuardKill { .. } => EventType::GuardKill,
            EventKind::KeepCapture { .. } => EventType::KeepCapture,
            EventKind::RelicPickup { .. } => EventType::RelicPickup,
            EventKind::RelicDrop { .. } => EventType::RelicDrop,
            EventKind::RelicReturn { .. } => EventType::RelicReturn,
            EventKind::RelicCapture { .. } => EventType::RelicCapture,
        }
    }

    #[must_use]
    pub const fn is_combat(&self) -> bool {
        self.event_type().is_combat()
    }

    /// The keep this event refers to, for siege events.
    #[must_use]
    pub fn keep(&self) -> Option<&str> {
        match &self.kind {
            EventKind::StructureDamage { keep, .. }
            | EventKind::DoorDestroyed { keep, .. }
            | EventKind::GuardKill { keep, .. }
            | EventKind::KeepCapture { keep, .. } => Some(keep),
            _ => None,
        }
    }

    /// The relic this event refers to, for relic events.
    #[must_use]
    pub fn relic(&self) -> Option<&str> {
        match &self.kind {
            EventKind::RelicPickup { relic, .. }
            | EventKind::RelicDrop { relic, .. }
            | EventKind::RelicReturn { relic }
            | EventKind::RelicCapture { relic, .. } => Some(relic),
            _ => None,
        }
    }

    /// The zone entered, for zone-entry events.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        match &self.kind {
            EventKind::ZoneEntry { zone } => Some(zone),
            _ => None,
        }
    }

    /// The destroyed door, for door events.
    #[must_use]
    pub fn destroyed_door(&self) -> Option<Door> {
        match &self.kind {
            EventKind::DoorDestroyed {
                door, door_name, ..
            } => Some(door.unwrap_or_else(|| Door::classify(door_name))),
            _ => None,
        }
    }
}

/// Half a day. A backwards jump larger than this is read as a midnight rollover.
const ROLLOVER_THRESHOLD_SECS: i64 = 12 * 60 * 60;

/// Time elapsed between two log timestamps.
///
/// A jump backwards of more than twelve hours is taken to be the clock
/// passing midnight. Any other backwards jump is returned as a negative
/// duration (the events are out of order).
#[must_use]
pub fn elapsed(from: NaiveTime, to: NaiveTime) -> Duration {
    let diff = to.signed_duration_since(from);
    if diff < -Duration::seconds(ROLLOVER_THRESHOLD_SECS) {
        diff + Duration::days(1)
    } else {
        diff
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Event builders shared by the unit tests of this crate.

    use super::*;

    /// `HH:MM:SS` at an offset of whole seconds from 20:00:00.
    pub fn at(secs: i64) -> NaiveTime {
        NaiveTime::from_hms_opt(20, 0, 0).unwrap() + Duration::seconds(secs)
    }

    pub fn at_ms(ms: i64) -> NaiveTime {
        NaiveTime::from_hms_opt(20, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    pub fn damage(t: NaiveTime, source: &str, target: &str, amount: u32) -> Event {
        Event::new(
            t,
            EventKind::Damage {
                source: source.into(),
                target: target.into(),
                amount,
                damage_type: None,
            },
        )
    }

    pub fn heal(t: NaiveTime, source: &str, target: &str, amount: u32) -> Event {
        Event::new(
            t,
            EventKind::Healing {
                source: source.into(),
                target: target.into(),
                amount,
            },
        )
    }

    pub fn death(t: NaiveTime, victim: &str, killer: Option<&str>) -> Event {
        Event::new(
            t,
            EventKind::Death {
                victim: victim.into(),
                killer: killer.map(String::from),
            },
        )
    }

    pub fn zone(t: NaiveTime, zone: &str) -> Event {
        Event::new(t, EventKind::ZoneEntry { zone: zone.into() })
    }

    pub fn structure(t: NaiveTime, source: &str, keep: &str, amount: u32) -> Event {
        Event::new(
            t,
            EventKind::StructureDamage {
                source: source.into(),
                keep: keep.into(),
                structure: "Outer Door".into(),
                amount,
            },
        )
    }

    pub fn door(t: NaiveTime, keep: &str, door_name: &str) -> Event {
        Event::new(
            t,
            EventKind::DoorDestroyed {
                keep: keep.into(),
                door_name: door_name.into(),
                door: None,
            },
        )
    }

    pub fn guard(t: NaiveTime, killer: &str, keep: &str, lord: bool) -> Event {
        Event::new(
            t,
            EventKind::GuardKill {
                killer: killer.into(),
                guard: if lord { "Lord" } else { "Guardian" }.into(),
                keep: keep.into(),
                lord,
            },
        )
    }

    pub fn capture(t: NaiveTime, keep: &str) -> Event {
        Event::new(
            t,
            EventKind::KeepCapture {
                keep: keep.into(),
                realm: None,
            },
        )
    }

    pub fn pickup(t: NaiveTime, relic: &str, carrier: &str) -> Event {
        Event::new(
            t,
            EventKind::RelicPickup {
                relic: relic.into(),
                carrier: carrier.into(),
            },
        )
    }

    pub fn relic_drop(t: NaiveTime, relic: &str, carrier: &str) -> Event {
        Event::new(
            t,
            EventKind::RelicDrop {
                relic: relic.into(),
                carrier: carrier.into(),
            },
        )
    }

    pub fn relic_return(t: NaiveTime, relic: &str) -> Event {
        Event::new(t, EventKind::RelicReturn { relic: relic.into() })
    }

    pub fn relic_capture(t: NaiveTime, relic: &str) -> Event {
        Event::new(
            t,
            EventKind::RelicCapture {
                relic: relic.into(),
                realm: None,
            },
        )
    }
}
