//! Event type enum as the single source of truth for event type strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of combat-log events understood by the segmentation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Damage,
    Healing,
    CombatStyle,
    SpellCast,
    Death,
    ZoneEntry,
    StructureDamage,
    DoorDestroyed,
    GuardKill,
    KeepCapture,
    RelicPickup,
    RelicDrop,
    RelicReturn,
    RelicCapture,
}

impl EventType {
    /// All event types, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Damage,
        Self::Healing,
        Self::CombatStyle,
        Self::SpellCast,
        Self::Death,
        Self::ZoneEntry,
        Self::StructureDamage,
        Self::DoorDestroyed,
        Self::GuardKill,
        Self::KeepCapture,
        Self::RelicPickup,
        Self::RelicDrop,
        Self::RelicReturn,
        Self::RelicCapture,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Healing => "healing",
            Self::CombatStyle => "combat_style",
            Self::SpellCast => "spell_cast",
            Self::Death => "death",
            Self::ZoneEntry => "zone_entry",
            Self::StructureDamage => "structure_damage",
            Self::DoorDestroyed => "door_destroyed",
            Self::GuardKill => "guard_kill",
            Self::KeepCapture => "keep_capture",
            Self::RelicPickup => "relic_pickup",
            Self::RelicDrop => "relic_drop",
            Self::RelicReturn => "relic_return",
            Self::RelicCapture => "relic_capture",
        }
    }

    /// Player-versus-player combat actions.
    #[must_use]
    pub const fn is_combat(&self) -> bool {
        matches!(
            self,
            Self::Damage | Self::Healing | Self::CombatStyle | Self::SpellCast | Self::Death
        )
    }

    /// Events that carry a keep name.
    #[must_use]
    pub const fn is_siege(&self) -> bool {
        matches!(
            self,
            Self::StructureDamage | Self::DoorDestroyed | Self::GuardKill | Self::KeepCapture
        )
    }

    /// Events that carry a relic name.
    #[must_use]
    pub const fn is_relic(&self) -> bool {
        matches!(
            self,
            Self::RelicPickup | Self::RelicDrop | Self::RelicReturn | Self::RelicCapture
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "damage" => Ok(Self::Damage),
            "healing" | "heal" => Ok(Self::Healing),
            "combat_style" => Ok(Self::CombatStyle),
            "spell_cast" => Ok(Self::SpellCast),
            "death" | "kill" => Ok(Self::Death),
            "zone_entry" => Ok(Self::ZoneEntry),
            "structure_damage" => Ok(Self::StructureDamage),
            "door_destroyed" => Ok(Self::DoorDestroyed),
            "guard_kill" => Ok(Self::GuardKill),
            "keep_capture" => Ok(Self::KeepCapture),
            "relic_pickup" => Ok(Self::RelicPickup),
            "relic_drop" => Ok(Self::RelicDrop),
            "relic_return" => Ok(Self::RelicReturn),
            "relic_capture" => Ok(Self::RelicCapture),
            _ => Err(UnknownEventType(s.to_string())),
        }
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown event type strings.
#[derive(Debug, Clone)]
pub struct UnknownEventType(String);

impl fmt::Display for UnknownEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event type: {}", self.0)
    }
}

impl std::error::Error for UnknownEventType {}
