//! Read-only reference data: keeps, relics and battleground zones.
//!
//! The segmentation code never reaches for a global table. Callers pass a
//! `&dyn ReferenceData`, which is either the [`BuiltinReference`] tables or an
//! [`InMemoryReference`] built by hand (tests, config overrides).

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::Realm;

/// Kind of keep, used for grouping siege statistics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeepType {
    /// Frontier gatehouse keeps.
    Border,
    /// Keeps guarding a realm's relics.
    Relic,
    Tower,
    /// Ordinary frontier keep. Also assigned to names missing from the tables.
    #[default]
    Standard,
}

impl KeepType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::Relic => "relic",
            Self::Tower => "tower",
            Self::Standard => "standard",
        }
    }
}

impl std::fmt::Display for KeepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepInfo {
    pub realm: Realm,
    pub keep_type: KeepType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelicType {
    Strength,
    Power,
}

/// Static description of a relic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicInfo {
    pub relic_type: RelicType,
    pub home_realm: Realm,
}

/// A battleground zone and its level bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlegroundInfo {
    pub name: String,
    pub min_level: u8,
    pub max_level: u8,
}

/// Name → descriptor lookups. Absent names are a normal answer, not an error.
pub trait ReferenceData: Send + Sync {
    fn keep(&self, name: &str) -> Option<KeepInfo>;

    fn relic(&self, name: &str) -> Option<RelicInfo>;

    fn battleground(&self, zone: &str) -> Option<BattlegroundInfo>;

    fn is_battleground(&self, zone: &str) -> bool {
        self.battleground(zone).is_some()
    }
}

fn key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Known frontier keeps.
static KEEPS: LazyLock<HashMap<String, KeepInfo>> = LazyLock::new(|| {
    use KeepType::{Border, Relic, Standard};
    use Realm::{Albion, Hibernia, Midgard};

    [
        ("Caer Benowyc", Albion, Standard),
        ("Caer Berkstead", Albion, Standard),
        ("Caer Erasleigh", Albion, Standard),
        ("Caer Boldiam", Albion, Standard),
        ("Caer Sursbrooke", Albion, Standard),
        ("Caer Hurbury", Albion, Standard),
        ("Caer Renaris", Albion, Standard),
        ("Castle Sauvage", Albion, Border),
        ("Snowdonia Fortress", Albion, Border),
        ("Castle Excalibur", Albion, Relic),
        ("Castle Myrddin", Albion, Relic),
        ("Bledmeer Faste", Midgard, Standard),
        ("Notmoor Faste", Midgard, Standard),
        ("Hlidskialf Faste", Midgard, Standard),
        ("Blendrake Faste", Midgard, Standard),
        ("Glenlock Faste", Midgard, Standard),
        ("Fensalir Faste", Midgard, Standard),
        ("Arvakr Faste", Midgard, Standard),
        ("Svasud Faste", Midgard, Border),
        ("Vindsaul Faste", Midgard, Border),
        ("Grallarhorn Faste", Midgard, Relic),
        ("Mjollner Faste", Midgard, Relic),
        ("Dun Crauchon", Hibernia, Standard),
        ("Dun Crimthain", Hibernia, Standard),
        ("Dun Bolg", Hibernia, Standard),
        ("Dun nGed", Hibernia, Standard),
        ("Dun da Behnn", Hibernia, Standard),
        ("Dun Scathaig", Hibernia, Standard),
        ("Dun Ailinne", Hibernia, Standard),
        ("Druim Ligen", Hibernia, Border),
        ("Druim Cain", Hibernia, Border),
        ("Dun Lamfhota", Hibernia, Relic),
        ("Dun Dagda", Hibernia, Relic),
    ]
    .into_iter()
    .map(|(name, realm, keep_type)| (key(name), KeepInfo { realm, keep_type }))
    .collect()
});

/// The six realm relics.
static RELICS: LazyLock<HashMap<String, RelicInfo>> = LazyLock::new(|| {
    use RelicType::{Power, Strength};
    use Realm::{Albion, Hibernia, Midgard};

    [
        ("Scabbard of Excalibur", Strength, Albion),
        ("Merlin's Staff", Power, Albion),
        ("Thor's Hammer", Strength, Midgard),
        ("Horn of Valhalla", Power, Midgard),
        ("Lug's Spear of Lightning", Strength, Hibernia),
        ("Cauldron of Dagda", Power, Hibernia),
    ]
    .into_iter()
    .map(|(name, relic_type, home_realm)| {
        (
            key(name),
            RelicInfo {
                relic_type,
                home_realm,
            },
        )
    })
    .collect()
});

/// Battleground zones with their level brackets.
static BATTLEGROUNDS: LazyLock<HashMap<String, BattlegroundInfo>> = LazyLock::new(|| {
    [
        ("Abermenai", 15, 19),
        ("Thidranki", 20, 24),
        ("Murdaggen", 25, 29),
        ("Caledonia", 30, 34),
        ("Killaloe", 35, 39),
        ("Molvik", 40, 44),
        ("Leirvik", 45, 49),
        ("Cathal Valley", 20, 49),
    ]
    .into_iter()
    .map(|(name, min_level, max_level)| {
        (
            key(name),
            BattlegroundInfo {
                name: name.to_string(),
                min_level,
                max_level,
            },
        )
    })
    .collect()
});

/// Reference data compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReference;

impl ReferenceData for BuiltinReference {
    fn keep(&self, name: &str) -> Option<KeepInfo> {
        KEEPS.get(&key(name)).copied()
    }

    fn relic(&self, name: &str) -> Option<RelicInfo> {
        RELICS.get(&key(name)).copied()
    }

    fn battleground(&self, zone: &str) -> Option<BattlegroundInfo> {
        BATTLEGROUNDS.get(&key(zone)).cloned()
    }
}

/// Hand-built reference tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    keeps: HashMap<String, KeepInfo>,
    relics: HashMap<String, RelicInfo>,
    battlegrounds: HashMap<String, BattlegroundInfo>,
}

impl InMemoryReference {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_keep(mut self, name: &str, realm: Realm, keep_type: KeepType) -> Self {
        self.keeps.insert(key(name), KeepInfo { realm, keep_type });
        self
    }

    #[must_use]
    pub fn with_relic(mut self, name: &str, relic_type: RelicType, home_realm: Realm) -> Self {
        self.relics.insert(
            key(name),
            RelicInfo {
                relic_type,
                home_realm,
            },
        );
        self
    }

    #[must_use]
    pub fn with_battleground(mut self, name: &str, min_level: u8, max_level: u8) -> Self {
        self.battlegrounds.insert(
            key(name),
            BattlegroundInfo {
                name: name.to_string(),
                min_level,
                max_level,
            },
        );
        self
    }
}

impl ReferenceData for InMemoryReference {
    fn keep(&self, name: &str) -> Option<KeepInfo> {
        self.keeps.get(&key(name)).copied()
    }

    fn relic(&self, name: &str) -> Option<RelicInfo> {
        self.relics.get(&key(name)).copied()
    }

    fn battleground(&self, zone: &str) -> Option<BattlegroundInfo> {
        self.battlegrounds.get(&key(zone)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keep_lookup_is_case_insensitive() {
        let info = BuiltinReference.keep("castle sauvage").unwrap();
        assert_eq!(info.realm, Realm::Albion);
        assert_eq!(info.keep_type, KeepType::Border);
    }

    #[test]
    fn unknown_keep_is_none() {
        assert!(BuiltinReference.keep("Camelot Hills Outpost").is_none());
    }

    #[test]
    fn builtin_relics() {
        let hammer = BuiltinReference.relic("Thor's Hammer").unwrap();
        assert_eq!(hammer.relic_type, RelicType::Strength);
        assert_eq!(hammer.home_realm, Realm::Midgard);
        assert!(BuiltinReference.relic("Holy Grail").is_none());
    }

    #[test]
    fn builtin_battlegrounds() {
        assert!(BuiltinReference.is_battleground("Thidranki"));
        assert!(!BuiltinReference.is_battleground("Camelot"));
        let bg = BuiltinReference.battleground(" thidranki ").unwrap();
        assert_eq!(bg.name, "Thidranki");
        assert_eq!((bg.min_level, bg.max_level), (20, 24));
    }

    #[test]
    fn in_memory_tables() {
        let reference = InMemoryReference::new()
            .with_keep("Test Keep", Realm::Hibernia, KeepType::Tower)
            .with_relic("Test Relic", RelicType::Power, Realm::Albion)
            .with_battleground("Test Field", 1, 50);

        assert_eq!(reference.keep("TEST KEEP").unwrap().keep_type, KeepType::Tower);
        assert_eq!(
            reference.relic("test relic").unwrap().home_realm,
            Realm::Albion
        );
        assert!(reference.is_battleground("Test Field"));
        assert!(reference.keep("Castle Sauvage").is_none());
    }

    #[test]
    fn default_keep_type_is_standard() {
        assert_eq!(KeepType::default(), KeepType::Standard);
    }
}
