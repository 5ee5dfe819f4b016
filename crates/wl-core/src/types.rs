//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// One of the three playable realms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Albion,
    Midgard,
    Hibernia,
}

impl Realm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Albion => "albion",
            Self::Midgard => "midgard",
            Self::Hibernia => "hibernia",
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which segmentation instantiation produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionDomain {
    /// A single fight, split by a short idle gap.
    CombatInstance,
    /// A longer stretch of play made of several fights.
    CombatSession,
    Siege,
    RelicRaid,
    Battleground,
}

impl SessionDomain {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CombatInstance => "combat_instance",
            Self::CombatSession => "combat_session",
            Self::Siege => "siege",
            Self::RelicRaid => "relic_raid",
            Self::Battleground => "battleground",
        }
    }
}

impl fmt::Display for SessionDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates a validated string newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// An opaque session identifier.
    ///
    /// Ids are derived from the session's domain, discriminator and first
    /// event index, so segmenting the same log twice yields the same ids.
    SessionId, "session ID"
);

define_string_id!(
    /// A validated character or NPC name.
    EntityName, "entity name"
);

impl SessionId {
    /// Derives a stable id for a session.
    #[must_use]
    pub fn derive(domain: SessionDomain, discriminator: Option<&str>, first_index: usize) -> Self {
        let key = format!(
            "{domain}/{}/{first_index}",
            discriminator.unwrap_or_default()
        );
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string())
    }
}

impl EntityName {
    /// How a log refers to the character that wrote it.
    pub const SELF_ALIAS: &'static str = "You";

    /// The self alias as a name.
    #[must_use]
    pub fn self_alias() -> Self {
        Self(Self::SELF_ALIAS.to_string())
    }

    /// Case-insensitive comparison against a raw name from the log.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}
