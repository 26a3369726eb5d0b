//! Type-safe identifiers.
//!
//! Newtypes over UUIDs so a user id, a character key and a sheet entry id
//! can't be mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), &self.0.to_string()[..8])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Identity issued by the identity provider.
    UserId
);

define_id!(
    /// Key of a character document in the store.
    ///
    /// A player's character is keyed by the player's own identity; NPCs made
    /// by the game master get a fresh id.
    CharacterId
);

define_id!(
    /// Unique id of an ability or spell entry within one character.
    EntryId
);

impl From<UserId> for CharacterId {
    fn from(user: UserId) -> Self {
        Self(user.0)
    }
}

impl CharacterId {
    /// The identity that owns this character, if it is a player sheet.
    pub fn owner(&self) -> UserId {
        UserId(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_id_tracks_owner() {
        let user = UserId::new();
        let character = CharacterId::from(user);
        assert_eq!(character.to_string(), user.to_string());
        assert_eq!(character.owner(), user);
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let id = EntryId::new();
        let parsed: EntryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<EntryId>().is_err());
    }

    #[test]
    fn test_ids_are_distinct() {
        assert_ne!(CharacterId::new(), CharacterId::new());
    }
}
