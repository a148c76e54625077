//! Typed identifiers
//!
//! Every record is keyed by a random UUID (v4). Each kind of record gets its
//! own newtype so a `PostId` can never be passed where a `UserId` is expected.
//! All of them serialize as the canonical hyphenated string.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Error when parsing an identifier from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Parse from string representation
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0.hyphenated(), f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(
    /// Identifier of a blog post
    PostId
);
define_id!(
    /// Identifier of a user account; also the subject of identity tokens
    UserId
);
define_id!(
    /// Identifier of a comment
    CommentId
);
define_id!(
    /// Identifier of a like record
    LikeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(PostId::new(), PostId::new());
    }

    #[test]
    fn test_parse_roundtrips_display() {
        let id = UserId::new();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(PostId::parse("not-a-uuid"), Err(IdParseError::InvalidFormat));
        assert_eq!(PostId::parse(""), Err(IdParseError::InvalidFormat));
        assert!("42".parse::<LikeId>().is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let uuid = Uuid::parse_str("6f1c1f5e-3b1a-4b8e-9a55-0d6b2b1f4c11").unwrap();
        let json = serde_json::to_string(&PostId::from_uuid(uuid)).unwrap();
        assert_eq!(json, "\"6f1c1f5e-3b1a-4b8e-9a55-0d6b2b1f4c11\"");
    }

    #[test]
    fn test_deserialize_rejects_number() {
        assert!(serde_json::from_str::<CommentId>("12345").is_err());
    }
}
