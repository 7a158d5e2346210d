//! Strongly-typed ID wrappers
//!
//! Ids display as a short prefix (`exp-1a2b3c4d`) and serialize as the full UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Check whether a user-typed short id (with or without the
            /// display prefix) matches this id
            pub fn matches_prefix(&self, s: &str) -> bool {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                !s.is_empty() && self.0.to_string().starts_with(&s.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_id_creation() {
        let id = ExpenseId::new();
        assert!(!id.as_uuid().is_nil());
        assert_ne!(id, ExpenseId::new());
    }

    #[test]
    fn test_id_display() {
        let display = ExpenseId::new().to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serializes_as_full_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = ExpenseId::parse(uuid_str).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));

        let back: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_from_str_accepts_prefixed_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ExpenseId = format!("exp-{}", uuid_str).parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
        assert!("not-a-uuid".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_matches_prefix() {
        let id = ExpenseId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches_prefix("exp-550e8400"));
        assert!(id.matches_prefix("550E84"));
        assert!(!id.matches_prefix("exp-"));
        assert!(!id.matches_prefix("660e"));
    }
}
