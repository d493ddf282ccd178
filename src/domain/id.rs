//! Identifiers for categories and products
//!
//! IDs are opaque strings. New IDs are random UUIDs (v4); IDs read back from
//! a data file are accepted verbatim as long as they are non-empty. Parsing
//! from user input (`FromStr`) trims surrounding whitespace first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid category ID: must not be empty")]
    EmptyCategoryId,

    #[error("Invalid product ID: must not be empty")]
    EmptyProductId,
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random ID
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s.trim().to_string())
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.is_empty() {
                    return Err(IdError::$empty);
                }
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

opaque_id!(
    /// Category ID, immutable once assigned
    CategoryId,
    EmptyCategoryId
);

opaque_id!(
    /// Product ID, immutable once assigned
    ProductId,
    EmptyProductId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = CategoryId::generate();
        let b = CategoryId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_id_is_uuid() {
        let id = ProductId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn parse_accepts_any_non_empty_string() {
        let id: CategoryId = "legacy-42".parse().unwrap();
        assert_eq!(id.to_string(), "legacy-42");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: ProductId = "  abc  ".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!("".parse::<CategoryId>(), Err(IdError::EmptyCategoryId));
        assert_eq!("   ".parse::<ProductId>(), Err(IdError::EmptyProductId));
    }

    #[test]
    fn serde_roundtrip_is_plain_string() {
        let id = ProductId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_keeps_id_verbatim() {
        let padded: CategoryId = serde_json::from_str("\" c1 \"").unwrap();
        let plain: CategoryId = serde_json::from_str("\"c1\"").unwrap();

        assert_eq!(padded.as_str(), " c1 ");
        assert_ne!(padded, plain);
        assert_eq!(serde_json::to_string(&padded).unwrap(), "\" c1 \"");
    }

    #[test]
    fn serde_rejects_empty_id() {
        let result: Result<CategoryId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
