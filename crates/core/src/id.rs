//! Strongly-typed identifiers used across the domain.
//!
//! The ledger assigns opaque string identifiers (`_id` on the wire). They are
//! never generated client-side, only parsed and echoed back.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a tool (inventory item).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolId(String);

/// Identifier of a tool category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

/// Identifier of a stock-opname record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpnameId(String);

/// Identifier of a stock-in or stock-out transaction header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockId(String);

/// Identifier of the user recorded on a stock transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a ledger-assigned identifier.
            ///
            /// Returns `InvalidId` when the value is empty or only whitespace.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, ": empty")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the wrapped value is usable as a path segment.
            ///
            /// Deserialization is `transparent`, so this is how decoded
            /// payloads are validated after the fact.
            pub fn is_valid(&self) -> bool {
                !self.0.trim().is_empty()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(ToolId, "ToolId");
impl_string_newtype!(CategoryId, "CategoryId");
impl_string_newtype!(OpnameId, "OpnameId");
impl_string_newtype!(StockId, "StockId");
impl_string_newtype!(UserId, "UserId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_rejected() {
        assert_eq!(
            "  ".parse::<OpnameId>(),
            Err(DomainError::InvalidId("OpnameId: empty".to_string()))
        );
        assert!(ToolId::new("").is_err());
    }

    #[test]
    fn identifiers_are_transparent_on_the_wire() {
        let id = OpnameId::new("66f1c0ffee").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"66f1c0ffee\"");

        let back: OpnameId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "66f1c0ffee");
    }

    #[test]
    fn decoded_blank_identifier_reports_invalid() {
        let id: StockId = serde_json::from_str("\"\"").unwrap();
        assert!(!id.is_valid());
    }
}
