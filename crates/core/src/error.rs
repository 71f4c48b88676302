//! Errors raised by the warehouse models themselves.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// A rule of the warehouse models was broken.
///
/// Two sources: input typed by a user (rejected before anything reaches the
/// ledger) and payloads received from the ledger (rejected at decode time).
/// HTTP and IO failures never end up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input that cannot be sent, such as a negative count or a blank name.
    #[error("rejected input: {0}")]
    Validation(String),

    /// A ledger record that contradicts the model, such as a negative stock level.
    #[error("inconsistent record: {0}")]
    InvariantViolation(String),

    /// Missing or blank record id.
    #[error("bad record id: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            DomainError::validation("real stock cannot be negative").to_string(),
            "rejected input: real stock cannot be negative"
        );
        assert_eq!(
            DomainError::invalid_id("tool without _id").to_string(),
            "bad record id: tool without _id"
        );
    }
}
