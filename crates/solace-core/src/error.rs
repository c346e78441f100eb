// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Solace support service.

use thiserror::Error;

/// The primary error type used across Solace adapter traits and core operations.
#[derive(Debug, Error)]
pub enum SolaceError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (API failure, malformed response, network).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A referenced entity does not exist in the record store.
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Request input rejected before any mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A ticket status value outside the legal set was rejected before any mutation.
    #[error(
        "invalid ticket status `{given}`. Must be one of: open, in_progress, resolved, closed"
    )]
    InvalidStatus { given: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SolaceError {
    /// True for validation-class errors the caller can correct and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SolaceError::NotFound { .. }
                | SolaceError::InvalidInput(_)
                | SolaceError::InvalidStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = SolaceError::NotFound {
            entity: "order",
            id: 42,
        };
        assert_eq!(err.to_string(), "order #42 not found");
        assert!(err.is_recoverable());
    }

    #[test]
    fn invalid_status_enumerates_legal_values() {
        let err = SolaceError::InvalidStatus {
            given: "escalated".to_string(),
        };
        let msg = err.to_string();
        for legal in ["open", "in_progress", "resolved", "closed"] {
            assert!(msg.contains(legal), "message should list `{legal}`: {msg}");
        }
        assert!(err.is_recoverable());
    }

    #[test]
    fn provider_errors_are_not_recoverable() {
        let err = SolaceError::Provider {
            message: "completion unavailable".to_string(),
            source: None,
        };
        assert!(!err.is_recoverable());
    }
}
