//! Error types for the mindlog sync layer
//!
//! Defines the single error enum shared by the validator, gateway, and
//! stores using thiserror for clear error propagation. Stores reduce these
//! to a human-readable message at the operation boundary; nothing below the
//! stores retries or swallows a failure.

use thiserror::Error;

/// Main error type for the sync layer
#[derive(Error, Debug)]
pub enum Error {
    /// Creation input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Auth provider returned no token; the request was never sent
    #[error("No token available")]
    NoToken,

    /// Server reported a missing entity
    #[error("Entry not found")]
    NotFound,

    /// Success response missing the expected entry payload
    #[error("No entry returned from API")]
    NoEntryReturned,

    /// Archive-toggle response missing its confirmation fields
    #[error("No entry_id returned from API")]
    NoEntryId,

    /// Transport-level failure (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the API
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience Result type using the sync-layer Error
pub type Result<T> = std::result::Result<T, Error>;
