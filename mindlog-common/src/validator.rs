//! Creation-input validation
//!
//! Pre-flight checks on user-supplied text input, run strictly before any
//! network call. The audio creation path intentionally skips this layer and
//! relies on the server for validation.

use crate::error::{Error, Result};

/// Validate text creation input
///
/// Rejects empty or whitespace-only transcriptions and durations that are
/// not finite non-negative numbers. Zero is accepted (pure-text capture
/// sends duration 0).
pub fn validate_create_input(transcription: &str, duration: f64) -> Result<()> {
    if transcription.trim().is_empty() {
        return Err(Error::Validation(
            "Transcription cannot be empty".to_string(),
        ));
    }

    if !duration.is_finite() || duration < 0.0 {
        return Err(Error::Validation(
            "Duration must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}
