//! Error types for envelope parsing and validation.
//!
//! Strongly-typed errors so callers can distinguish a file that is not JSON
//! at all from one that is structurally valid but carries malformed hex.

use thiserror::Error;

/// Errors from parsing or validating an envelope document.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The document is not valid JSON or is missing a required field.
    #[error("invalid envelope document: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is present but empty.
    #[error("empty required field: {field}")]
    EmptyField {
        /// Name of the offending field (export-format spelling).
        field: &'static str,
    },

    /// A hex field does not decode.
    #[error("malformed hex in {field}: {reason}")]
    MalformedHex {
        /// Name of the offending field (export-format spelling).
        field: &'static str,
        /// Decoder error description.
        reason: String,
    },

    /// The encrypted message decodes to fewer bytes than the nonce prefix.
    #[error("encrypted message too short: {len} bytes, need at least {min}")]
    MessageTooShort {
        /// Decoded length in bytes.
        len: usize,
        /// Minimum length (nonce prefix).
        min: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = EnvelopeError::EmptyField { field: "encryptedKey" };
        assert!(err.to_string().contains("encryptedKey"));

        let err = EnvelopeError::MalformedHex {
            field: "encryptedMessage",
            reason: "odd number of digits".to_string(),
        };
        assert!(err.to_string().contains("encryptedMessage"));
    }
}
