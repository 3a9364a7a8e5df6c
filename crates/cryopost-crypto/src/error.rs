//! Error types for the message cipher.

use thiserror::Error;

/// Errors from recovered-key construction and message decryption.
///
/// `AuthenticationFailed` is the dominant real-world failure: it is what a
/// wrong recovered key looks like (premature unwrap, corrupted envelope),
/// and must stay distinguishable from parse errors so callers can tell
/// "broken file" from "wrong key".
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key material is not valid hex or has the wrong decoded length.
    #[error("malformed key: expected {expected} bytes, got {actual}")]
    MalformedKey {
        /// Required key length in bytes.
        expected: usize,
        /// Decoded length actually supplied.
        actual: usize,
    },

    /// Key material is not valid hex.
    #[error("malformed key hex: {0}")]
    MalformedKeyHex(String),

    /// The message blob is not valid hex or is shorter than the nonce.
    #[error("malformed ciphertext: {reason}")]
    MalformedCiphertext {
        /// What was wrong with the blob.
        reason: String,
    },

    /// AEAD tag verification failed (wrong key or tampered blob).
    #[error("authentication failed: wrong key or tampered ciphertext")]
    AuthenticationFailed,

    /// Plaintext decrypted but is not valid UTF-8.
    #[error("plaintext is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
