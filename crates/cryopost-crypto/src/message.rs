//! Opening the envelope's AEAD message blob.
//!
//! The blob is hex of `nonce || ciphertext || tag`. Decryption splits the
//! 12-byte nonce prefix, hands the combined tail to AES-256-GCM, and decodes
//! the result as UTF-8 text.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};

use crate::{error::CipherError, key::RecoveredKey};

/// AES-GCM nonce length (blob prefix).
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length (trailing segment of the blob).
pub const TAG_LEN: usize = 16;

/// Decrypt a hex-encoded message blob with a recovered key.
///
/// No associated data is authenticated. The tag is verified as part of the
/// AEAD open; a wrong key or any flipped bit in the tail yields
/// [`CipherError::AuthenticationFailed`], never silent corruption.
///
/// # Errors
///
/// - [`CipherError::MalformedCiphertext`]: blob is not hex or shorter than
///   the nonce prefix
/// - [`CipherError::AuthenticationFailed`]: tag mismatch
/// - [`CipherError::InvalidUtf8`]: plaintext is not text (sender bug,
///   surfaced rather than replaced)
pub fn decrypt_message(key: &RecoveredKey, blob_hex: &str) -> Result<String, CipherError> {
    let blob = hex::decode(blob_hex)
        .map_err(|e| CipherError::MalformedCiphertext { reason: e.to_string() })?;

    if blob.len() < NONCE_LEN {
        return Err(CipherError::MalformedCiphertext {
            reason: format!("{} bytes, shorter than the {NONCE_LEN}-byte nonce", blob.len()),
        });
    }

    let (nonce, ciphertext_and_tag) = blob.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(key.bytes().into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext_and_tag)
        .map_err(|_| CipherError::AuthenticationFailed)?;

    Ok(String::from_utf8(plaintext)?)
}
