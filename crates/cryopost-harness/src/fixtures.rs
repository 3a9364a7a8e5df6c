//! Sender-side fixtures: sealing message blobs and assembling envelopes.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use chrono::{DateTime, SecondsFormat, Utc};

/// Seal a plaintext the way the Cryopost sender does.
///
/// Returns hex of `nonce || AES-256-GCM(key, nonce, plaintext)`, the tag
/// appended by the AEAD. This is the right-inverse partner of
/// `cryopost_crypto::decrypt_message`.
pub fn seal_message(key: &[u8; 32], nonce: &[u8; 12], plaintext: &[u8]) -> String {
    let cipher = Aes256Gcm::new(key.into());
    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(nonce), plaintext) else {
        unreachable!("AES-GCM encryption cannot fail with valid inputs");
    };

    let mut blob = nonce.to_vec();
    blob.extend_from_slice(&ciphertext);
    hex::encode(blob)
}

/// Assemble an envelope document in the sender's export format.
///
/// Includes an extra metadata field, which parsers must ignore.
pub fn envelope_json(
    encrypted_key: &str,
    encrypted_message: &str,
    unlock_time: DateTime<Utc>,
) -> String {
    format!(
        r#"{{
            "encryptedKey": "{encrypted_key}",
            "encryptedMessage": "{encrypted_message}",
            "nextCheckIn": "{}",
            "exportVersion": 1
        }}"#,
        unlock_time.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
