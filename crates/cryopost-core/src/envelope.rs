//! The envelope document a Cryopost sender exports.
//!
//! A JSON record with three required fields: the outer onion layer of the
//! wrapped key, the AEAD blob of the message body, and the unlock timestamp.
//! Exports may carry additional metadata fields; they are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::EnvelopeError;

/// AEAD nonce prefix length in the encrypted message blob (AES-GCM).
pub const NONCE_LEN: usize = 12;

/// A time-locked message envelope, immutable once parsed.
///
/// `encrypted_key` is the outermost onion layer: a hex-encoded timelock
/// ciphertext whose (possibly nested) payload is ultimately the symmetric
/// message key. `encrypted_message` is hex of `nonce || ciphertext || tag`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Outer onion layer of the wrapped message key, hex-encoded.
    #[serde(rename = "encryptedKey")]
    pub encrypted_key: String,

    /// AEAD blob of the message body, hex-encoded.
    #[serde(rename = "encryptedMessage")]
    pub encrypted_message: String,

    /// When the beacon round targeted by the innermost layer is scheduled.
    ///
    /// The export format calls this `nextCheckIn` (the sender's missed
    /// check-in deadline doubles as the unlock time).
    #[serde(rename = "nextCheckIn")]
    pub unlock_time: DateTime<Utc>,
}

impl Envelope {
    /// Parse and validate an envelope from its JSON export.
    ///
    /// Unknown fields are permitted and ignored. Validation checks shape
    /// only: required fields non-empty, hex well-formed, message blob long
    /// enough to carry a nonce prefix. Whether the key actually unwraps is
    /// decided later by the beacon.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] if the document is not JSON, a required
    /// field is missing or empty, a hex field does not decode, or the
    /// message blob is shorter than the nonce prefix.
    pub fn from_json(document: &str) -> Result<Self, EnvelopeError> {
        let envelope: Self = serde_json::from_str(document)?;
        envelope.validate()?;
        Ok(envelope)
    }

    fn validate(&self) -> Result<(), EnvelopeError> {
        if self.encrypted_key.is_empty() {
            return Err(EnvelopeError::EmptyField { field: "encryptedKey" });
        }
        if self.encrypted_message.is_empty() {
            return Err(EnvelopeError::EmptyField { field: "encryptedMessage" });
        }

        hex::decode(&self.encrypted_key).map_err(|e| EnvelopeError::MalformedHex {
            field: "encryptedKey",
            reason: e.to_string(),
        })?;

        let message = hex::decode(&self.encrypted_message).map_err(|e| {
            EnvelopeError::MalformedHex { field: "encryptedMessage", reason: e.to_string() }
        })?;

        if message.len() < NONCE_LEN {
            return Err(EnvelopeError::MessageTooShort { len: message.len(), min: NONCE_LEN });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> String {
        // 12-byte nonce + 1 byte of ciphertext-with-tag placeholder
        let message_hex = "00".repeat(NONCE_LEN + 1);
        format!(
            r#"{{
                "encryptedKey": "deadbeef",
                "encryptedMessage": "{message_hex}",
                "nextCheckIn": "2024-06-01T12:00:00Z"
            }}"#
        )
    }

    #[test]
    fn parses_valid_document() {
        let envelope = Envelope::from_json(&valid_document()).unwrap();
        assert_eq!(envelope.encrypted_key, "deadbeef");
        assert_eq!(envelope.unlock_time.timestamp(), 1_717_243_200);
    }

    #[test]
    fn ignores_extra_fields() {
        let message_hex = "00".repeat(NONCE_LEN);
        let document = format!(
            r#"{{
                "encryptedKey": "aa",
                "encryptedMessage": "{message_hex}",
                "nextCheckIn": "2024-06-01T12:00:00Z",
                "exportVersion": 3,
                "senderNote": "remember me"
            }}"#
        );
        assert!(Envelope::from_json(&document).is_ok());
    }

    #[test]
    fn rejects_missing_field() {
        let document = r#"{"encryptedKey": "aa", "nextCheckIn": "2024-06-01T12:00:00Z"}"#;
        assert!(matches!(Envelope::from_json(document), Err(EnvelopeError::Json(_))));
    }

    #[test]
    fn rejects_empty_key() {
        let message_hex = "00".repeat(NONCE_LEN);
        let document = format!(
            r#"{{"encryptedKey": "", "encryptedMessage": "{message_hex}", "nextCheckIn": "2024-06-01T12:00:00Z"}}"#
        );
        assert!(matches!(
            Envelope::from_json(&document),
            Err(EnvelopeError::EmptyField { field: "encryptedKey" })
        ));
    }

    #[test]
    fn rejects_odd_length_hex() {
        let message_hex = "00".repeat(NONCE_LEN);
        let document = format!(
            r#"{{"encryptedKey": "abc", "encryptedMessage": "{message_hex}", "nextCheckIn": "2024-06-01T12:00:00Z"}}"#
        );
        assert!(matches!(
            Envelope::from_json(&document),
            Err(EnvelopeError::MalformedHex { field: "encryptedKey", .. })
        ));
    }

    #[test]
    fn rejects_non_hex_characters() {
        let message_hex = "00".repeat(NONCE_LEN);
        let document = format!(
            r#"{{"encryptedKey": "zzzz", "encryptedMessage": "{message_hex}", "nextCheckIn": "2024-06-01T12:00:00Z"}}"#
        );
        assert!(matches!(
            Envelope::from_json(&document),
            Err(EnvelopeError::MalformedHex { field: "encryptedKey", .. })
        ));
    }

    #[test]
    fn rejects_message_shorter_than_nonce() {
        let message_hex = "00".repeat(NONCE_LEN - 1);
        let document = format!(
            r#"{{"encryptedKey": "aa", "encryptedMessage": "{message_hex}", "nextCheckIn": "2024-06-01T12:00:00Z"}}"#
        );
        assert!(matches!(
            Envelope::from_json(&document),
            Err(EnvelopeError::MessageTooShort { len: 11, min: NONCE_LEN })
        ));
    }
}
