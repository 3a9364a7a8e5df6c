//! End-to-end recovery: gate, unwrap, decrypt.

use chrono::{DateTime, Utc};
use cryopost_core::{Envelope, readiness};
use cryopost_crypto::{CipherError, RecoveredKey, decrypt_message};
use thiserror::Error;
use tracing::debug;

use crate::{
    beacon::BeaconDecryptor,
    onion::{UnwrapError, unwrap_onion},
};

fn countdown(remaining: &std::time::Duration) -> String {
    readiness::format_remaining(*remaining)
}

/// Errors from a full recovery attempt.
#[derive(Debug, Error)]
pub enum RecoverError {
    /// The envelope's unlock time has not arrived; the beacon was not
    /// contacted.
    #[error("message not ready: {} remaining", countdown(.remaining))]
    NotYetUnlocked {
        /// Time left until the unlock time.
        remaining: std::time::Duration,
    },

    /// The unwrap loop failed.
    #[error(transparent)]
    Unwrap(#[from] UnwrapError),

    /// Key decoding or message decryption failed.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// Recover the plaintext of a time-locked envelope.
///
/// Runs the readiness gate, then the onion unwrap loop, then the AEAD open,
/// in that order. `now` is passed in rather than read from a clock so the
/// gate stays a pure comparison. The recovered key lives only for the
/// duration of the cipher call.
///
/// No partial state is exposed: the result is the plaintext or one tagged
/// error. Retrying after a failure is the caller's decision; nothing is
/// cached between attempts.
///
/// # Errors
///
/// [`RecoverError::NotYetUnlocked`] before the unlock time (with the
/// remaining duration), otherwise whatever the unwrap loop or cipher
/// reported.
pub async fn recover_message(
    envelope: &Envelope,
    decryptor: &dyn BeaconDecryptor,
    now: DateTime<Utc>,
) -> Result<String, RecoverError> {
    if !readiness::is_ready(envelope.unlock_time, now) {
        let remaining = readiness::time_remaining(envelope.unlock_time, now);
        return Err(RecoverError::NotYetUnlocked { remaining });
    }

    let key_hex = unwrap_onion(&envelope.encrypted_key, decryptor).await?;
    debug!("recovered message key, opening envelope");

    let key = RecoveredKey::from_hex(&key_hex)?;
    Ok(decrypt_message(&key, &envelope.encrypted_message)?)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::beacon::BeaconError;

    /// Fails every attempt; recovery must never reach it before unlock.
    struct UnreachableBeacon;

    #[async_trait]
    impl BeaconDecryptor for UnreachableBeacon {
        async fn decrypt(&self, _ciphertext_hex: &str) -> Result<Vec<u8>, BeaconError> {
            panic!("beacon contacted before unlock time");
        }
    }

    fn envelope_unlocking_at(secs: i64) -> Envelope {
        let document = format!(
            r#"{{
                "encryptedKey": "deadbeef",
                "encryptedMessage": "{}",
                "nextCheckIn": "{}"
            }}"#,
            "00".repeat(13),
            DateTime::<Utc>::from_timestamp(secs, 0).unwrap().to_rfc3339(),
        );
        Envelope::from_json(&document).unwrap()
    }

    #[tokio::test]
    async fn future_unlock_time_skips_the_beacon() {
        let envelope = envelope_unlocking_at(10_000);
        let now = DateTime::<Utc>::from_timestamp(4_000, 0).unwrap();

        let result = recover_message(&envelope, &UnreachableBeacon, now).await;

        let Err(RecoverError::NotYetUnlocked { remaining }) = &result else {
            panic!("expected NotYetUnlocked, got {result:?}");
        };
        assert_eq!(*remaining, std::time::Duration::from_secs(6_000));
    }

    #[tokio::test]
    async fn not_yet_unlocked_message_includes_countdown() {
        let err = RecoverError::NotYetUnlocked {
            remaining: std::time::Duration::from_secs(3 * 3600 + 90),
        };
        assert_eq!(err.to_string(), "message not ready: 3h 1m 30s remaining");
    }

    /// Beacon that rejects everything (round not yet published).
    struct ColdBeacon;

    #[async_trait]
    impl BeaconDecryptor for ColdBeacon {
        async fn decrypt(&self, _ciphertext_hex: &str) -> Result<Vec<u8>, BeaconError> {
            Err(BeaconError::RoundNotAvailable { round: 97 })
        }
    }

    #[tokio::test]
    async fn bad_outer_key_surfaces_as_unwrap_error() {
        let envelope = envelope_unlocking_at(1_000);
        let now = DateTime::<Utc>::from_timestamp(2_000, 0).unwrap();

        let result = recover_message(&envelope, &ColdBeacon, now).await;

        assert!(matches!(
            result,
            Err(RecoverError::Unwrap(UnwrapError::InvalidOuterKey { .. }))
        ));
    }
}
