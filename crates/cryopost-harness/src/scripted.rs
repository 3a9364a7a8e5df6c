//! Scripted beacon: a deterministic in-memory timelock decryptor.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use cryopost_client::{BeaconDecryptor, BeaconError};

/// One registered ciphertext: the round that unlocks it and its payload.
struct ScriptedEntry {
    round: u64,
    payload: Vec<u8>,
}

/// In-memory beacon decryptor driven entirely by the test.
///
/// Ciphertexts are registered up front with the round that unlocks them.
/// `decrypt` succeeds iff the ciphertext is known and its round is at or
/// before the beacon's current round, mirroring the real contract:
/// deterministic per attempt, failure for unknown input or unpublished
/// rounds. Calls are counted so tests can assert the unwrap loop's exact
/// call accounting.
pub struct ScriptedBeacon {
    entries: Mutex<HashMap<String, ScriptedEntry>>,
    current_round: Mutex<u64>,
    calls: AtomicUsize,
}

impl ScriptedBeacon {
    /// Beacon whose latest published round is `current_round`.
    pub fn at_round(current_round: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            current_round: Mutex::new(current_round),
            calls: AtomicUsize::new(0),
        }
    }

    /// Register a ciphertext unlocking at `round` with the given payload.
    pub fn register(&self, ciphertext_hex: &str, round: u64, payload: &[u8]) {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(
            ciphertext_hex.to_string(),
            ScriptedEntry { round, payload: payload.to_vec() },
        );
    }

    /// Publish rounds up to and including `round`.
    pub fn advance_to(&self, round: u64) {
        let mut current =
            self.current_round.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *current = (*current).max(round);
    }

    /// Number of `decrypt` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BeaconDecryptor for ScriptedBeacon {
    async fn decrypt(&self, ciphertext_hex: &str) -> Result<Vec<u8>, BeaconError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let current =
            *self.current_round.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        match entries.get(ciphertext_hex) {
            Some(entry) if entry.round <= current => Ok(entry.payload.clone()),
            Some(entry) => Err(BeaconError::RoundNotAvailable { round: entry.round }),
            None => Err(BeaconError::InvalidCiphertext("unknown ciphertext".to_string())),
        }
    }
}

/// Builds an N-layer onion chain registered against a [`ScriptedBeacon`].
///
/// Layer ciphertexts are synthetic hex strings (the real round-tagged
/// format is the network client's concern; the unwrap loop treats them as
/// opaque). The innermost layer's payload is the terminal key hex.
pub struct OnionBuilder {
    layers: usize,
    round: u64,
}

impl OnionBuilder {
    /// Chain of `layers` nested ciphertexts, all unlocking at `round`.
    pub fn new(layers: usize, round: u64) -> Self {
        Self { layers, round }
    }

    /// Register the chain and return the outer ciphertext.
    ///
    /// The chain decrypts `layers` times, the last payload being
    /// `terminal_key_hex`, after which the next attempt fails.
    pub fn register(&self, beacon: &ScriptedBeacon, terminal_key_hex: &str) -> String {
        let ciphertexts: Vec<String> =
            (0..self.layers).map(|i| format!("c0ffee{i:04x}")).collect();

        for (i, ciphertext) in ciphertexts.iter().enumerate() {
            let payload = match ciphertexts.get(i + 1) {
                Some(next) => next.clone(),
                None => terminal_key_hex.to_string(),
            };
            beacon.register(ciphertext, self.round, payload.as_bytes());
        }

        ciphertexts.first().cloned().unwrap_or_else(|| terminal_key_hex.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_ciphertext_fails() {
        let beacon = ScriptedBeacon::at_round(100);
        let result = beacon.decrypt("deadbeef").await;
        assert_eq!(result, Err(BeaconError::InvalidCiphertext("unknown ciphertext".to_string())));
        assert_eq!(beacon.calls(), 1);
    }

    #[tokio::test]
    async fn unpublished_round_fails_until_advanced() {
        let beacon = ScriptedBeacon::at_round(10);
        beacon.register("aabb", 20, b"payload");

        assert_eq!(
            beacon.decrypt("aabb").await,
            Err(BeaconError::RoundNotAvailable { round: 20 })
        );

        beacon.advance_to(20);
        assert_eq!(beacon.decrypt("aabb").await, Ok(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn advance_never_rewinds() {
        let beacon = ScriptedBeacon::at_round(50);
        beacon.register("aabb", 40, b"payload");

        beacon.advance_to(10);
        assert_eq!(beacon.decrypt("aabb").await, Ok(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn builder_registers_a_walkable_chain() {
        let beacon = ScriptedBeacon::at_round(5);
        let outer = OnionBuilder::new(3, 5).register(&beacon, "feedface");

        let mid = beacon.decrypt(&outer).await.unwrap();
        let mid = String::from_utf8(mid).unwrap();
        let inner = beacon.decrypt(&mid).await.unwrap();
        let inner = String::from_utf8(inner).unwrap();
        let terminal = beacon.decrypt(&inner).await.unwrap();

        assert_eq!(terminal, b"feedface");
    }
}
