//! The layered key-unwrap loop.
//!
//! The envelope does not record how many timelock layers wrap the message
//! key. The loop infers "done" negatively: it keeps feeding each successful
//! decryption's payload (UTF-8 text that is itself a hex ciphertext) back
//! into the beacon until an attempt fails, at which point the last
//! successful output is the terminal key material.
//!
//! Distinguishing "failed on the very first attempt" from "failed after
//! peeling at least one layer" is the load-bearing part: it is the sole
//! signal separating a bad envelope from a fully unwrapped key.

use thiserror::Error;
use tracing::{debug, warn};

use crate::beacon::{BeaconDecryptor, BeaconError};

/// Hard ceiling on onion depth.
///
/// The protocol itself imposes no bound (chain length is whatever the
/// sender applied), but a malformed or malicious envelope must not drive
/// unbounded beacon traffic. Real envelopes carry a handful of layers.
pub const MAX_LAYERS: usize = 256;

/// Errors from the unwrap loop.
#[derive(Debug, Error)]
pub enum UnwrapError {
    /// The very first attempt failed: the supplied outer key was never a
    /// valid ciphertext for this beacon, nothing was unwrapped.
    #[error("invalid outer encrypted key: {source}")]
    InvalidOuterKey {
        /// What the beacon reported for the first attempt.
        #[source]
        source: BeaconError,
    },

    /// A layer's payload was not UTF-8 text. Every layer's payload is by
    /// convention the hex string of the next ciphertext or the final key.
    #[error("layer {layer} payload is not UTF-8 text")]
    BinaryPayload {
        /// 1-based index of the layer whose payload was rejected.
        layer: usize,
    },

    /// The chain exceeded [`MAX_LAYERS`] without terminating.
    #[error("onion chain exceeded {max} layers")]
    LayerLimitExceeded {
        /// The ceiling that was hit.
        max: usize,
    },
}

/// Peel timelock layers until the terminal key material is reached.
///
/// Strictly sequential: each attempt depends on the previous payload.
/// Performs exactly `N + 1` decryptor calls for a chain of `N` layers (the
/// final call is the terminal failure that proves the chain ended). No
/// state survives the call; concurrent recoveries share nothing.
///
/// # Errors
///
/// - [`UnwrapError::InvalidOuterKey`]: the first attempt failed
/// - [`UnwrapError::BinaryPayload`]: a payload violated the hex-text chain
///   convention
/// - [`UnwrapError::LayerLimitExceeded`]: the chain ran past [`MAX_LAYERS`]
pub async fn unwrap_onion(
    outer_ciphertext: &str,
    decryptor: &dyn BeaconDecryptor,
) -> Result<String, UnwrapError> {
    let mut current = outer_ciphertext.to_string();
    let mut peeled = 0usize;

    loop {
        match decryptor.decrypt(&current).await {
            Ok(payload) => {
                peeled += 1;
                // The payload of one layer is the ciphertext of the next,
                // as a UTF-8 encoded hex string.
                current = String::from_utf8(payload)
                    .map_err(|_| UnwrapError::BinaryPayload { layer: peeled })?;
                debug!(layer = peeled, "peeled onion layer");

                if peeled > MAX_LAYERS {
                    warn!(max = MAX_LAYERS, "onion chain did not terminate, giving up");
                    return Err(UnwrapError::LayerLimitExceeded { max: MAX_LAYERS });
                }
            },
            Err(source) if peeled == 0 => {
                return Err(UnwrapError::InvalidOuterKey { source });
            },
            Err(_) => {
                // The current value no longer decrypts: it is the hex of
                // the final symmetric key, not another layer.
                debug!(layers = peeled, "onion fully unwrapped");
                return Ok(current);
            },
        }
    }
}
