//! Cryopost Client
//!
//! Recovery pipeline for time-locked Cryopost messages. Drives the layered
//! key-unwrap protocol against a randomness beacon and hands the recovered
//! key to the symmetric cipher:
//!
//! ```text
//! Envelope ──▶ readiness gate ──▶ onion unwrap ──▶ AEAD open ──▶ plaintext
//!                                      │
//!                                      ▼
//!                               BeaconDecryptor
//!                            (network collaborator)
//! ```
//!
//! # Components
//!
//! - [`BeaconDecryptor`]: the contract a beacon network client must satisfy;
//!   this crate never talks to the network itself
//! - [`BeaconConfig`]: chain pinning passed explicitly to whoever constructs
//!   a decryptor
//! - [`unwrap_onion`]: the layered unwrap loop
//! - [`recover_message`]: gate, unwrap, and decrypt in one call
//!
//! The unwrap loop is strictly sequential (each layer's payload is the next
//! layer's ciphertext) and its only await points are decryptor calls, so
//! dropping the future between iterations cancels cleanly.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod beacon;
mod onion;
mod recover;

pub use beacon::{BeaconConfig, BeaconDecryptor, BeaconError};
pub use onion::{MAX_LAYERS, UnwrapError, unwrap_onion};
pub use recover::{RecoverError, recover_message};
