//! Deterministic test collaborators for Cryopost recovery.
//!
//! The real beacon network client is out of reach for tests (its failures
//! are scheduled by the drand network clock), so the harness provides
//! [`ScriptedBeacon`]: an in-memory [`BeaconDecryptor`] whose rounds are
//! advanced explicitly by the test. Everything is deterministic; no network,
//! no wall clock.
//!
//! [`OnionBuilder`] registers an N-layer chain against a scripted beacon and
//! hands back the outer ciphertext, and [`seal_message`] plays the sender's
//! side of the AEAD so tests can build complete envelopes.
//!
//! [`BeaconDecryptor`]: cryopost_client::BeaconDecryptor

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod fixtures;
mod scripted;

pub use fixtures::{envelope_json, seal_message};
pub use scripted::{OnionBuilder, ScriptedBeacon};
