//! Cryopost Core
//!
//! Data model and pure protocol logic for recovering a time-locked Cryopost
//! message: the envelope document a sender exports, and the readiness gate
//! that compares the envelope's unlock time against the current clock.
//!
//! # Architecture
//!
//! Everything here is synchronous and side-effect free. Network-facing
//! pieces (the beacon decryptor, the unwrap loop) live in `cryopost-client`;
//! the symmetric cipher lives in `cryopost-crypto`. This crate only knows
//! what an envelope looks like and whether its unlock time has arrived.
//!
//! The gate is a UX convenience, not a security boundary: attempting to
//! unwrap before the beacon round exists simply fails at the network, so the
//! gate only saves a guaranteed-to-fail round-trip.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod envelope;
mod error;
pub mod readiness;

pub use envelope::{Envelope, NONCE_LEN};
pub use error::EnvelopeError;
