//! Cryopost Cryptographic Primitives
//!
//! The symmetric half of message recovery: once the onion unwrap loop has
//! produced the terminal key material (a hex string), this crate turns it
//! into a [`RecoveredKey`] and opens the envelope's AEAD blob.
//!
//! # Framing
//!
//! The encrypted message blob is `nonce || ciphertext || tag`:
//!
//! ```text
//! bytes 0..12   AES-GCM nonce
//! bytes 12..N   ciphertext with the 16-byte Poly-style GCM tag appended
//! ```
//!
//! The tag is not split out explicitly; the AEAD primitive consumes the
//! combined tail, so a wrong key or a flipped bit surfaces as a single
//! authentication failure rather than garbage plaintext.
//!
//! # Key lifecycle
//!
//! A [`RecoveredKey`] is built once per recovery, used for exactly one
//! [`decrypt_message`] call, and zeroized on drop. Key correctness is proven
//! only by tag verification; no other validation is possible or attempted.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod key;
mod message;

pub use error::CipherError;
pub use key::{KEY_LEN, RecoveredKey};
pub use message::{NONCE_LEN, TAG_LEN, decrypt_message};
