//! The symmetric key recovered by the onion unwrap loop.

use zeroize::Zeroize;

use crate::error::CipherError;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// A recovered AES-256 message key.
///
/// Built by hex-decoding the unwrap loop's terminal output. Holds the only
/// copy of the key bytes; zeroized on drop and never printed. Correctness is
/// proven solely by AEAD tag verification downstream.
pub struct RecoveredKey([u8; KEY_LEN]);

impl RecoveredKey {
    /// Decode key material from the hex string the unwrap loop produced.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::MalformedKeyHex`] if the string is not hex,
    /// or [`CipherError::MalformedKey`] if it decodes to the wrong length.
    pub fn from_hex(key_hex: &str) -> Result<Self, CipherError> {
        let mut bytes =
            hex::decode(key_hex).map_err(|e| CipherError::MalformedKeyHex(e.to_string()))?;

        let key = <[u8; KEY_LEN]>::try_from(bytes.as_slice())
            .map_err(|_| CipherError::MalformedKey { expected: KEY_LEN, actual: bytes.len() });
        bytes.zeroize();
        Ok(Self(key?))
    }

    /// Raw key bytes, for the AEAD call only.
    pub(crate) fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

// Implement Drop to zeroize key material
impl Drop for RecoveredKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for RecoveredKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RecoveredKey(..)")
    }
}
