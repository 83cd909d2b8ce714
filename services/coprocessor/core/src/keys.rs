use std::fmt;

use hex::FromHex;
use sha2::{Digest, Sha256};

use crate::constants::{GESTURE_MODULUS, PAD_DOMAIN};
use crate::error::CoprocessorError;

/// Secret held by the coprocessor network. Every ciphertext in a match is
/// encrypted under it; only the network can decrypt a difference.
///
/// Toy scheme: the pad is a SHA-256 keystream reduced mod 3. Good enough to
/// keep gestures off-chain in tests and demos; not a real FHE scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkKey([u8; 32]);

impl NetworkKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoprocessorError> {
        let s = s.trim().trim_start_matches("0x");
        <[u8; 32]>::from_hex(s)
            .map(Self)
            .map_err(|e| CoprocessorError::InvalidKey(e.to_string()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Keystream element in Z/3 for `nonce`.
    pub fn pad(&self, nonce: &[u8; 32]) -> u8 {
        let mut hasher = Sha256::new();
        hasher.update(PAD_DOMAIN);
        hasher.update(self.0);
        hasher.update(nonce);
        let d = hasher.finalize();
        let word = u64::from_le_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]]);
        (word % GESTURE_MODULUS as u64) as u8
    }
}

// Never print key material.
impl fmt::Debug for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NetworkKey(..)")
    }
}
