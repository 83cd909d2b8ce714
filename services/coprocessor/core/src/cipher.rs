//! Additively homomorphic encryption of gestures over Z/3.
//!
//! `encrypt` adds a keyed pad to the gesture; `sub` subtracts two ciphertexts
//! without the key. The key holder can then strip the combined pads and learn
//! `g1 - g2 mod 3`, which is all the comparison needs. Individual gestures are
//! never decrypted.

use crate::constants::GESTURE_MODULUS;
use crate::error::CoprocessorError;
use crate::keys::NetworkKey;
use crate::types::{Ciphertext, Gesture};

/// Ciphertext of `g1 - g2`, still masked by `pad(n1) - pad(n2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncryptedDifference {
    pub body: u8,
    pub minuend_nonce: [u8; 32],
    pub subtrahend_nonce: [u8; 32],
}

pub fn encrypt(key: &NetworkKey, gesture: Gesture, nonce: [u8; 32]) -> Ciphertext {
    Ciphertext {
        nonce,
        body: (gesture.code() + key.pad(&nonce)) % GESTURE_MODULUS,
    }
}

fn check_body(ct: &Ciphertext) -> Result<(), CoprocessorError> {
    if ct.body >= GESTURE_MODULUS {
        return Err(CoprocessorError::MalformedCiphertext(ct.body));
    }
    Ok(())
}

/// Homomorphic `lhs - rhs`. Needs no key.
pub fn sub(lhs: &Ciphertext, rhs: &Ciphertext) -> Result<EncryptedDifference, CoprocessorError> {
    check_body(lhs)?;
    check_body(rhs)?;
    Ok(EncryptedDifference {
        body: (lhs.body + GESTURE_MODULUS - rhs.body) % GESTURE_MODULUS,
        minuend_nonce: lhs.nonce,
        subtrahend_nonce: rhs.nonce,
    })
}

/// Removes the combined pad and returns `g1 - g2 mod 3`.
pub fn decrypt_difference(key: &NetworkKey, diff: &EncryptedDifference) -> u8 {
    let pad = (key.pad(&diff.minuend_nonce) + GESTURE_MODULUS - key.pad(&diff.subtrahend_nonce))
        % GESTURE_MODULUS;
    (diff.body + GESTURE_MODULUS - pad) % GESTURE_MODULUS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> NetworkKey {
        NetworkKey::from_bytes([0x42; 32])
    }

    fn nonce(a: u8, b: u8, c: u8) -> [u8; 32] {
        let mut n = [0u8; 32];
        n[0] = a;
        n[1] = b;
        n[2] = c;
        n
    }

    #[test]
    fn difference_decrypts_for_every_pair() {
        let key = key();
        for (i, g1) in Gesture::ALL.into_iter().enumerate() {
            for (j, g2) in Gesture::ALL.into_iter().enumerate() {
                for salt in 0..16u8 {
                    let c1 = encrypt(&key, g1, nonce(salt, i as u8, 1));
                    let c2 = encrypt(&key, g2, nonce(salt, j as u8, 2));
                    let diff = sub(&c1, &c2).unwrap();
                    let expected = (g1.code() + GESTURE_MODULUS - g2.code()) % GESTURE_MODULUS;
                    assert_eq!(decrypt_difference(&key, &diff), expected, "{g1:?} - {g2:?}");
                }
            }
        }
    }

    #[test]
    fn same_gesture_hides_behind_different_bodies() {
        let key = key();
        let mut seen = [false; 3];
        for i in 0..=255u8 {
            let ct = encrypt(&key, Gesture::Rock, [i; 32]);
            seen[ct.body as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn wrong_key_garbles_difference() {
        let key = key();
        let other = NetworkKey::from_bytes([0x43; 32]);
        let mut mismatches = 0;
        for i in 0..64u8 {
            let c1 = encrypt(&key, Gesture::Paper, [i; 32]);
            let c2 = encrypt(&key, Gesture::Rock, [i.wrapping_add(100); 32]);
            let diff = sub(&c1, &c2).unwrap();
            if decrypt_difference(&other, &diff) != 1 {
                mismatches += 1;
            }
        }
        assert!(mismatches > 0);
    }

    #[test]
    fn malformed_body_rejected() {
        let good = encrypt(&key(), Gesture::Rock, [0; 32]);
        let bad = Ciphertext { nonce: [1; 32], body: 3 };
        assert_eq!(sub(&good, &bad), Err(CoprocessorError::MalformedCiphertext(3)));
        assert_eq!(sub(&bad, &good), Err(CoprocessorError::MalformedCiphertext(3)));
    }
}
