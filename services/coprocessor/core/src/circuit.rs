//! The comparison the coprocessor runs for a game.
//!
//! Rock 0, Paper 1, Scissors 2. With `d = (g1 - g2) mod 3`: 0 is a draw,
//! 1 means player 1 wins, 2 means player 2 wins. The outcome code equals `d`.

use crate::cipher;
use crate::constants::GESTURE_MODULUS;
use crate::error::CoprocessorError;
use crate::keys::NetworkKey;
use crate::types::{Ciphertext, Gesture, Outcome};

fn outcome_from_difference(d: u8) -> Option<Outcome> {
    Outcome::from_code(d as u32)
}

/// Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
pub fn beats(a: Gesture, b: Gesture) -> bool {
    (a.code() + GESTURE_MODULUS - b.code()) % GESTURE_MODULUS == 1
}

/// Plaintext reference for `compare_encrypted`.
pub fn outcome_of(g1: Gesture, g2: Gesture) -> Outcome {
    if beats(g1, g2) {
        Outcome::Player1Wins
    } else if beats(g2, g1) {
        Outcome::Player2Wins
    } else {
        Outcome::Draw
    }
}

/// Compares two ciphertexts under `key`. Only the difference is decrypted.
pub fn compare_encrypted(
    key: &NetworkKey,
    gesture1: &Ciphertext,
    gesture2: &Ciphertext,
) -> Result<Outcome, CoprocessorError> {
    let diff = cipher::sub(gesture1, gesture2)?;
    let d = cipher::decrypt_difference(key, &diff);
    outcome_from_difference(d).ok_or(CoprocessorError::MalformedCiphertext(d))
}
