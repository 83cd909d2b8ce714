use sha2::{Digest, Sha256};

use crate::constants::{HANDLE_DOMAIN, PROOF_DOMAIN};
use crate::keys::NetworkKey;
use crate::types::{Ciphertext, Handle};

/// Length-prefixed so ("ab", "c") and ("a", "bc") hash differently.
fn update_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u32).to_le_bytes());
    hasher.update(s.as_bytes());
}

/// Handle of a ciphertext bound to one game and one player. Registering the
/// same ciphertext for another game or player yields another handle.
pub fn input_handle(game: &str, player: &str, ciphertext: &Ciphertext) -> Handle {
    let mut hasher = Sha256::new();
    hasher.update(HANDLE_DOMAIN);
    update_str(&mut hasher, game);
    update_str(&mut hasher, player);
    hasher.update(ciphertext.nonce);
    hasher.update([ciphertext.body]);
    Handle(hasher.finalize().into())
}

/// Keyed attestation that `handle` was produced by the network for
/// (`game`, `player`). This is what the input verifier checks on-chain.
pub fn input_proof(key: &NetworkKey, handle: &Handle, game: &str, player: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(PROOF_DOMAIN);
    hasher.update(key.as_bytes());
    hasher.update(handle.0);
    update_str(&mut hasher, game);
    update_str(&mut hasher, player);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = "CGAME";
    const ALICE: &str = "GALICE";
    const BOB: &str = "GBOB";

    fn ct() -> Ciphertext {
        Ciphertext { nonce: [5; 32], body: 1 }
    }

    #[test]
    fn handle_is_deterministic() {
        assert_eq!(input_handle(GAME, ALICE, &ct()), input_handle(GAME, ALICE, &ct()));
    }

    #[test]
    fn handle_binds_game_and_player() {
        let base = input_handle(GAME, ALICE, &ct());
        assert_ne!(base, input_handle(GAME, BOB, &ct()));
        assert_ne!(base, input_handle("COTHER", ALICE, &ct()));
        assert_ne!(input_handle("ab", "c", &ct()), input_handle("a", "bc", &ct()));
    }

    #[test]
    fn handle_binds_ciphertext() {
        let base = input_handle(GAME, ALICE, &ct());
        let other_body = Ciphertext { body: 2, ..ct() };
        let other_nonce = Ciphertext { nonce: [6; 32], ..ct() };
        assert_ne!(base, input_handle(GAME, ALICE, &other_body));
        assert_ne!(base, input_handle(GAME, ALICE, &other_nonce));
    }

    #[test]
    fn proof_depends_on_key() {
        let handle = input_handle(GAME, ALICE, &ct());
        let k1 = NetworkKey::from_bytes([1; 32]);
        let k2 = NetworkKey::from_bytes([2; 32]);
        assert_eq!(input_proof(&k1, &handle, GAME, ALICE), input_proof(&k1, &handle, GAME, ALICE));
        assert_ne!(input_proof(&k1, &handle, GAME, ALICE), input_proof(&k2, &handle, GAME, ALICE));
        assert_ne!(input_proof(&k1, &handle, GAME, ALICE), input_proof(&k1, &handle, GAME, BOB));
    }
}
