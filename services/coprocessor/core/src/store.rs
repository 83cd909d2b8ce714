use serde::{Deserialize, Serialize};

use crate::cipher;
use crate::circuit;
use crate::error::CoprocessorError;
use crate::hash::{input_handle, input_proof};
use crate::keys::NetworkKey;
use crate::types::{
    ComparisonRequest, ComparisonResponse, EncryptedInput, Gesture, Handle,
};

/// Checks that `input` is well formed, its handle matches its binding and
/// its proof was issued under `key`.
pub fn verify_input(key: &NetworkKey, input: &EncryptedInput) -> Result<(), CoprocessorError> {
    if input.ciphertext.body >= crate::constants::GESTURE_MODULUS {
        return Err(CoprocessorError::MalformedCiphertext(input.ciphertext.body));
    }
    if input_handle(&input.game, &input.player, &input.ciphertext) != input.handle {
        return Err(CoprocessorError::HandleMismatch);
    }
    if input_proof(key, &input.handle, &input.game, &input.player) != input.proof {
        return Err(CoprocessorError::InvalidProof);
    }
    Ok(())
}

/// Ciphertexts known to the coprocessor, looked up by handle when a
/// comparison request arrives. Persisted as JSON by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputStore {
    pub inputs: Vec<EncryptedInput>,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn get(&self, handle: &Handle) -> Option<&EncryptedInput> {
        self.inputs.iter().find(|i| &i.handle == handle)
    }

    /// Encrypts `gesture` for (`game`, `player`), registers it and returns
    /// the input whose handle and proof the player submits to the game.
    ///
    /// Encryption needs the network key, so the key holder sees `gesture` in
    /// the clear. Only a real FHE backend with a public encryption key removes
    /// that trust.
    pub fn encrypt_and_register(
        &mut self,
        key: &NetworkKey,
        game: &str,
        player: &str,
        gesture: Gesture,
        nonce: [u8; 32],
    ) -> Result<EncryptedInput, CoprocessorError> {
        let ciphertext = cipher::encrypt(key, gesture, nonce);
        let handle = input_handle(game, player, &ciphertext);
        let input = EncryptedInput {
            game: game.to_string(),
            player: player.to_string(),
            handle,
            proof: input_proof(key, &handle, game, player),
            ciphertext,
        };
        self.register(key, input.clone())?;
        Ok(input)
    }

    pub fn register(&mut self, key: &NetworkKey, input: EncryptedInput) -> Result<(), CoprocessorError> {
        verify_input(key, &input)?;
        if self.get(&input.handle).is_some() {
            return Err(CoprocessorError::DuplicateHandle(input.handle));
        }
        self.inputs.push(input);
        Ok(())
    }

    /// Runs the comparison for a game's pending request. Both handles must be
    /// registered for the requesting game and belong to different players.
    pub fn evaluate(
        &self,
        key: &NetworkKey,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResponse, CoprocessorError> {
        let first = self
            .get(&request.gesture1)
            .ok_or(CoprocessorError::UnknownHandle(request.gesture1))?;
        let second = self
            .get(&request.gesture2)
            .ok_or(CoprocessorError::UnknownHandle(request.gesture2))?;

        for input in [first, second] {
            if input.game != request.game {
                return Err(CoprocessorError::GameMismatch {
                    handle: input.handle,
                    expected: request.game.clone(),
                    found: input.game.clone(),
                });
            }
            verify_input(key, input)?;
        }
        if first.player == second.player {
            return Err(CoprocessorError::SamePlayer(first.player.clone()));
        }

        let outcome = circuit::compare_encrypted(key, &first.ciphertext, &second.ciphertext)?;
        Ok(ComparisonResponse {
            game: request.game.clone(),
            request_id: request.request_id,
            outcome,
        })
    }
}
