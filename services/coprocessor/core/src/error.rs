use thiserror::Error;

use crate::types::Handle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoprocessorError {
    #[error("unknown ciphertext handle {0}")]
    UnknownHandle(Handle),

    #[error("ciphertext handle {0} is already registered")]
    DuplicateHandle(Handle),

    #[error("handle does not match the ciphertext and its game/player binding")]
    HandleMismatch,

    #[error("input proof does not verify")]
    InvalidProof,

    #[error("handle {handle} belongs to game {found}, not {expected}")]
    GameMismatch {
        handle: Handle,
        expected: String,
        found: String,
    },

    #[error("both gestures were submitted by {0}")]
    SamePlayer(String),

    #[error("malformed ciphertext body {0}")]
    MalformedCiphertext(u8),

    #[error("invalid network key: {0}")]
    InvalidKey(String),

    #[error("invalid gesture {0:?} (expected 0/rock, 1/paper or 2/scissors)")]
    InvalidGesture(String),

    #[error("invalid hex value: {0}")]
    InvalidHex(String),
}
