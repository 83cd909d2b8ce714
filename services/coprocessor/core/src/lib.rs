pub mod cipher;
pub mod circuit;
pub mod constants;
pub mod error;
pub mod hash;
pub mod keys;
pub mod store;
pub mod types;

pub use cipher::{decrypt_difference, encrypt, sub, EncryptedDifference};
pub use circuit::{beats, compare_encrypted, outcome_of};
pub use constants::*;
pub use error::CoprocessorError;
pub use hash::*;
pub use keys::NetworkKey;
pub use store::{verify_input, InputStore};
pub use types::*;
