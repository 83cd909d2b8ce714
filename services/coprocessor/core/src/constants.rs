/// Gestures and their differences live in Z/3.
pub const GESTURE_MODULUS: u8 = 3;

// Domain separation tags for every SHA-256 use.
pub const PAD_DOMAIN: &[u8] = b"sealed-rps/pad/v1";
pub const HANDLE_DOMAIN: &[u8] = b"sealed-rps/handle/v1";
pub const PROOF_DOMAIN: &[u8] = b"sealed-rps/proof/v1";
