use std::fmt;
use std::str::FromStr;

use hex::FromHex;
use serde::{Deserialize, Serialize};

use crate::error::CoprocessorError;

// ── Gestures ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Gesture {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Gesture {
    pub const ALL: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissors];

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Rock),
            1 => Some(Self::Paper),
            2 => Some(Self::Scissors),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl FromStr for Gesture {
    type Err = CoprocessorError;

    /// Accepts the numeric code or the lowercase name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "rock" => Ok(Self::Rock),
            "1" | "paper" => Ok(Self::Paper),
            "2" | "scissors" => Ok(Self::Scissors),
            _ => Err(CoprocessorError::InvalidGesture(s.to_string())),
        }
    }
}

// ── Outcome ─────────────────────────────────────────────────

/// Result of a comparison; the code is what the game contract receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum Outcome {
    Draw = 0,
    Player1Wins = 1,
    Player2Wins = 2,
}

impl Outcome {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Draw),
            1 => Some(Self::Player1Wins),
            2 => Some(Self::Player2Wins),
            _ => None,
        }
    }
}

// ── Handles and ciphertexts ─────────────────────────────────

/// 32-byte ciphertext handle as stored by the game contract. Hex in JSON.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(#[serde(with = "hex::serde")] pub [u8; 32]);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({self})")
    }
}

impl FromStr for Handle {
    type Err = CoprocessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches("0x");
        <[u8; 32]>::from_hex(s)
            .map(Handle)
            .map_err(|e| CoprocessorError::InvalidHex(e.to_string()))
    }
}

/// Ciphertext of one gesture: `body = (gesture + pad(key, nonce)) mod 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    #[serde(with = "hex::serde")]
    pub nonce: [u8; 32],
    pub body: u8,
}

/// A registered input: the ciphertext plus the game and player it is bound to.
/// `game` and `player` are Stellar strkeys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedInput {
    pub game: String,
    pub player: String,
    pub handle: Handle,
    #[serde(with = "hex::serde")]
    pub proof: [u8; 32],
    pub ciphertext: Ciphertext,
}

// ── Game lifecycle ──────────────────────────────────────────

/// Mirror of the game contract's state codes, for rendering snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum GameStatus {
    WaitingForPlayers = 0,
    PlayerOnePlayed = 1,
    PlayerTwoPlayed = 2,
    WaitingForWinner = 3,
    Resolved = 4,
}

impl GameStatus {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::WaitingForPlayers),
            1 => Some(Self::PlayerOnePlayed),
            2 => Some(Self::PlayerTwoPlayed),
            3 => Some(Self::WaitingForWinner),
            4 => Some(Self::Resolved),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::WaitingForPlayers => "WaitingForPlayers",
            Self::PlayerOnePlayed => "PlayerOnePlayed",
            Self::PlayerTwoPlayed => "PlayerTwoPlayed",
            Self::WaitingForWinner => "WaitingForWinner",
            Self::Resolved => "Resolved",
        }
    }
}

// ── Oracle I/O ──────────────────────────────────────────────

/// Work order taken from the game's `WaitingForWinner` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub game: String,
    #[serde(with = "hex::serde")]
    pub request_id: [u8; 32],
    pub gesture1: Handle,
    pub gesture2: Handle,
}

/// Arguments for the game's `oracle_callback`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub game: String,
    #[serde(with = "hex::serde")]
    pub request_id: [u8; 32],
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_codes() {
        for g in Gesture::ALL {
            assert_eq!(Gesture::from_u8(g.code()), Some(g));
        }
        assert_eq!(Gesture::from_u8(3), None);
    }

    #[test]
    fn gesture_parsing() {
        assert_eq!("0".parse::<Gesture>(), Ok(Gesture::Rock));
        assert_eq!("Paper".parse::<Gesture>(), Ok(Gesture::Paper));
        assert_eq!(" scissors ".parse::<Gesture>(), Ok(Gesture::Scissors));
        assert!(matches!(
            "lizard".parse::<Gesture>(),
            Err(CoprocessorError::InvalidGesture(_))
        ));
    }

    #[test]
    fn status_names_follow_contract_codes() {
        let names: Vec<&str> = (0..5)
            .map(|c| GameStatus::from_code(c).unwrap().name())
            .collect();
        assert_eq!(
            names,
            [
                "WaitingForPlayers",
                "PlayerOnePlayed",
                "PlayerTwoPlayed",
                "WaitingForWinner",
                "Resolved"
            ]
        );
        assert_eq!(GameStatus::from_code(5), None);
    }

    #[test]
    fn outcome_codes_match_contract() {
        assert_eq!(Outcome::Draw.code(), 0);
        assert_eq!(Outcome::Player1Wins.code(), 1);
        assert_eq!(Outcome::Player2Wins.code(), 2);
        assert_eq!(Outcome::from_code(3), None);
    }

    #[test]
    fn handle_hex_forms() {
        let handle = Handle([0xAB; 32]);
        let text = handle.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<Handle>(), Ok(handle));
        assert_eq!(format!("0x{text}").parse::<Handle>(), Ok(handle));
        assert!("abcd".parse::<Handle>().is_err());

        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, format!("\"{text}\""));
        assert_eq!(serde_json::from_str::<Handle>(&json).unwrap(), handle);
    }

    #[test]
    fn request_parses_from_event_json() {
        let json = format!(
            r#"{{"game":"CGAME","request_id":"{}","gesture1":"{}","gesture2":"{}"}}"#,
            "11".repeat(32),
            "22".repeat(32),
            "33".repeat(32)
        );
        let request: ComparisonRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.game, "CGAME");
        assert_eq!(request.request_id, [0x11; 32]);
        assert_eq!(request.gesture1, Handle([0x22; 32]));
        assert_eq!(request.gesture2, Handle([0x33; 32]));
    }
}
