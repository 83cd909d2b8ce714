use soroban_sdk::{contracttype, Address, Bytes, BytesN};

use crate::Error;

// ── Lifecycle ────────────────────────────────────────────────────────────────

/// Game lifecycle. Ordered so that `state >= PlayerOnePlayed` reads naturally.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GameState {
    WaitingForPlayers = 0,
    PlayerOnePlayed = 1,
    PlayerTwoPlayed = 2,
    WaitingForWinner = 3,
    Resolved = 4,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::WaitingForPlayers => "WaitingForPlayers",
            GameState::PlayerOnePlayed => "PlayerOnePlayed",
            GameState::PlayerTwoPlayed => "PlayerTwoPlayed",
            GameState::WaitingForWinner => "WaitingForWinner",
            GameState::Resolved => "Resolved",
        }
    }
}

/// Decrypted comparison result delivered by the oracle.
///
/// The codes are `(g1 - g2) mod 3` with Rock=0, Paper=1, Scissors=2.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Outcome {
    Draw = 0,
    Player1Wins = 1,
    Player2Wins = 2,
}

impl Outcome {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Draw),
            1 => Some(Self::Player1Wins),
            2 => Some(Self::Player2Wins),
            _ => None,
        }
    }
}

/// `Unresolved` until the oracle answers; never written back once set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Winner {
    Unresolved,
    Draw,
    Player(Address),
}

impl Winner {
    pub fn is_resolved(&self) -> bool {
        *self != Winner::Unresolved
    }
}

// ── Inputs and records ───────────────────────────────────────────────────────

/// Ciphertext handle produced client-side, plus the proof binding it to a
/// game contract and a submitter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedInput {
    pub handle: BytesN<32>,
    pub proof: Bytes,
}

/// Trusted configuration, fixed at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub oracle: Address,
    pub input_verifier: Address,
}

/// The single outstanding oracle request. Only exists in WaitingForWinner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparisonRequest {
    pub request_id: BytesN<32>,
    pub gesture1: BytesN<32>,
    pub gesture2: BytesN<32>,
    pub requested_by: Address,
    pub ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    pub state: GameState,
    pub player1: Option<Address>,
    pub player2: Option<Address>,
    pub gesture1: Option<BytesN<32>>,
    pub gesture2: Option<BytesN<32>>,
    pub winner: Winner,
}

// ── Transitions ──────────────────────────────────────────────────────────────
//
// Each transition either mutates `self` completely and returns Ok, or returns
// Err with `self` untouched.

impl Game {
    pub fn new() -> Self {
        Game {
            state: GameState::WaitingForPlayers,
            player1: None,
            player2: None,
            gesture1: None,
            gesture2: None,
            winner: Winner::Unresolved,
        }
    }

    /// First or second move. Returns the state entered.
    pub fn record_move(&mut self, player: Address, handle: BytesN<32>) -> Result<GameState, Error> {
        match self.state {
            GameState::WaitingForPlayers => {
                self.player1 = Some(player);
                self.gesture1 = Some(handle);
                self.state = GameState::PlayerOnePlayed;
            }
            GameState::PlayerOnePlayed => {
                if self.player1.as_ref() == Some(&player) {
                    return Err(Error::AlreadyPlayed);
                }
                // A handle is bound to one submitter; the opponent's is never valid here.
                if self.gesture1.as_ref() == Some(&handle) {
                    return Err(Error::InvalidProof);
                }
                self.player2 = Some(player);
                self.gesture2 = Some(handle);
                self.state = GameState::PlayerTwoPlayed;
            }
            _ => return Err(Error::InvalidStateTransition),
        }
        Ok(self.state)
    }

    /// Enters WaitingForWinner and hands back the two handles to compare.
    pub fn begin_resolution(&mut self) -> Result<(BytesN<32>, BytesN<32>), Error> {
        match self.state {
            GameState::PlayerTwoPlayed => {}
            GameState::WaitingForWinner => return Err(Error::RequestAlreadyPending),
            _ => return Err(Error::InvalidStateTransition),
        }
        let gesture1 = self.gesture1.clone().ok_or(Error::InvalidStateTransition)?;
        let gesture2 = self.gesture2.clone().ok_or(Error::InvalidStateTransition)?;
        self.state = GameState::WaitingForWinner;
        Ok((gesture1, gesture2))
    }

    /// Applies the decrypted outcome. Terminal.
    pub fn resolve(&mut self, outcome: Outcome) -> Result<Winner, Error> {
        if self.state != GameState::WaitingForWinner {
            return Err(Error::InvalidStateTransition);
        }
        let winner = match outcome {
            Outcome::Draw => Winner::Draw,
            Outcome::Player1Wins => {
                Winner::Player(self.player1.clone().ok_or(Error::InvalidStateTransition)?)
            }
            Outcome::Player2Wins => {
                Winner::Player(self.player2.clone().ok_or(Error::InvalidStateTransition)?)
            }
        };
        self.winner = winner.clone();
        self.state = GameState::Resolved;
        Ok(winner)
    }
}
