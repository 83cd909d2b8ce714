#![no_std]

//! Two-player Rock-Paper-Scissors over encrypted gestures.
//!
//! Moves arrive as ciphertext handles and are never decrypted here. Once both
//! players have moved, anyone may ask the compute oracle to compare the two
//! ciphertexts; the oracle answers through `oracle_callback` with the
//! decrypted outcome only, and the game records the winner.

mod events;
mod game;

pub use game::{ComparisonRequest, Config, EncryptedInput, Game, GameState, Outcome, Winner};

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, log,
    xdr::ToXdr,
    Address, Bytes, BytesN, Env,
};

// ── Cross-contract clients ───────────────────────────────────────────────────

/// Encryption subsystem. Checks that `proof` is valid for `handle` and that
/// the ciphertext was produced for `contract` by `user`.
#[contractclient(name = "InputVerifierClient")]
pub trait InputVerifierInterface {
    fn verify_input(
        env: Env,
        handle: BytesN<32>,
        proof: Bytes,
        contract: Address,
        user: Address,
    ) -> bool;
}

// ── Storage types ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Game,
    Request,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidStateTransition = 1,
    AlreadyPlayed = 2,
    InvalidProof = 3,
    RequestAlreadyPending = 4,
    Unauthorized = 5,
    UnknownRequestId = 6,
    InvalidOracleResult = 7,
    NotInitialized = 8,
}

const DAY_IN_LEDGERS: u32 = 17_280;
const GAME_TTL_LEDGERS: u32 = 30 * DAY_IN_LEDGERS;
const GAME_TTL_THRESHOLD: u32 = GAME_TTL_LEDGERS - DAY_IN_LEDGERS;

// ── Storage helpers ──────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

fn load_game(env: &Env) -> Result<Game, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Game)
        .ok_or(Error::NotInitialized)
}

fn save_game(env: &Env, game: &Game) {
    env.storage().instance().set(&DataKey::Game, game);
    env.storage()
        .instance()
        .extend_ttl(GAME_TTL_THRESHOLD, GAME_TTL_LEDGERS);
}

/// sha256(contract ‖ ledger sequence ‖ gesture1 ‖ gesture2)
fn derive_request_id(env: &Env, gesture1: &BytesN<32>, gesture2: &BytesN<32>) -> BytesN<32> {
    let mut preimage = env.current_contract_address().to_xdr(env);
    preimage.append(&Bytes::from_array(env, &env.ledger().sequence().to_be_bytes()));
    preimage.append(&Bytes::from_array(env, &gesture1.to_array()));
    preimage.append(&Bytes::from_array(env, &gesture2.to_array()));
    env.crypto().sha256(&preimage).into()
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SealedRpsContract;

#[contractimpl]
impl SealedRpsContract {
    /// Called once by the registry that deploys the game. The oracle and the
    /// input verifier cannot be changed afterwards.
    pub fn __constructor(env: Env, oracle: Address, input_verifier: Address) {
        let config = Config {
            oracle: oracle.clone(),
            input_verifier,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        save_game(&env, &Game::new());
        events::waiting_for_players(&env, &oracle);
    }

    /// Submit an encrypted gesture. The first caller becomes player 1, the
    /// next distinct caller player 2.
    pub fn submit(env: Env, player: Address, input: EncryptedInput) -> Result<GameState, Error> {
        player.require_auth();

        let config = load_config(&env)?;
        let mut game = load_game(&env)?;
        let state = game.record_move(player.clone(), input.handle.clone())?;

        let verifier = InputVerifierClient::new(&env, &config.input_verifier);
        if !verifier.verify_input(
            &input.handle,
            &input.proof,
            &env.current_contract_address(),
            &player,
        ) {
            log!(&env, "encrypted input rejected", player);
            return Err(Error::InvalidProof);
        }

        save_game(&env, &game);
        events::player_played(&env, state, &player, &input.handle);
        log!(&env, "move recorded", state, player);
        Ok(state)
    }

    /// Ask the oracle to compare the two stored ciphertexts. Any caller may
    /// trigger it, once. Returns the request id the callback must echo.
    pub fn request_winner(env: Env, caller: Address) -> Result<BytesN<32>, Error> {
        caller.require_auth();

        let mut game = load_game(&env)?;
        let (gesture1, gesture2) = game.begin_resolution()?;

        let request = ComparisonRequest {
            request_id: derive_request_id(&env, &gesture1, &gesture2),
            gesture1,
            gesture2,
            requested_by: caller,
            ledger: env.ledger().sequence(),
        };
        env.storage().instance().set(&DataKey::Request, &request);
        save_game(&env, &game);

        events::waiting_for_winner(&env, &request);
        log!(&env, "comparison requested", request.request_id);
        Ok(request.request_id)
    }

    /// Oracle entry point. Only the configured oracle, only for the pending
    /// request, only with a valid outcome code; anything else is rejected
    /// without touching storage.
    pub fn oracle_callback(
        env: Env,
        oracle: Address,
        request_id: BytesN<32>,
        outcome: u32,
    ) -> Result<Winner, Error> {
        oracle.require_auth();

        let config = load_config(&env)?;
        if oracle != config.oracle {
            log!(&env, "callback from untrusted caller", oracle);
            return Err(Error::Unauthorized);
        }

        let mut game = load_game(&env)?;
        if game.state != GameState::WaitingForWinner {
            return Err(Error::InvalidStateTransition);
        }

        let pending: ComparisonRequest = env
            .storage()
            .instance()
            .get(&DataKey::Request)
            .ok_or(Error::UnknownRequestId)?;
        if pending.request_id != request_id {
            log!(&env, "callback for stale request", request_id);
            return Err(Error::UnknownRequestId);
        }

        let Some(outcome) = Outcome::from_code(outcome) else {
            log!(&env, "invalid oracle outcome", outcome);
            return Err(Error::InvalidOracleResult);
        };

        let winner = game.resolve(outcome)?;
        env.storage().instance().remove(&DataKey::Request);
        save_game(&env, &game);

        events::resolved(&env, &request_id, &winner);
        log!(&env, "game resolved", winner);
        Ok(winner)
    }

    /// Read-only snapshot. Absent fields are `None`; the winner reads
    /// `Unresolved` until the oracle answers.
    pub fn get_game(env: Env) -> Result<Game, Error> {
        load_game(&env)
    }

    pub fn pending_request(env: Env) -> Option<ComparisonRequest> {
        env.storage().instance().get(&DataKey::Request)
    }

    pub fn config(env: Env) -> Result<Config, Error> {
        load_config(&env)
    }
}
