//! One event per transition. The topic is the name of the state entered.

use soroban_sdk::{Address, BytesN, Env, Symbol};

use crate::game::{ComparisonRequest, GameState, Winner};

fn topic(env: &Env, state: GameState) -> (Symbol,) {
    (Symbol::new(env, state.name()),)
}

pub(crate) fn waiting_for_players(env: &Env, oracle: &Address) {
    env.events()
        .publish(topic(env, GameState::WaitingForPlayers), (oracle.clone(),));
}

/// `PlayerOnePlayed` or `PlayerTwoPlayed`, depending on `state`.
pub(crate) fn player_played(env: &Env, state: GameState, player: &Address, handle: &BytesN<32>) {
    env.events()
        .publish(topic(env, state), (player.clone(), handle.clone()));
}

/// The oracle's work order: it carries everything needed to run the comparison.
pub(crate) fn waiting_for_winner(env: &Env, request: &ComparisonRequest) {
    env.events().publish(
        topic(env, GameState::WaitingForWinner),
        (
            request.requested_by.clone(),
            request.request_id.clone(),
            request.gesture1.clone(),
            request.gesture2.clone(),
        ),
    );
}

pub(crate) fn resolved(env: &Env, request_id: &BytesN<32>, winner: &Winner) {
    env.events().publish(
        topic(env, GameState::Resolved),
        (request_id.clone(), winner.clone()),
    );
}
