//! Plays every gesture pairing through the coprocessor and prints the
//! comparison request the host expects for one of them.
//!
//! Usage:
//!   cargo run -p sealed-rps-core --example simulate-match -- [rock|paper|scissors] [rock|paper|scissors]

use sealed_rps_core::*;

const GAME: &str = "CSIMULATEDGAME";
const PLAYER1: &str = "GPLAYERONE";
const PLAYER2: &str = "GPLAYERTWO";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let pick = |i: usize, default: Gesture| -> Gesture {
        match args.get(i) {
            Some(s) => s.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            }),
            None => default,
        }
    };
    let (shown1, shown2) = (pick(0, Gesture::Rock), pick(1, Gesture::Scissors));

    let key = NetworkKey::from_bytes(rand::random());
    let mut store = InputStore::new();

    eprintln!("=== Encrypted comparisons ===");
    let mut sample = None;
    for g1 in Gesture::ALL {
        for g2 in Gesture::ALL {
            let game = format!("{GAME}{}{}", g1.code(), g2.code());
            let a = store
                .encrypt_and_register(&key, &game, PLAYER1, g1, rand::random())
                .unwrap();
            let b = store
                .encrypt_and_register(&key, &game, PLAYER2, g2, rand::random())
                .unwrap();
            let request = ComparisonRequest {
                game,
                request_id: rand::random(),
                gesture1: a.handle,
                gesture2: b.handle,
            };
            let response = store.evaluate(&key, &request).unwrap();
            assert_eq!(response.outcome, outcome_of(g1, g2));
            eprintln!(
                "{:>8} vs {:<8} -> {:?} (code {})",
                format!("{g1:?}"),
                format!("{g2:?}"),
                response.outcome,
                response.outcome.code()
            );
            if (g1, g2) == (shown1, shown2) {
                sample = Some(request);
            }
        }
    }
    eprintln!("Store holds {} ciphertexts", store.len());

    if let Some(request) = sample {
        println!("{}", serde_json::to_string_pretty(&request).unwrap());
    }
}
