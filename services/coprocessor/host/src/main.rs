use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use sealed_rps_core::{
    ComparisonRequest, ComparisonResponse, GameStatus, Gesture, InputStore, NetworkKey,
};
use serde_json::Value;

const KEY_ENV: &str = "COPROCESSOR_KEY";
const DEFAULT_STORE: &str = "coprocessor_store.json";
const ARTIFACTS_PATH: &str = "callback_artifacts.json";

const USAGE: &str = "\
Usage:
  sealed-rps-coprocessor keygen
  sealed-rps-coprocessor encrypt <game> <player> <gesture> [--store <path>]
  sealed-rps-coprocessor compare <request.json | -> [--store <path>]
  sealed-rps-coprocessor game-info <snapshot.json | ->

encrypt and compare read the network key from COPROCESSOR_KEY (32-byte hex).

WARNING: encrypt needs the network key, so whoever runs it sees the
plaintext gesture. The bundled scheme is a toy stand-in for a real FHE
backend and hides nothing from the coprocessor operator. Do not rely on it
for confidentiality.

game-info renders the JSON printed by the contract's get_game.";

#[derive(Debug, PartialEq)]
struct Options {
    store: PathBuf,
    positional: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut store = PathBuf::from(DEFAULT_STORE);
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--store" => {
                let path = iter.next().context("--store needs a path")?;
                store = PathBuf::from(path);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ => positional.push(arg.clone()),
        }
    }
    Ok(Options { store, positional })
}

fn load_key() -> Result<NetworkKey> {
    let hex = std::env::var(KEY_ENV)
        .with_context(|| format!("{KEY_ENV} is not set (run `keygen` first)"))?;
    NetworkKey::from_hex(&hex).with_context(|| format!("parsing {KEY_ENV}"))
}

fn load_store(path: &Path) -> Result<InputStore> {
    if !path.exists() {
        return Ok(InputStore::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading store {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing store {}", path.display()))
}

fn save_store(path: &Path, store: &InputStore) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(store)?)
        .with_context(|| format!("writing store {}", path.display()))
}

/// Reads a file, or stdin for `-`.
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {source}"))
    }
}

fn load_request(source: &str) -> Result<ComparisonRequest> {
    let json = read_source(source)?;
    serde_json::from_str(&json).context("parsing ComparisonRequest JSON")
}

// ============================================================================
// Commands
// ============================================================================

fn run_keygen() -> Result<()> {
    let key = NetworkKey::from_bytes(rand::random());
    println!("{}", key.to_hex());
    eprintln!("Export it as {KEY_ENV} for encrypt and compare.");
    Ok(())
}

fn run_encrypt(opts: &Options) -> Result<()> {
    let [game, player, gesture] = opts.positional.as_slice() else {
        bail!("encrypt takes <game> <player> <gesture>\n\n{USAGE}");
    };
    let gesture: Gesture = gesture.parse()?;
    let key = load_key()?;
    let mut store = load_store(&opts.store)?;

    let input = store.encrypt_and_register(&key, game, player, gesture, rand::random())?;
    save_store(&opts.store, &store)?;
    eprintln!(
        "Registered handle {} for {player} in {game} ({} inputs in {})",
        input.handle,
        store.len(),
        opts.store.display()
    );

    let submission = serde_json::json!({
        "handle": input.handle.to_string(),
        "proof": hex::encode(input.proof),
    });
    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}

fn run_compare(opts: &Options) -> Result<()> {
    let [source] = opts.positional.as_slice() else {
        bail!("compare takes one request file (or - for stdin)\n\n{USAGE}");
    };
    let request = load_request(source)?;
    let key = load_key()?;
    let store = load_store(&opts.store)?;

    eprintln!(
        "Evaluating request {} for {}",
        hex::encode(request.request_id),
        request.game
    );
    let start = Instant::now();
    let response = store.evaluate(&key, &request)?;
    eprintln!(
        "Comparison evaluated in {:.1}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    print_result(&response);
    write_artifacts(&response)?;
    println!("\n=== Ready for Soroban submission (oracle_callback) ===");
    Ok(())
}

fn run_game_info(opts: &Options) -> Result<()> {
    let [source] = opts.positional.as_slice() else {
        bail!("game-info takes one snapshot file (or - for stdin)\n\n{USAGE}");
    };
    let snapshot: Value =
        serde_json::from_str(&read_source(source)?).context("parsing get_game JSON")?;
    for line in render_game_info(&snapshot)? {
        println!("{line}");
    }
    Ok(())
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_result(response: &ComparisonResponse) {
    println!("=== Comparison Result ===");
    println!("Game: {}", response.game);
    println!("Request ID: {}", hex::encode(response.request_id));
    println!(
        "Outcome: {:?} (code {})",
        response.outcome,
        response.outcome.code()
    );
}

fn render_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| render_field(Some(v)))
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => other.to_string(),
    }
}

/// One `key: value` line per game field, with the state shown by name.
fn render_game_info(snapshot: &Value) -> Result<Vec<String>> {
    let code = snapshot
        .get("state")
        .and_then(Value::as_u64)
        .context("snapshot has no numeric state")?;
    let state = u32::try_from(code)
        .ok()
        .and_then(GameStatus::from_code)
        .with_context(|| format!("unknown game state {code}"))?;

    let mut lines = vec![format!("state: {}", state.name())];
    for field in ["player1", "player2", "gesture1", "gesture2", "winner"] {
        lines.push(format!("{field}: {}", render_field(snapshot.get(field))));
    }
    Ok(lines)
}

fn artifacts_json(response: &ComparisonResponse) -> serde_json::Value {
    serde_json::json!({
        "game": response.game,
        "request_id": hex::encode(response.request_id),
        "outcome": response.outcome.code(),
        "outcome_name": format!("{:?}", response.outcome),
    })
}

fn write_artifacts(response: &ComparisonResponse) -> Result<()> {
    let artifacts = artifacts_json(response);
    std::fs::write(ARTIFACTS_PATH, serde_json::to_string_pretty(&artifacts)?)
        .with_context(|| format!("writing {ARTIFACTS_PATH}"))?;
    eprintln!("Artifacts written to {ARTIFACTS_PATH}");
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        bail!("missing command");
    };
    let opts = parse_args(rest)?;

    match command.as_str() {
        "keygen" => run_keygen(),
        "encrypt" => run_encrypt(&opts),
        "compare" => run_compare(&opts),
        "game-info" => run_game_info(&opts),
        "help" | "-h" | "--help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => {
            eprintln!("{USAGE}");
            bail!("unknown command {other:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealed_rps_core::Outcome;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_store_path() {
        let opts = parse_args(&strings(&["CGAME", "GALICE", "rock"])).unwrap();
        assert_eq!(opts.store, PathBuf::from(DEFAULT_STORE));
        assert_eq!(opts.positional, strings(&["CGAME", "GALICE", "rock"]));
    }

    #[test]
    fn store_flag_anywhere() {
        let opts = parse_args(&strings(&["--store", "/tmp/s.json", "req.json"])).unwrap();
        assert_eq!(opts.store, PathBuf::from("/tmp/s.json"));
        assert_eq!(opts.positional, strings(&["req.json"]));

        let opts = parse_args(&strings(&["req.json", "--store", "x.json"])).unwrap();
        assert_eq!(opts.store, PathBuf::from("x.json"));
    }

    #[test]
    fn bad_flags() {
        assert!(parse_args(&strings(&["--store"])).is_err());
        assert!(parse_args(&strings(&["--local"])).is_err());
    }

    #[test]
    fn artifacts_carry_outcome_code() {
        let response = ComparisonResponse {
            game: "CGAME".to_string(),
            request_id: [0xAB; 32],
            outcome: Outcome::Player2Wins,
        };
        let json = artifacts_json(&response);
        assert_eq!(json["outcome"], 2);
        assert_eq!(json["outcome_name"], "Player2Wins");
        assert_eq!(json["request_id"], "ab".repeat(32));
    }

    #[test]
    fn usage_warns_encrypt_sees_plaintext() {
        assert!(USAGE.contains("sees the\nplaintext gesture"));
        assert!(USAGE.contains("Do not rely on it"));
    }

    #[test]
    fn game_info_names_state() {
        let snapshot = serde_json::json!({
            "state": 4,
            "player1": "GALICE",
            "player2": "GBOB",
            "gesture1": "aa",
            "gesture2": "bb",
            "winner": ["Player", "GALICE"],
        });
        let lines = render_game_info(&snapshot).unwrap();
        assert_eq!(
            lines,
            strings(&[
                "state: Resolved",
                "player1: GALICE",
                "player2: GBOB",
                "gesture1: aa",
                "gesture2: bb",
                "winner: Player GALICE",
            ])
        );
    }

    #[test]
    fn game_info_fresh_game() {
        let snapshot = serde_json::json!({
            "state": 0,
            "player1": null,
            "player2": null,
            "gesture1": null,
            "gesture2": null,
            "winner": "Unresolved",
        });
        let lines = render_game_info(&snapshot).unwrap();
        assert_eq!(lines[0], "state: WaitingForPlayers");
        assert_eq!(lines[1], "player1: none");
        assert_eq!(lines[5], "winner: Unresolved");
    }

    #[test]
    fn game_info_rejects_unknown_state() {
        assert!(render_game_info(&serde_json::json!({ "state": 9 })).is_err());
        assert!(render_game_info(&serde_json::json!({ "state": "Resolved" })).is_err());
    }

    #[test]
    fn missing_store_is_empty() {
        let path = std::env::temp_dir().join("sealed-rps-no-such-store.json");
        let store = load_store(&path).unwrap();
        assert!(store.is_empty());
    }
}
