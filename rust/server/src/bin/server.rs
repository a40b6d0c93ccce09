//! Standalone game server binary
//!
//! Usage: cargo run -p madcards_server --bin madcards-server -- --players 2

use madcards_engine::game::GameConfig;
use madcards_engine::logger::GameResult;
use madcards_server::{GameServer, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    madcards_server::init_logging();

    let args: Vec<String> = std::env::args().collect();
    let mut host = DEFAULT_HOST.to_string();
    let mut port = DEFAULT_PORT;
    let mut game = GameConfig::default();
    let mut record: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--help" {
            print_help();
            std::process::exit(0);
        }
        let Some(value) = args.get(i + 1) else {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        };
        match flag {
            "--host" | "-h" => host = value.clone(),
            "--port" | "-p" => port = parse_or_exit(value, "port number"),
            "--players" | "-n" => game.players = parse_or_exit(value, "player count"),
            "--seed" | "-s" => game.seed = Some(parse_or_exit(value, "seed")),
            "--record" | "-r" => record = Some(PathBuf::from(value)),
            _ => {
                eprintln!("Unknown argument: {}", flag);
                print_help();
                std::process::exit(1);
            }
        }
        i += 2;
    }

    let mut config = ServerConfig::new(host, port, game);
    if let Some(path) = record {
        config = config.with_record(path);
    }

    let server = GameServer::new(config)?;
    let mut handle = server.start().await?;
    println!("MadCards server running on {}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::select! {
        finished = handle.wait() => {
            match finished? {
                Some(record) => match record.result {
                    GameResult::Won { winner } => println!("Player {} won the game", winner + 1),
                    GameResult::Abandoned => println!("Game abandoned"),
                },
                None => println!("No game was played"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down server");
            handle.shutdown().await?;
            println!("Server stopped");
        }
    }

    Ok(())
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, what: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid {}: {}", what, value);
        std::process::exit(1);
    })
}

fn print_help() {
    println!("MadCards Game Server");
    println!();
    println!("Usage: madcards-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --host, -h <HOST>       Host to bind to (default: 127.0.0.1)");
    println!("  --port, -p <PORT>       Port to bind to (default: 12345)");
    println!("  --players, -n <N>       Players to wait for, 2-4 (default: 4)");
    println!("  --seed, -s <SEED>       Seed for the deck and chaos draws");
    println!("  --record, -r <FILE>     Append the finished game to a JSONL file");
    println!("  --help                  Show this help message");
}
