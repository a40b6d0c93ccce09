//! Command-line surface of the `madcards` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "madcards",
    version,
    about = "MadCards: match the top card by color or number while the rules go mad"
)]
pub struct MadcardsCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Host one networked game and wait for players to connect
    Server {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=4))]
        players: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        /// Append the finished game to this JSONL file
        #[arg(long)]
        record: Option<String>,
    },
    /// Join a game as a human player
    Client {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Play bot-only games in-process and summarize the results
    Sim {
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=4))]
        players: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: u64,
        /// Write one game record per line to this file
        #[arg(long)]
        output: Option<String>,
        /// Bot kind for every seat (baseline, random)
        #[arg(long, default_value = "baseline")]
        bot: String,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: [&'static str; 4] = ["server", "client", "sim", "cfg"];
}
