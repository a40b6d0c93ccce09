//! # MadCards CLI Library
//!
//! This library provides the command-line interface for MadCards, a
//! turn-based card game whose rules grow stranger the longer it runs.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["madcards", "sim", "--players", "3", "--games", "100"];
//! let code = madcards_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `server`: Host one networked game
//! - `client`: Join a game from the terminal
//! - `sim`: Play bot-only games and summarize them
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod ui;

use cli::{Commands, MadcardsCli};
use commands::{
    handle_cfg_command, handle_client_command, handle_server_command, handle_sim_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand
/// handler. Configuration is resolved first (defaults, `MADCARDS_CONFIG`
/// file, `MADCARDS_*` environment) and command-line flags override it.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["madcards", "sim", "--players", "2", "--seed", "42"];
/// let code = madcards_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match MadcardsCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Server {
            host,
            port,
            players,
            seed,
            record,
        } => resolve_config(err).and_then(|mut cfg| {
            apply_overrides(&mut cfg, host, port, players, seed);
            handle_server_command(&cfg, record, out, err)
        }),
        Commands::Client { host, port } => resolve_config(err).and_then(|mut cfg| {
            apply_overrides(&mut cfg, host, port, None, None);
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_client_command(&cfg.host, cfg.port, out, err, &mut stdin_lock)
        }),
        Commands::Sim {
            players,
            seed,
            games,
            output,
            bot,
        } => resolve_config(err).and_then(|mut cfg| {
            apply_overrides(&mut cfg, None, None, players, seed);
            handle_sim_command(&cfg, games, output, &bot, out, err)
        }),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        // cfg reports its own configuration errors
        Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "MadCards CLI").is_err()
                || writeln!(err, "Usage: madcards <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in Commands::NAMES {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            let _ = writeln!(err, "\nFor full help, run: madcards --help");
            exit_code::ERROR
        }
    }
}

fn resolve_config(err: &mut dyn Write) -> Result<config::Config, CliError> {
    config::load().or_else(|e| {
        ui::write_error(err, &format!("Invalid configuration: {}", e))?;
        Err(CliError::Config(e.to_string()))
    })
}

fn apply_overrides(
    cfg: &mut config::Config,
    host: Option<String>,
    port: Option<u16>,
    players: Option<u8>,
    seed: Option<u64>,
) {
    if let Some(h) = host {
        cfg.host = h;
    }
    if let Some(p) = port {
        cfg.port = p;
    }
    if let Some(n) = players {
        cfg.players = n as usize;
    }
    if let Some(s) = seed {
        cfg.seed = Some(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand() {
        let commands = vec![
            vec!["madcards", "cfg"],
            vec!["madcards", "server", "--port", "0", "--players", "2"],
            vec!["madcards", "client", "--host", "localhost", "--port", "4000"],
            vec!["madcards", "sim", "--games", "3", "--bot", "random"],
        ];
        for cmd_args in commands {
            let result = MadcardsCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn player_count_is_range_checked() {
        assert!(MadcardsCli::try_parse_from(["madcards", "sim", "--players", "1"]).is_err());
        assert!(MadcardsCli::try_parse_from(["madcards", "sim", "--players", "5"]).is_err());
        assert!(MadcardsCli::try_parse_from(["madcards", "server", "--players", "4"]).is_ok());
    }

    #[test]
    fn flags_override_resolved_config() {
        let mut cfg = config::Config::default();
        apply_overrides(&mut cfg, Some("0.0.0.0".into()), None, Some(3), Some(11));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 12345);
        assert_eq!(cfg.players, 3);
        assert_eq!(cfg.seed, Some(11));
    }

    #[test]
    fn unknown_command_lists_available_ones() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["madcards", "deal"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.contains("Commands:"));
        assert!(stderr.contains("  sim"));
    }
}
