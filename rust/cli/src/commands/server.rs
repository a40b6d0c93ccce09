//! Server command handler: hosts one networked game on the local machine.

use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use madcards_engine::logger::GameResult;
use madcards_server::{GameServer, ServerConfig};
use std::io::Write;

/// Runs the TCP server until the game ends or Ctrl+C.
///
/// `config` is the resolved configuration with command-line overrides
/// already applied.
pub fn handle_server_command(
    config: &Config,
    record: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut server_config = ServerConfig::new(config.host.clone(), config.port, config.game());
    if let Some(path) = record {
        server_config = server_config.with_record(path);
    }
    let server = match GameServer::new(server_config) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    madcards_server::init_logging();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(server, config.players, out, err))
}

async fn serve(
    server: GameServer,
    players: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut handle = server.start().await?;
    writeln!(
        out,
        "MadCards server listening on {} (waiting for {} players)",
        handle.address(),
        players
    )?;
    out.flush()?;

    tokio::select! {
        finished = handle.wait() => {
            match finished? {
                Some(record) => match record.result {
                    GameResult::Won { winner } => {
                        writeln!(out, "Game {} won by Player {}", record.game_id, winner + 1)?
                    }
                    GameResult::Abandoned => {
                        ui::display_warning(err, "game abandoned: every player left")?
                    }
                },
                None => writeln!(out, "No game was played")?,
            }
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            handle.shutdown().await?;
            writeln!(out, "Server stopped")?;
            Err(CliError::Interrupted("server stopped by user".into()))
        }
    }
}
