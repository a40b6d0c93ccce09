//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (default, configuration file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "host": {
//!     "value": "127.0.0.1",
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "host": {
            "value": config.host,
            "source": sources.host,
        },
        "port": {
            "value": config.port,
            "source": sources.port,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "chaos_cadence": {
            "value": config.chaos_cadence,
            "source": sources.chaos_cadence,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
