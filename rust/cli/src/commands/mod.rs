//! Command handler modules for the MadCards CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: all errors propagated via the `CliError` enum

pub mod cfg;
pub mod client;
pub mod server;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use client::{handle_client_command, run_client};
pub use server::handle_server_command;
pub use sim::{handle_sim_command, LocalTransport};
