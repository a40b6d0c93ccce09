//! Client command handler: a line-based terminal front end for one seat.
//!
//! Every line from the server is echoed as `Server: <line>`. When the server
//! says it is our turn, the user is prompted and their reply is sent back
//! verbatim; the server decides whether it is a legal move.

use crate::error::CliError;
use crate::io_utils::{read_server_line, read_stdin_line};
use crate::ui;
use madcards_engine::transport::YOUR_TURN_PREFIX;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

pub const MOVE_PROMPT: &str = "Enter your move (e.g., play <cardIndex> or draw): ";

/// How a client session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientExit {
    /// The server closed the connection
    ServerClosed,
    /// Stdin ran out while a move was expected
    InputClosed,
}

/// Relays server lines to `out` and the user's moves to the server.
///
/// # Example
///
/// ```
/// use madcards_cli::commands::client::{run_client, ClientExit};
/// use std::io::Cursor;
///
/// let mut server = Cursor::new("Your turn! Top card: |None| Your hand: []\nGame over!\n");
/// let mut to_server = Vec::new();
/// let mut stdin = Cursor::new("draw\n");
/// let mut out = Vec::new();
///
/// let exit = run_client(&mut server, &mut to_server, &mut stdin, &mut out).unwrap();
/// assert_eq!(exit, ClientExit::ServerClosed);
/// assert_eq!(to_server, b"draw\n");
/// ```
pub fn run_client(
    server: &mut dyn BufRead,
    to_server: &mut dyn Write,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<ClientExit, CliError> {
    while let Some(line) = read_server_line(server)? {
        writeln!(out, "Server: {}", line)?;
        if !line.starts_with(YOUR_TURN_PREFIX) {
            continue;
        }

        write!(out, "{}", MOVE_PROMPT)?;
        out.flush()?;
        let Some(action) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(ClientExit::InputClosed);
        };
        writeln!(to_server, "{}", action)?;
        to_server.flush()?;
    }
    Ok(ClientExit::ServerClosed)
}

pub fn handle_client_command(
    host: &str,
    port: u16,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let stream = match TcpStream::connect((host, port)) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &format!("Could not connect to {}:{}: {}", host, port, e))?;
            return Err(CliError::Io(e));
        }
    };
    writeln!(out, "Connected to MadCards server at {}:{}", host, port)?;

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    match run_client(&mut reader, &mut writer, stdin, out)? {
        ClientExit::ServerClosed => writeln!(out, "Disconnected from server.")?,
        ClientExit::InputClosed => writeln!(out, "Input closed; leaving the game.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn non_turn_lines_are_echoed_without_prompting() {
        let mut server = Cursor::new(
            "Welcome to MadCards! Waiting for other players...\nPlayer 2 played: Card3 (RED)\n",
        );
        let mut to_server = Vec::new();
        let mut stdin = Cursor::new("");
        let mut out = Vec::new();

        let exit = run_client(&mut server, &mut to_server, &mut stdin, &mut out).unwrap();

        assert_eq!(exit, ClientExit::ServerClosed);
        assert!(to_server.is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                "Server: Welcome to MadCards! Waiting for other players...\n",
                "Server: Player 2 played: Card3 (RED)\n",
            )
        );
    }

    #[test]
    fn eof_on_stdin_leaves_at_the_prompt() {
        let mut server = Cursor::new("Your turn! Top card: |None| Your hand: [Card1 (BLUE)]\n");
        let mut to_server = Vec::new();
        let mut stdin = Cursor::new("");
        let mut out = Vec::new();

        let exit = run_client(&mut server, &mut to_server, &mut stdin, &mut out).unwrap();

        assert_eq!(exit, ClientExit::InputClosed);
        assert!(String::from_utf8(out).unwrap().contains(MOVE_PROMPT));
    }

    #[test]
    fn connection_refused_is_reported() {
        let port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new("");

        let result = handle_client_command("127.0.0.1", port, &mut out, &mut err, &mut stdin);

        assert!(matches!(result, Err(CliError::Io(_))));
        assert!(String::from_utf8(err).unwrap().starts_with("Error: Could not connect"));
    }
}
