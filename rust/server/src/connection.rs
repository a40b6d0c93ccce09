//! Per-connection tasks: one reader and one writer for every seat.

use madcards_engine::transport::InboundAction;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Writes one newline-terminated line and flushes it.
pub async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

/// Forwards every line a player sends, tagged with their seat, until the
/// connection closes or the session stops listening.
pub async fn read_actions<R>(player_id: usize, reader: R, inbound: mpsc::Sender<InboundAction>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let text = line.trim_end_matches('\r');
                debug!(player_id, text, "action received");
                if inbound
                    .send(InboundAction::new(player_id, text))
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Ok(None) => {
                info!(player_id, "player disconnected");
                break;
            }
            Err(err) => {
                warn!(player_id, error = %err, "failed to read from player");
                break;
            }
        }
    }
}

/// Writes queued notices to a player until the session drops the queue,
/// then closes the write side so the client sees end of stream.
pub async fn write_notices<W>(
    player_id: usize,
    mut writer: W,
    mut outbound: mpsc::UnboundedReceiver<String>,
) where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = outbound.recv().await {
        if let Err(err) = write_line(&mut writer, &line).await {
            debug!(player_id, error = %err, "failed to write to player");
            return;
        }
    }
    let _ = writer.shutdown().await;
}
