use madcards_engine::transport::{InboundAction, Notice, Transport};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Outbound lines for one seat, drained by that connection's writer task.
pub type SeatSender = mpsc::UnboundedSender<String>;

/// Bridges a blocking session to the async connection tasks.
///
/// Each seat has its own outbound queue so a slow client never holds up the
/// others. Every reader feeds the same inbound queue; order of arrival is
/// the order the session sees. Must be driven from a blocking thread because
/// `next_action` parks on the inbound queue.
pub struct ChannelTransport {
    seats: Vec<SeatSender>,
    inbound: mpsc::Receiver<InboundAction>,
}

impl ChannelTransport {
    pub fn new(seats: Vec<SeatSender>, inbound: mpsc::Receiver<InboundAction>) -> Self {
        Self { seats, inbound }
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    fn deliver(&self, player_id: usize, line: String) {
        match self.seats.get(player_id) {
            Some(seat) => {
                if seat.send(line).is_err() {
                    debug!(player_id, "seat closed; notice dropped");
                }
            }
            None => warn!(player_id, "notice addressed to unknown seat"),
        }
    }
}

impl Transport for ChannelTransport {
    fn send_to(&mut self, player_id: usize, notice: &Notice) {
        self.deliver(player_id, notice.to_string());
    }

    fn broadcast_all(&mut self, notice: &Notice) {
        let line = notice.to_string();
        for player_id in 0..self.seats.len() {
            self.deliver(player_id, line.clone());
        }
    }

    fn next_action(&mut self) -> Option<InboundAction> {
        self.inbound.blocking_recv()
    }
}
