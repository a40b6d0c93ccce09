//! The boundary between a session and whatever carries its messages.
//!
//! A session never touches a socket. It sends typed [`Notice`]s through a
//! [`Transport`] and pulls [`InboundAction`]s from it; the transport decides
//! how notices are rendered (usually their `Display` text, one per line).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{format_cards, Card};
use crate::errors::{GameError, InvalidMoveReason};
use crate::rules::ChaosRule;

/// One line of player input, already attributed to a seat.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InboundAction {
    pub player_id: usize,
    pub text: String,
}

impl InboundAction {
    pub fn new(player_id: usize, text: impl Into<String>) -> Self {
        Self {
            player_id,
            text: text.into(),
        }
    }
}

/// Why a move was turned down. The player keeps the turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Neither `play <index>` nor `draw`
    UnknownAction,
    /// `play` without a usable index, or one the hand doesn't have
    BadCardIndex,
    /// Card matches neither color nor number of the top card
    NoMatch,
    /// `draw` with nothing left to draw
    DeckEmpty,
}

impl Rejection {
    /// Player-facing rejection for an engine error; `None` for errors that
    /// are not reported to the player.
    pub fn from_error(err: &GameError) -> Option<Self> {
        match err {
            GameError::InvalidMove {
                reason: InvalidMoveReason::Malformed,
            } => Some(Rejection::UnknownAction),
            GameError::InvalidMove {
                reason: InvalidMoveReason::BadIndex,
            }
            | GameError::InvalidMove {
                reason: InvalidMoveReason::CardIndexOutOfRange { .. },
            } => Some(Rejection::BadCardIndex),
            GameError::RuleViolation { .. } => Some(Rejection::NoMatch),
            GameError::DeckExhausted => Some(Rejection::DeckEmpty),
            _ => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::UnknownAction => "Invalid action. Try 'play <cardIndex>' or 'draw'.",
            Rejection::BadCardIndex => "Invalid input. Try again.",
            Rejection::NoMatch => "Invalid move! Card must match color or number of the top card.",
            Rejection::DeckEmpty => "Deck is empty. You cannot draw.",
        })
    }
}

/// Everything a session tells its players.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// Sent by the transport as a seat is taken
    Welcome,
    YourTurn {
        top: Option<Card>,
        hand: Vec<Card>,
    },
    Rejected {
        reason: Rejection,
    },
    Drew {
        card: Card,
    },
    Played {
        player_id: usize,
        card: Card,
    },
    ChaosActivated {
        rule: ChaosRule,
    },
    Won {
        player_id: usize,
    },
    GameOver,
}

/// Prefix clients watch for before asking their user for a move.
pub const YOUR_TURN_PREFIX: &str = "Your turn!";

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Welcome => f.write_str("Welcome to MadCards! Waiting for other players..."),
            Notice::YourTurn { top, hand } => {
                let top = top.map_or_else(|| "None".to_string(), |c| c.to_string());
                write!(
                    f,
                    "{} Top card: |{}| Your hand: {}",
                    YOUR_TURN_PREFIX,
                    top,
                    format_cards(hand)
                )
            }
            Notice::Rejected { reason } => write!(f, "{}", reason),
            Notice::Drew { .. } => f.write_str("You drew a card."),
            Notice::Played { player_id, card } => {
                write!(f, "Player {} played: {}", player_id + 1, card)
            }
            Notice::ChaosActivated { rule } => write!(f, "CHAOS RULE ACTIVATED: {}", rule),
            Notice::Won { player_id } => write!(f, "Player {} has won!", player_id + 1),
            Notice::GameOver => f.write_str("Game over!"),
        }
    }
}

/// Delivery and input capabilities a session needs from its host.
///
/// Sends are fire-and-forget. `next_action` blocks until some player sends a
/// line and returns `None` once no more input can ever arrive.
pub trait Transport {
    fn send_to(&mut self, player_id: usize, notice: &Notice);

    fn broadcast_all(&mut self, notice: &Notice);

    fn next_action(&mut self) -> Option<InboundAction>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_to(&mut self, player_id: usize, notice: &Notice) {
        (**self).send_to(player_id, notice)
    }

    fn broadcast_all(&mut self, notice: &Notice) {
        (**self).broadcast_all(notice)
    }

    fn next_action(&mut self) -> Option<InboundAction> {
        (**self).next_action()
    }
}
