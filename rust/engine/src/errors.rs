use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move: {reason}")]
    InvalidMove { reason: InvalidMoveReason },
    #[error("{card} does not match color or number of {top}")]
    RuleViolation { card: Card, top: Card },
    #[error("Deck is exhausted")]
    DeckExhausted,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    OutOfTurn { expected: usize, actual: usize },
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("Player count {count} outside {min}..={max}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
    #[error("Not enough cards to deal: need {needed}, deck has {available}")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Turn has not been resolved yet")]
    TurnNotResolved,
    #[error("Turn already resolved, advance before accepting another move")]
    TurnAlreadyResolved,
    #[error("Game is over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// Text was neither `play <index>` nor `draw`
    Malformed,
    /// `play` without a single non-negative index after it
    BadIndex,
    /// Index does not name a card in the hand
    CardIndexOutOfRange { index: usize, hand_size: usize },
}

impl std::fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMoveReason::Malformed => f.write_str("expected 'play <index>' or 'draw'"),
            InvalidMoveReason::BadIndex => f.write_str("'play' needs one card index"),
            InvalidMoveReason::CardIndexOutOfRange { index, hand_size } => {
                write!(f, "card index {} out of range for hand of {}", index, hand_size)
            }
        }
    }
}

impl GameError {
    pub fn malformed() -> Self {
        GameError::InvalidMove {
            reason: InvalidMoveReason::Malformed,
        }
    }

    pub fn bad_index() -> Self {
        GameError::InvalidMove {
            reason: InvalidMoveReason::BadIndex,
        }
    }

    /// Rejections a player can recover from by sending another action.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidMove { .. }
                | GameError::RuleViolation { .. }
                | GameError::DeckExhausted
                | GameError::OutOfTurn { .. }
        )
    }
}
