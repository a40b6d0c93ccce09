use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum number of seats in a session.
pub const MIN_PLAYERS: usize = 2;
/// Maximum number of seats in a session.
pub const MAX_PLAYERS: usize = 4;

/// An action a player sends on their turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Discard the card at this index of the hand
    Play(usize),
    /// Take the front card of the deck
    Draw,
}

impl PlayerAction {
    /// Parses one trimmed line of player input.
    ///
    /// Only `play <index>` and `draw` are accepted. A `play` whose argument
    /// is missing, negative or non-numeric is a bad index, not an unknown verb.
    ///
    /// ```
    /// use madcards_engine::player::PlayerAction;
    ///
    /// assert_eq!(PlayerAction::parse("play 2"), Ok(PlayerAction::Play(2)));
    /// assert_eq!(PlayerAction::parse("  draw "), Ok(PlayerAction::Draw));
    /// assert!(PlayerAction::parse("play -1").is_err());
    /// assert!(PlayerAction::parse("play").is_err());
    /// assert!(PlayerAction::parse("fold").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["draw"] => Ok(PlayerAction::Draw),
            ["play", index] => index
                .parse::<usize>()
                .map(PlayerAction::Play)
                .map_err(|_| GameError::bad_index()),
            ["play", ..] => Err(GameError::bad_index()),
            _ => Err(GameError::malformed()),
        }
    }
}

impl FromStr for PlayerAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Play(i) => write!(f, "play {}", i),
            PlayerAction::Draw => f.write_str("draw"),
        }
    }
}

/// A seated player. `id` is the connection slot and never changes.
#[derive(Debug, Clone)]
pub struct Player {
    id: usize,
    name: String,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: format!("Player{}", id + 1),
            hand: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards in order of receipt.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    pub(crate) fn take_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;

    #[test]
    fn parse_rejects_extra_tokens_and_case_changes() {
        assert!(PlayerAction::parse("play 1 2").is_err());
        assert!(PlayerAction::parse("play").is_err());
        assert!(PlayerAction::parse("DRAW").is_err());
        assert!(PlayerAction::parse("").is_err());
        assert_eq!("play 0".parse::<PlayerAction>(), Ok(PlayerAction::Play(0)));
    }

    #[test]
    fn bad_play_arguments_are_index_errors() {
        for text in ["play", "play x", "play -1", "play 1 2"] {
            assert_eq!(
                PlayerAction::parse(text),
                Err(GameError::bad_index()),
                "input {:?}",
                text
            );
        }
        assert_eq!(PlayerAction::parse("playx 1"), Err(GameError::malformed()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for action in [PlayerAction::Play(3), PlayerAction::Draw] {
            assert_eq!(PlayerAction::parse(&action.to_string()), Ok(action));
        }
    }

    #[test]
    fn take_card_keeps_receipt_order() {
        let mut p = Player::new(1);
        assert_eq!(p.name(), "Player2");
        p.give_card(Card::new(1, Color::Red));
        p.give_card(Card::new(2, Color::Blue));
        p.give_card(Card::new(3, Color::Green));
        assert_eq!(p.take_card(1), Some(Card::new(2, Color::Blue)));
        assert_eq!(p.take_card(2), None);
        assert_eq!(
            p.hand(),
            &[Card::new(1, Color::Red), Card::new(3, Color::Green)]
        );
    }
}
