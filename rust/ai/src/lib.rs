//! # madcards-ai: Bot Players for MadCards
//!
//! Bots answer the same "your turn" information a human client sees: the top
//! of the discard pile and their own hand. They are used by simulations and
//! tests to fill seats without a network.
//!
//! ## Quick Start
//!
//! ```rust
//! use madcards_ai::{Bot, create_bot};
//! use madcards_engine::cards::{Card, Color};
//! use madcards_engine::player::PlayerAction;
//!
//! let mut bot = create_bot("baseline", 7).expect("known bot");
//! let hand = [Card::new(4, Color::Blue), Card::new(9, Color::Red)];
//! let action = bot.choose_action(Some(&Card::new(9, Color::Green)), &hand);
//! assert_eq!(action, PlayerAction::Play(1));
//! ```

use madcards_engine::cards::Card;
use madcards_engine::player::PlayerAction;
use madcards_engine::rules::is_legal_play;

pub mod baseline;

pub use baseline::{BaselineBot, RandomBot};

/// Bot kinds accepted by [`create_bot`].
pub const BOT_KINDS: [&str; 2] = ["baseline", "random"];

/// A player that decides moves without a human.
pub trait Bot: Send {
    /// Picks a move given the top card and the bot's hand.
    fn choose_action(&mut self, top: Option<&Card>, hand: &[Card]) -> PlayerAction;

    fn name(&self) -> &str;
}

/// Indices of the cards in `hand` that may be played on `top`.
pub fn legal_plays(top: Option<&Card>, hand: &[Card]) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, c)| is_legal_play(c, top))
        .map(|(i, _)| i)
        .collect()
}

/// Builds a bot by kind name. `seed` only matters for randomized bots.
///
/// ```rust
/// use madcards_ai::create_bot;
///
/// assert_eq!(create_bot("baseline", 0).unwrap().name(), "BaselineBot");
/// assert!(create_bot("genius", 0).is_err());
/// ```
pub fn create_bot(kind: &str, seed: u64) -> Result<Box<dyn Bot>, String> {
    match kind {
        "baseline" => Ok(Box::new(BaselineBot::new())),
        "random" => Ok(Box::new(RandomBot::new(seed))),
        other => Err(format!(
            "Unknown bot type: {} (expected one of {})",
            other,
            BOT_KINDS.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use madcards_engine::cards::Color;

    #[test]
    fn legal_plays_on_empty_pile_is_whole_hand() {
        let hand = [Card::new(1, Color::Red), Card::new(2, Color::Blue)];
        assert_eq!(legal_plays(None, &hand), vec![0, 1]);
    }

    #[test]
    fn legal_plays_filters_by_color_or_number() {
        let hand = [
            Card::new(1, Color::Red),
            Card::new(2, Color::Blue),
            Card::new(7, Color::Green),
        ];
        let top = Card::new(2, Color::Red);
        assert_eq!(legal_plays(Some(&top), &hand), vec![0, 1]);
    }

    #[test]
    fn every_listed_kind_can_be_created() {
        for kind in BOT_KINDS {
            assert!(create_bot(kind, 1).is_ok(), "{}", kind);
        }
    }
}
