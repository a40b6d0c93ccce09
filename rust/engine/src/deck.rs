use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{all_colors, ordered_cards, Card, Color};
use crate::errors::GameError;

/// Default number of cards per color in a standard deck.
pub const CARDS_PER_COLOR: u32 = 10;

/// The session's draw pile. Cards leave only from the front.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new(colors: &[Color], count_per_color: u32) -> Self {
        Self::from_parts(ordered_cards(colors, count_per_color), rand::random())
    }

    /// Standard four-color deck whose shuffles are reproducible from `seed`.
    pub fn new_with_seed(seed: u64, count_per_color: u32) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self::from_parts(ordered_cards(&all_colors(), count_per_color), seed)
    }

    /// A deck in exactly the given order, front first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self::from_parts(cards, 0)
    }

    fn from_parts(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Shuffles the cards that have not been drawn yet.
    pub fn shuffle(&mut self) {
        self.cards[self.position..].shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = *self.cards.get(self.position).ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Cards still in the pile, front first.
    pub fn cards(&self) -> &[Card] {
        &self.cards[self.position..]
    }
}
