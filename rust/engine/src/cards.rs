use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four card colors.
/// Together with a number it fully identifies a [`Card`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    /// Blue cards
    Blue,
    /// Red cards
    Red,
    /// Green cards
    Green,
    /// Yellow cards
    Yellow,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "BLUE",
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single playing card: a number and a color.
/// Identity is structural, so two cards with the same number and color are
/// interchangeable even when both are in play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// Face number, `0..cards_per_color`
    pub number: u32,
    /// Card color
    pub color: Color,
}

impl Card {
    pub fn new(number: u32, color: Color) -> Self {
        Self { number, color }
    }

    /// A card may be played on `top` when either dimension matches.
    pub fn matches(&self, top: &Card) -> bool {
        self.color == top.color || self.number == top.number
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card{} ({})", self.number, self.color)
    }
}

pub fn all_colors() -> [Color; 4] {
    [Color::Blue, Color::Red, Color::Green, Color::Yellow]
}

/// Cards in unshuffled order: every number of the first color, then the next.
pub fn ordered_cards(colors: &[Color], count_per_color: u32) -> Vec<Card> {
    let mut v = Vec::with_capacity(colors.len() * count_per_color as usize);
    for &c in colors {
        for n in 0..count_per_color {
            v.push(Card::new(n, c));
        }
    }
    v
}

/// Renders a hand the way players see it: `[Card1 (RED), Card7 (BLUE)]`.
pub fn format_cards(cards: &[Card]) -> String {
    let parts: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
