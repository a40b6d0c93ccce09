use std::collections::HashMap;

use madcards_engine::cards::{all_colors, Card, Color};
use madcards_engine::deck::{Deck, CARDS_PER_COLOR};
use madcards_engine::errors::GameError;

fn drain(deck: &mut Deck) -> Vec<Card> {
    std::iter::from_fn(|| deck.draw().ok()).collect()
}

#[test]
fn new_deck_has_count_per_color_for_each_color() {
    let mut deck = Deck::new(&[Color::Red, Color::Blue], 3);
    assert_eq!(deck.remaining(), 6);
    let cards = drain(&mut deck);
    assert_eq!(
        cards,
        vec![
            Card::new(0, Color::Red),
            Card::new(1, Color::Red),
            Card::new(2, Color::Red),
            Card::new(0, Color::Blue),
            Card::new(1, Color::Blue),
            Card::new(2, Color::Blue),
        ]
    );
}

#[test]
fn shuffle_is_a_permutation() {
    let mut deck = Deck::new_with_seed(5, CARDS_PER_COLOR);
    deck.shuffle();
    let mut counts: HashMap<Card, usize> = HashMap::new();
    for c in drain(&mut deck) {
        *counts.entry(c).or_default() += 1;
    }
    assert_eq!(counts.len(), 40);
    assert!(counts.values().all(|&n| n == 1));
    for color in all_colors() {
        for n in 0..CARDS_PER_COLOR {
            assert!(counts.contains_key(&Card::new(n, color)));
        }
    }
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345, CARDS_PER_COLOR);
    let mut d2 = Deck::new_with_seed(12345, CARDS_PER_COLOR);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(drain(&mut d1), drain(&mut d2), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1, CARDS_PER_COLOR);
    let mut d2 = Deck::new_with_seed(2, CARDS_PER_COLOR);
    d1.shuffle();
    d2.shuffle();
    assert_ne!(
        drain(&mut d1),
        drain(&mut d2),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn empty_deck_draw_fails() {
    let mut deck = Deck::from_cards(vec![]);
    assert_eq!(deck.draw(), Err(GameError::EmptyDeck));
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn duplicates_may_coexist() {
    let dup = Card::new(2, Color::Yellow);
    let mut deck = Deck::from_cards(vec![dup, dup]);
    assert_eq!(deck.draw(), Ok(dup));
    assert_eq!(deck.draw(), Ok(dup));
}
