//! Simple bots used for simulations and as reference opponents.

use crate::{Bot, legal_plays};
use madcards_engine::cards::Card;
use madcards_engine::player::PlayerAction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic bot: plays when it can, draws when it can't.
///
/// Among legal cards it prefers one of the color it holds most of, so the
/// rest of its hand stays playable; ties go to the earliest card.
#[derive(Debug, Clone, Default)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    fn color_weight(hand: &[Card], card: &Card) -> usize {
        hand.iter().filter(|c| c.color == card.color).count()
    }
}

impl Bot for BaselineBot {
    fn choose_action(&mut self, top: Option<&Card>, hand: &[Card]) -> PlayerAction {
        legal_plays(top, hand)
            .into_iter()
            .rev()
            .max_by_key(|&i| Self::color_weight(hand, &hand[i]))
            .map_or(PlayerAction::Draw, PlayerAction::Play)
    }

    fn name(&self) -> &str {
        "BaselineBot"
    }
}

/// Picks uniformly among legal plays, drawing only when none exist.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn choose_action(&mut self, top: Option<&Card>, hand: &[Card]) -> PlayerAction {
        let legal = legal_plays(top, hand);
        if legal.is_empty() {
            return PlayerAction::Draw;
        }
        PlayerAction::Play(legal[self.rng.random_range(0..legal.len())])
    }

    fn name(&self) -> &str {
        "RandomBot"
    }
}
