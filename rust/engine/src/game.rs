use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::{Deck, CARDS_PER_COLOR};
use crate::errors::GameError;
use crate::player::{Player, MAX_PLAYERS, MIN_PLAYERS};
use crate::rules::{ChaosCadence, RuleSet, CHAOS_THRESHOLD};

/// Cards dealt to each player at session start.
pub const HAND_SIZE: usize = 5;

// Keeps the chaos draws independent of the deck order for the same seed.
const RULES_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: usize,
    pub hand_size: usize,
    pub cards_per_color: u32,
    pub seed: Option<u64>,
    pub chaos_threshold: u32,
    pub chaos_cadence: ChaosCadence,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: MAX_PLAYERS,
            hand_size: HAND_SIZE,
            cards_per_color: CARDS_PER_COLOR,
            seed: None,
            chaos_threshold: CHAOS_THRESHOLD,
            chaos_cadence: ChaosCadence::EveryTurn,
        }
    }
}

impl GameConfig {
    pub fn with_players(players: usize) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(GameError::InvalidPlayerCount {
                count: self.players,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand_size must be >0".into()));
        }
        if self.chaos_threshold == 0 {
            return Err(GameError::InvalidConfig(
                "chaos_threshold must be >0".into(),
            ));
        }
        let available = 4 * self.cards_per_color as usize;
        let needed = self
            .players
            .checked_mul(self.hand_size)
            .ok_or_else(|| GameError::InvalidConfig("hand_size is too large".into()))?;
        if needed > available {
            return Err(GameError::NotEnoughCards { needed, available });
        }
        Ok(())
    }
}

/// Everything one game owns: seats, draw pile, discard pile, rules and turn.
///
/// Only the turn engine mutates a session; everyone else reads it.
#[derive(Debug)]
pub struct GameSession {
    players: Vec<Player>,
    deck: Deck,
    discard: Vec<Card>,
    rules: RuleSet,
    current_player: usize,
    winner: Option<usize>,
    seed: Option<u64>,
    total_cards: usize,
}

impl GameSession {
    /// Builds and shuffles the deck, seats the players and deals their hands.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut deck = Deck::new_with_seed(seed, config.cards_per_color);
        deck.shuffle();

        let mut players: Vec<Player> = (0..config.players).map(Player::new).collect();
        for p in &mut players {
            for _ in 0..config.hand_size {
                p.give_card(deck.draw()?);
            }
        }

        let rules = RuleSet::with_settings(
            seed ^ RULES_SEED_SALT,
            config.chaos_threshold,
            config.chaos_cadence,
        );
        Ok(Self::assemble(players, deck, Vec::new(), rules, Some(seed)))
    }

    /// A session with a fixed layout: hands per seat, deck front first, and
    /// an existing discard pile.
    pub fn from_layout(
        hands: Vec<Vec<Card>>,
        deck: Vec<Card>,
        discard: Vec<Card>,
        rules: RuleSet,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&hands.len()) {
            return Err(GameError::InvalidPlayerCount {
                count: hands.len(),
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        let players = hands
            .into_iter()
            .enumerate()
            .map(|(id, hand)| {
                let mut p = Player::new(id);
                hand.into_iter().for_each(|c| p.give_card(c));
                p
            })
            .collect();
        Ok(Self::assemble(
            players,
            Deck::from_cards(deck),
            discard,
            rules,
            None,
        ))
    }

    fn assemble(
        players: Vec<Player>,
        deck: Deck,
        discard: Vec<Card>,
        rules: RuleSet,
        seed: Option<u64>,
    ) -> Self {
        let mut gs = Self {
            players,
            deck,
            discard,
            rules,
            current_player: 0,
            winner: None,
            seed,
            total_cards: 0,
        };
        gs.total_cards = gs.card_count();
        gs
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: usize) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Cards across deck, discard pile and every hand.
    pub fn card_count(&self) -> usize {
        self.deck.remaining()
            + self.discard.len()
            + self.players.iter().map(|p| p.hand().len()).sum::<usize>()
    }

    /// Card count fixed when the session was built.
    pub fn initial_card_count(&self) -> usize {
        self.total_cards
    }

    pub(crate) fn player_mut(&mut self, id: usize) -> &mut Player {
        &mut self.players[id]
    }

    pub(crate) fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub(crate) fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    pub(crate) fn push_discard(&mut self, c: Card) {
        self.discard.push(c);
    }

    pub(crate) fn set_current_player(&mut self, idx: usize) {
        debug_assert!(idx < self.players.len());
        self.current_player = idx;
    }

    pub(crate) fn set_winner(&mut self, id: usize) {
        self.winner = Some(id);
    }
}
