use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;

/// Madness level at which chaos rules start to fire.
pub const CHAOS_THRESHOLD: u32 = 5;

/// Rules every session starts with.
pub const BASE_RULES: [&str; 2] = [
    "Play a card with the same color or number.",
    "If no valid card, draw from the deck.",
];

/// House rules the madness meter can unleash.
///
/// Chaos rules are announced and listed but never change how a move is
/// validated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaosRule {
    ReverseDirection,
    AllDrawTwo,
    SkipNext,
    ChangeActiveColor,
    DiscardRandomColor,
}

impl ChaosRule {
    pub const ALL: [ChaosRule; 5] = [
        ChaosRule::ReverseDirection,
        ChaosRule::AllDrawTwo,
        ChaosRule::SkipNext,
        ChaosRule::ChangeActiveColor,
        ChaosRule::DiscardRandomColor,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            ChaosRule::ReverseDirection => "Reverse play direction.",
            ChaosRule::AllDrawTwo => "All players draw 2 cards.",
            ChaosRule::SkipNext => "Skip the next player's turn.",
            ChaosRule::ChangeActiveColor => "Change the active color to a random one.",
            ChaosRule::DiscardRandomColor => "Discard all cards of a random color.",
        }
    }
}

impl fmt::Display for ChaosRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// How often chaos fires once the meter has reached the threshold.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaosCadence {
    /// A new rule after every completed turn at or above the threshold
    #[default]
    EveryTurn,
    /// Only the first crossing of the threshold adds a rule
    Once,
}

impl std::str::FromStr for ChaosCadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "every_turn" => Ok(ChaosCadence::EveryTurn),
            "once" => Ok(ChaosCadence::Once),
            other => Err(format!("unknown chaos cadence '{}'", other)),
        }
    }
}

/// Validates a play against the top of the discard pile.
///
/// An empty pile accepts anything; otherwise color or number must match.
///
/// ```
/// use madcards_engine::cards::{Card, Color};
/// use madcards_engine::rules::is_legal_play;
///
/// let top = Card::new(3, Color::Red);
/// assert!(is_legal_play(&Card::new(3, Color::Green), Some(&top)));
/// assert!(!is_legal_play(&Card::new(7, Color::Blue), Some(&top)));
/// assert!(is_legal_play(&Card::new(7, Color::Blue), None));
/// ```
pub fn is_legal_play(card: &Card, top: Option<&Card>) -> bool {
    top.is_none_or(|t| card.matches(t))
}

/// Madness meter and the growing list of active rules.
#[derive(Debug)]
pub struct RuleSet {
    madness_meter: u32,
    active_rules: Vec<&'static str>,
    threshold: u32,
    cadence: ChaosCadence,
    fired: bool,
    rng: ChaCha20Rng,
}

impl RuleSet {
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, CHAOS_THRESHOLD, ChaosCadence::default())
    }

    pub fn with_settings(seed: u64, threshold: u32, cadence: ChaosCadence) -> Self {
        Self {
            madness_meter: 0,
            active_rules: BASE_RULES.to_vec(),
            threshold,
            cadence,
            fired: false,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn madness_meter(&self) -> u32 {
        self.madness_meter
    }

    pub fn active_rules(&self) -> &[&'static str] {
        &self.active_rules
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Records one completed turn.
    pub fn tick(&mut self) {
        self.madness_meter += 1;
    }

    /// Level check against the threshold; stays true once reached.
    pub fn is_chaos_triggered(&self) -> bool {
        self.madness_meter >= self.threshold
    }

    /// Appends a rule drawn uniformly from [`ChaosRule::ALL`].
    pub fn add_chaos_rule(&mut self) -> ChaosRule {
        let rule = ChaosRule::ALL[self.rng.random_range(0..ChaosRule::ALL.len())];
        self.active_rules.push(rule.text());
        self.fired = true;
        rule
    }

    /// Adds a chaos rule if the meter and cadence allow one now.
    pub fn escalate(&mut self) -> Option<ChaosRule> {
        if !self.is_chaos_triggered() {
            return None;
        }
        if self.cadence == ChaosCadence::Once && self.fired {
            return None;
        }
        Some(self.add_chaos_rule())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_base_rules_and_zero_madness() {
        let rules = RuleSet::new(1);
        assert_eq!(rules.madness_meter(), 0);
        assert_eq!(rules.active_rules(), &BASE_RULES);
        assert!(!rules.is_chaos_triggered());
    }

    #[test]
    fn triggers_at_threshold_and_stays_triggered() {
        let mut rules = RuleSet::new(1);
        for _ in 0..4 {
            rules.tick();
            assert!(!rules.is_chaos_triggered());
        }
        rules.tick();
        assert!(rules.is_chaos_triggered());
        rules.tick();
        assert!(rules.is_chaos_triggered());
    }

    #[test]
    fn every_turn_cadence_refires() {
        let mut rules = RuleSet::new(7);
        for _ in 0..5 {
            rules.tick();
        }
        assert!(rules.escalate().is_some());
        rules.tick();
        assert!(rules.escalate().is_some());
        assert_eq!(rules.active_rules().len(), 4);
    }

    #[test]
    fn once_cadence_fires_a_single_time() {
        let mut rules = RuleSet::with_settings(7, CHAOS_THRESHOLD, ChaosCadence::Once);
        for _ in 0..5 {
            rules.tick();
            rules.escalate();
        }
        assert_eq!(rules.active_rules().len(), 3);
        for _ in 0..10 {
            rules.tick();
            assert!(rules.escalate().is_none());
        }
        assert_eq!(rules.active_rules().len(), 3);
    }

    #[test]
    fn chaos_rules_come_from_catalog() {
        let mut rules = RuleSet::new(42);
        let catalog: Vec<&str> = ChaosRule::ALL.iter().map(|r| r.text()).collect();
        for _ in 0..50 {
            let rule = rules.add_chaos_rule();
            assert!(catalog.contains(&rule.text()));
            assert_eq!(rules.active_rules().last(), Some(&rule.text()));
        }
    }

    #[test]
    fn cadence_parses_from_config_text() {
        assert_eq!("every-turn".parse(), Ok(ChaosCadence::EveryTurn));
        assert_eq!("ONCE".parse(), Ok(ChaosCadence::Once));
        assert!("sometimes".parse::<ChaosCadence>().is_err());
    }
}
