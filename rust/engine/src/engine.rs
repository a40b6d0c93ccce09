use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::{GameError, InvalidMoveReason};
use crate::game::{GameConfig, GameSession};
use crate::player::PlayerAction;
use crate::rules::{is_legal_play, ChaosRule};

/// How an accepted move resolved the turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "card", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The card went from the hand onto the discard pile
    Played(Card),
    /// The card came off the deck into the hand
    Drew(Card),
}

impl TurnOutcome {
    pub fn card(&self) -> Card {
        match self {
            TurnOutcome::Played(c) | TurnOutcome::Drew(c) => *c,
        }
    }
}

/// Where the turn state machine currently is.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TurnPhase {
    /// Waiting for the given player to play or draw
    AwaitingMove { player: usize },
    /// The player's move was accepted; the turn has not been advanced yet
    Resolved {
        player: usize,
        outcome: TurnOutcome,
        chaos_checked: bool,
    },
    /// A play emptied the winner's hand
    GameOver { winner: usize },
}

/// Authoritative turn state machine over a [`GameSession`].
///
/// Rejected moves leave the session untouched, so the same player can simply
/// try again. Accepted moves resolve the turn and tick the madness meter;
/// the caller then checks chaos and advances.
///
/// # Examples
///
/// ```
/// use madcards_engine::engine::{Engine, TurnOutcome};
/// use madcards_engine::game::GameConfig;
///
/// let config = GameConfig { seed: Some(12345), ..GameConfig::with_players(2) };
/// let mut engine = Engine::new(&config).expect("valid config");
///
/// match engine.submit_draw(0) {
///     Ok(TurnOutcome::Drew(_)) => {
///         assert_eq!(engine.session().rules().madness_meter(), 1);
///         assert_eq!(engine.advance_turn(), Ok(1));
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub struct Engine {
    session: GameSession,
    phase: TurnPhase,
}

impl Engine {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Ok(Self::from_session(GameSession::new(config)?))
    }

    pub fn from_session(session: GameSession) -> Self {
        let phase = match session.winner() {
            Some(winner) => TurnPhase::GameOver { winner },
            None => TurnPhase::AwaitingMove {
                player: session.current_player(),
            },
        };
        Self { session, phase }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn current_player(&self) -> usize {
        self.session.current_player()
    }

    /// Parses one line of player input and applies it.
    pub fn submit(&mut self, player_id: usize, input: &str) -> Result<TurnOutcome, GameError> {
        self.ensure_can_move(player_id)?;
        let action = PlayerAction::parse(input)?;
        self.submit_action(player_id, action)
    }

    pub fn submit_action(
        &mut self,
        player_id: usize,
        action: PlayerAction,
    ) -> Result<TurnOutcome, GameError> {
        match action {
            PlayerAction::Play(index) => self.submit_play(player_id, index),
            PlayerAction::Draw => self.submit_draw(player_id),
        }
    }

    pub fn submit_play(
        &mut self,
        player_id: usize,
        card_index: usize,
    ) -> Result<TurnOutcome, GameError> {
        self.ensure_can_move(player_id)?;

        let hand = self.session.players()[player_id].hand();
        let out_of_range = GameError::InvalidMove {
            reason: InvalidMoveReason::CardIndexOutOfRange {
                index: card_index,
                hand_size: hand.len(),
            },
        };
        let card = *hand.get(card_index).ok_or_else(|| out_of_range.clone())?;
        match self.session.top_card() {
            Some(&top) if !is_legal_play(&card, Some(&top)) => {
                return Err(GameError::RuleViolation { card, top });
            }
            _ => {}
        }

        let taken = self
            .session
            .player_mut(player_id)
            .take_card(card_index)
            .ok_or(out_of_range)?;
        self.session.push_discard(taken);
        let outcome = TurnOutcome::Played(taken);
        self.resolve(player_id, outcome);

        if self.session.players()[player_id].hand().is_empty() {
            self.session.set_winner(player_id);
            self.phase = TurnPhase::GameOver { winner: player_id };
        }
        Ok(outcome)
    }

    pub fn submit_draw(&mut self, player_id: usize) -> Result<TurnOutcome, GameError> {
        self.ensure_can_move(player_id)?;

        let card = match self.session.deck_mut().draw() {
            Ok(c) => c,
            Err(GameError::EmptyDeck) => return Err(GameError::DeckExhausted),
            Err(e) => return Err(e),
        };
        self.session.player_mut(player_id).give_card(card);
        let outcome = TurnOutcome::Drew(card);
        self.resolve(player_id, outcome);
        Ok(outcome)
    }

    /// True iff the player emptied their hand with a play.
    pub fn check_win(&self, player_id: usize) -> bool {
        matches!(self.phase, TurnPhase::GameOver { winner } if winner == player_id)
            && self
                .session
                .player(player_id)
                .is_some_and(|p| p.hand().is_empty())
    }

    /// Lets the rule set add a chaos rule for the turn just resolved.
    ///
    /// Runs at most once per turn and never after the game is won.
    pub fn escalate_chaos(&mut self) -> Result<Option<ChaosRule>, GameError> {
        match &mut self.phase {
            TurnPhase::Resolved { chaos_checked, .. } => {
                if *chaos_checked {
                    return Ok(None);
                }
                *chaos_checked = true;
                Ok(self.session.rules_mut().escalate())
            }
            TurnPhase::AwaitingMove { .. } => Err(GameError::TurnNotResolved),
            TurnPhase::GameOver { .. } => Err(GameError::GameOver),
        }
    }

    /// Moves to the next seat in round-robin order and returns it.
    pub fn advance_turn(&mut self) -> Result<usize, GameError> {
        match self.phase {
            TurnPhase::Resolved { player, .. } => {
                let next = (player + 1) % self.session.player_count();
                self.session.set_current_player(next);
                self.phase = TurnPhase::AwaitingMove { player: next };
                Ok(next)
            }
            TurnPhase::AwaitingMove { .. } => Err(GameError::TurnNotResolved),
            TurnPhase::GameOver { .. } => Err(GameError::GameOver),
        }
    }

    fn ensure_can_move(&self, player_id: usize) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::GameOver { .. } => Err(GameError::GameOver),
            TurnPhase::AwaitingMove { player } | TurnPhase::Resolved { player, .. }
                if player != player_id =>
            {
                Err(GameError::OutOfTurn {
                    expected: player,
                    actual: player_id,
                })
            }
            TurnPhase::Resolved { .. } => Err(GameError::TurnAlreadyResolved),
            TurnPhase::AwaitingMove { .. } => Ok(()),
        }
    }

    fn resolve(&mut self, player: usize, outcome: TurnOutcome) {
        self.session.rules_mut().tick();
        self.phase = TurnPhase::Resolved {
            player,
            outcome,
            chaos_checked: false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;
    use crate::rules::RuleSet;

    fn engine(hands: Vec<Vec<Card>>, deck: Vec<Card>, discard: Vec<Card>) -> Engine {
        let session = GameSession::from_layout(hands, deck, discard, RuleSet::new(1)).unwrap();
        Engine::from_session(session)
    }

    #[test]
    fn starts_awaiting_player_zero() {
        let e = engine(vec![vec![], vec![]], vec![], vec![]);
        assert_eq!(e.phase(), TurnPhase::AwaitingMove { player: 0 });
    }

    #[test]
    fn resolved_turn_rejects_second_move_until_advanced() {
        let mut e = engine(
            vec![
                vec![Card::new(1, Color::Red), Card::new(2, Color::Red)],
                vec![Card::new(3, Color::Blue)],
            ],
            vec![],
            vec![],
        );
        e.submit_play(0, 0).unwrap();
        assert_eq!(e.submit_play(0, 0), Err(GameError::TurnAlreadyResolved));
        assert!(matches!(
            e.submit_draw(1),
            Err(GameError::OutOfTurn {
                expected: 0,
                actual: 1
            })
        ));
        assert_eq!(e.advance_turn(), Ok(1));
        assert_eq!(e.advance_turn(), Err(GameError::TurnNotResolved));
    }

    #[test]
    fn out_of_turn_wins_over_malformed_text() {
        let mut e = engine(vec![vec![], vec![]], vec![], vec![]);
        assert!(matches!(
            e.submit(1, "nonsense"),
            Err(GameError::OutOfTurn { .. })
        ));
        assert!(matches!(
            e.submit(0, "nonsense"),
            Err(GameError::InvalidMove {
                reason: InvalidMoveReason::Malformed
            })
        ));
    }

    #[test]
    fn chaos_checked_once_per_turn() {
        let mut e = engine(
            vec![vec![Card::new(1, Color::Red)], vec![Card::new(2, Color::Red)]],
            vec![Card::new(5, Color::Green); 10],
            vec![],
        );
        assert_eq!(e.escalate_chaos(), Err(GameError::TurnNotResolved));
        for turn in 0..6 {
            let player = e.current_player();
            e.submit_draw(player).unwrap();
            let fired = e.escalate_chaos().unwrap();
            assert_eq!(fired.is_some(), turn >= 4, "turn {}", turn);
            assert_eq!(e.escalate_chaos(), Ok(None));
            e.advance_turn().unwrap();
        }
    }

    #[test]
    fn winning_play_ends_game() {
        let mut e = engine(
            vec![vec![Card::new(4, Color::Blue)], vec![Card::new(2, Color::Red)]],
            vec![],
            vec![Card::new(4, Color::Green)],
        );
        assert_eq!(
            e.submit_play(0, 0),
            Ok(TurnOutcome::Played(Card::new(4, Color::Blue)))
        );
        assert!(e.check_win(0));
        assert!(!e.check_win(1));
        assert_eq!(e.phase(), TurnPhase::GameOver { winner: 0 });
        assert_eq!(e.session().winner(), Some(0));
        assert_eq!(e.advance_turn(), Err(GameError::GameOver));
        assert_eq!(e.escalate_chaos(), Err(GameError::GameOver));
        assert_eq!(e.submit_draw(1), Err(GameError::GameOver));
    }
}
