use chrono::Utc;
use tracing::{debug, info, warn};

use crate::engine::{Engine, TurnOutcome};
use crate::errors::GameError;
use crate::game::{GameConfig, GameSession};
use crate::logger::{format_game_id, GameRecord, GameResult, TurnRecord};
use crate::rules::ChaosRule;
use crate::transport::{Notice, Rejection, Transport};

/// Drives one game from the first prompt to the game-over notice.
///
/// The coordinator is the only caller of the turn engine. It prompts the
/// current player, feeds inbound lines to the engine until one resolves the
/// turn, announces what happened, lets chaos escalate and advances.
///
/// # Examples
///
/// ```
/// use madcards_engine::game::GameConfig;
/// use madcards_engine::logger::GameResult;
/// use madcards_engine::session::SessionCoordinator;
/// use madcards_engine::transport::{InboundAction, Notice, Transport};
///
/// // A transport whose players never say anything.
/// struct Silent;
///
/// impl Transport for Silent {
///     fn send_to(&mut self, _: usize, _: &Notice) {}
///     fn broadcast_all(&mut self, _: &Notice) {}
///     fn next_action(&mut self) -> Option<InboundAction> {
///         None
///     }
/// }
///
/// let config = GameConfig { seed: Some(1), ..GameConfig::with_players(2) };
/// let mut coordinator = SessionCoordinator::new(&config, Silent).unwrap();
/// let record = coordinator.run().unwrap();
/// assert_eq!(record.result, GameResult::Abandoned);
/// ```
pub struct SessionCoordinator<T: Transport> {
    engine: Engine,
    transport: T,
    game_id: String,
    turns: Vec<TurnRecord>,
}

impl<T: Transport> SessionCoordinator<T> {
    pub fn new(config: &GameConfig, transport: T) -> Result<Self, GameError> {
        Ok(Self::from_engine(Engine::new(config)?, transport))
    }

    pub fn from_engine(engine: Engine, transport: T) -> Self {
        let date = Utc::now().format("%Y%m%d").to_string();
        Self {
            engine,
            transport,
            game_id: format_game_id(&date, 1),
            turns: Vec::new(),
        }
    }

    pub fn with_game_id(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = game_id.into();
        self
    }

    pub fn session(&self) -> &GameSession {
        self.engine.session()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Plays the game until someone wins or the transport runs dry.
    pub fn run(&mut self) -> Result<GameRecord, GameError> {
        if self.engine.session().is_over() {
            return Err(GameError::GameOver);
        }

        let session = self.engine.session();
        info!(
            game_id = %self.game_id,
            players = session.player_count(),
            seed = ?session.seed(),
            deck = session.deck().remaining(),
            "game started"
        );
        debug!(rules = ?session.rules().active_rules(), "current rules");

        let result = loop {
            let player = self.engine.current_player();
            let Some(outcome) = self.take_turn(player)? else {
                warn!(game_id = %self.game_id, player_id = player, "input closed mid-game");
                break GameResult::Abandoned;
            };

            match outcome {
                TurnOutcome::Played(card) => {
                    info!(player_id = player, %card, "card played");
                    self.transport
                        .broadcast_all(&Notice::Played { player_id: player, card });
                }
                TurnOutcome::Drew(card) => {
                    debug!(player_id = player, %card, "card drawn");
                    self.transport.send_to(player, &Notice::Drew { card });
                }
            }

            let madness = self.engine.session().rules().madness_meter();
            if self.engine.check_win(player) {
                self.record_turn(player, outcome, madness, None);
                info!(player_id = player, turns = madness, "player won");
                self.transport
                    .broadcast_all(&Notice::Won { player_id: player });
                break GameResult::Won { winner: player };
            }

            let chaos = self.engine.escalate_chaos()?;
            if let Some(rule) = chaos {
                info!(madness, %rule, "chaos rule activated");
                self.transport
                    .broadcast_all(&Notice::ChaosActivated { rule });
            }
            self.record_turn(player, outcome, madness, chaos);
            debug!(rules = ?self.engine.session().rules().active_rules(), "current rules");

            self.engine.advance_turn()?;
        };

        self.transport.broadcast_all(&Notice::GameOver);
        info!(game_id = %self.game_id, ?result, "game over");
        Ok(self.record(result))
    }

    /// Prompts `player` and consumes input until the engine accepts a move.
    /// `None` means the transport closed first.
    fn take_turn(&mut self, player: usize) -> Result<Option<TurnOutcome>, GameError> {
        self.prompt(player);
        loop {
            let Some(action) = self.transport.next_action() else {
                return Ok(None);
            };
            match self.engine.submit(action.player_id, &action.text) {
                Ok(outcome) => return Ok(Some(outcome)),
                Err(err @ GameError::OutOfTurn { .. }) => {
                    debug!(
                        player_id = action.player_id,
                        error = %err,
                        "dropping out-of-turn action"
                    );
                }
                Err(err) => match Rejection::from_error(&err) {
                    Some(reason) => {
                        debug!(player_id = player, error = %err, "move rejected");
                        self.transport
                            .send_to(player, &Notice::Rejected { reason });
                        self.prompt(player);
                    }
                    None => return Err(err),
                },
            }
        }
    }

    fn prompt(&mut self, player: usize) {
        let session = self.engine.session();
        let notice = Notice::YourTurn {
            top: session.top_card().copied(),
            hand: session.players()[player].hand().to_vec(),
        };
        self.transport.send_to(player, &notice);
    }

    fn record_turn(
        &mut self,
        player_id: usize,
        outcome: TurnOutcome,
        madness: u32,
        chaos: Option<ChaosRule>,
    ) {
        self.turns.push(TurnRecord {
            turn: self.turns.len() as u32 + 1,
            player_id,
            outcome,
            madness,
            chaos,
        });
    }

    fn record(&self, result: GameResult) -> GameRecord {
        let session = self.engine.session();
        GameRecord {
            game_id: self.game_id.clone(),
            seed: session.seed(),
            players: session.player_count(),
            turns: self.turns.clone(),
            active_rules: session
                .rules()
                .active_rules()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            result,
            ts: None,
            meta: None,
        }
    }
}
