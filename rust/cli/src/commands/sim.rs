//! Simulation command handler: bot-only games played in-process.
//!
//! Each game runs through the same [`SessionCoordinator`] as a networked
//! game. Seats are filled by bots behind a [`LocalTransport`], which answers
//! every "your turn" notice with the seat's bot move.
//!
//! A game can jam: once the deck is empty, a player with no legal card has
//! no move the engine accepts. Such games end as abandoned and are counted
//! as stalemates.
//!
//! # Environment Variables
//!
//! - `MADCARDS_SIM_BREAK_AFTER`: stop after N games as if interrupted (for testing)

use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use madcards_ai::{create_bot, legal_plays, Bot};
use madcards_engine::logger::{GameLogger, GameRecord, GameResult};
use madcards_engine::session::SessionCoordinator;
use madcards_engine::transport::{InboundAction, Notice, Rejection, Transport};
use std::collections::VecDeque;
use std::io::Write;

/// Upper bound on inbound actions per game.
pub const MAX_ACTIONS_PER_GAME: usize = 10_000;

/// In-memory transport that lets bots answer their own prompts.
pub struct LocalTransport {
    bots: Vec<Box<dyn Bot>>,
    pending: VecDeque<InboundAction>,
    deck_empty: bool,
    stalled: bool,
    actions: usize,
    max_actions: usize,
}

impl LocalTransport {
    pub fn new(bots: Vec<Box<dyn Bot>>) -> Self {
        Self {
            bots,
            pending: VecDeque::new(),
            deck_empty: false,
            stalled: false,
            actions: 0,
            max_actions: MAX_ACTIONS_PER_GAME,
        }
    }

    pub fn with_action_limit(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions;
        self
    }

    /// True once a seat was prompted with no legal card and nothing to draw.
    pub fn stalled(&self) -> bool {
        self.stalled
    }

    pub fn actions(&self) -> usize {
        self.actions
    }
}

impl Transport for LocalTransport {
    fn send_to(&mut self, player_id: usize, notice: &Notice) {
        match notice {
            Notice::YourTurn { top, hand } => {
                if self.deck_empty && legal_plays(top.as_ref(), hand).is_empty() {
                    self.stalled = true;
                    return;
                }
                if let Some(bot) = self.bots.get_mut(player_id) {
                    let action = bot.choose_action(top.as_ref(), hand);
                    self.pending
                        .push_back(InboundAction::new(player_id, action.to_string()));
                }
            }
            Notice::Rejected {
                reason: Rejection::DeckEmpty,
            } => self.deck_empty = true,
            _ => {}
        }
    }

    fn broadcast_all(&mut self, _notice: &Notice) {}

    fn next_action(&mut self) -> Option<InboundAction> {
        if self.stalled || self.actions >= self.max_actions {
            return None;
        }
        let action = self.pending.pop_front()?;
        self.actions += 1;
        Some(action)
    }
}

#[derive(Debug, Default)]
struct SimSummary {
    games: usize,
    wins: Vec<usize>,
    stalemates: usize,
    turns: usize,
    chaos: usize,
}

impl SimSummary {
    fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            ..Self::default()
        }
    }

    fn add(&mut self, record: &GameRecord) {
        self.games += 1;
        self.turns += record.turns.len();
        self.chaos += record.chaos_rules().count();
        match record.result {
            GameResult::Won { winner } => self.wins[winner] += 1,
            GameResult::Abandoned => self.stalemates += 1,
        }
    }

    fn write(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for (seat, wins) in self.wins.iter().enumerate() {
            writeln!(
                out,
                "Player {} wins: {} ({:.1}%)",
                seat + 1,
                wins,
                ui::percent(*wins, self.games)
            )?;
        }
        writeln!(out, "Stalemates: {}", self.stalemates)?;
        writeln!(out, "Chaos rules activated: {}", self.chaos)?;
        let avg = if self.games == 0 {
            0.0
        } else {
            self.turns as f64 / self.games as f64
        };
        writeln!(out, "Average turns per game: {:.1}", avg)
    }
}

/// Handle the sim command.
///
/// Game `i` uses seed `base_seed + i`; bot `p` in that game is seeded with
/// `base_seed + i + p` so randomized bots differ between seats.
pub fn handle_sim_command(
    config: &Config,
    games: u64,
    output: Option<String>,
    bot: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let total = games as usize;
    if total == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    if let Err(e) = create_bot(bot, 0) {
        ui::write_error(err, &e)?;
        return Err(CliError::InvalidInput(e));
    }

    let mut logger = match output.as_deref().map(GameLogger::create).transpose() {
        Ok(l) => l,
        Err(e) => {
            ui::write_error(err, &format!("Failed to open output file: {}", e))?;
            return Err(CliError::Io(e));
        }
    };

    let break_after = std::env::var("MADCARDS_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let players = config.players;
    let mut summary = SimSummary::new(players);

    for i in 0..total {
        let seed = base_seed.wrapping_add(i as u64);
        let mut game = config.game();
        game.seed = Some(seed);

        let bots = (0..players)
            .map(|p| create_bot(bot, seed.wrapping_add(p as u64)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut transport = LocalTransport::new(bots);

        let mut coordinator = SessionCoordinator::new(&game, &mut transport)?;
        if let Some(l) = logger.as_mut() {
            coordinator = coordinator.with_game_id(l.next_id());
        }
        let mut record = coordinator.run()?;
        drop(coordinator);

        if transport.actions() >= MAX_ACTIONS_PER_GAME {
            ui::display_warning(
                err,
                &format!("game {} hit the action limit; counted as a stalemate", i + 1),
            )?;
        }

        if let Some(l) = logger.as_mut() {
            record.meta = Some(serde_json::json!({
                "bot": bot,
                "stalemate": record.result == GameResult::Abandoned,
            }));
            l.write(&record)?;
        }
        summary.add(&record);

        if let Some(b) = break_after
            && summary.games == b
        {
            writeln!(out, "Interrupted: played {}/{}", summary.games, total)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: played {}/{}",
                summary.games, total
            )));
        }
    }

    writeln!(
        out,
        "Simulated: {} games ({} players, {} bots, seed {})",
        summary.games, players, bot, base_seed
    )?;
    summary.write(out)?;
    Ok(())
}
