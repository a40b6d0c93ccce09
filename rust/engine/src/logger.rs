use serde::{Deserialize, Serialize};

use crate::engine::TurnOutcome;
use crate::rules::ChaosRule;

/// One completed turn as it happened.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based count of completed turns
    pub turn: u32,
    /// Seat that moved
    pub player_id: usize,
    /// What the move did
    pub outcome: TurnOutcome,
    /// Madness meter after the turn
    pub madness: u32,
    /// Chaos rule activated after this turn, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaos: Option<ChaosRule>,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameResult {
    Won { winner: usize },
    /// Inbound actions stopped before anyone won
    Abandoned,
}

/// Complete record of one session, one JSON object per line in a log file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// Seed behind the deck order and chaos draws
    pub seed: Option<u64>,
    /// Seats in the session
    pub players: usize,
    /// Completed turns in order
    pub turns: Vec<TurnRecord>,
    /// Rules in effect at the end, base rules first
    pub active_rules: Vec<String>,
    pub result: GameResult,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<usize> {
        match self.result {
            GameResult::Won { winner } => Some(winner),
            GameResult::Abandoned => None,
        }
    }

    pub fn chaos_rules(&self) -> impl Iterator<Item = ChaosRule> + '_ {
        self.turns.iter().filter_map(|t| t.chaos)
    }
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`GameRecord`]s to a JSONL file.
pub struct GameLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
