//! # madcards-engine: MadCards Game Session Engine
//!
//! The authoritative core of MadCards, a turn-based card game where each
//! discard must match the previous one by color or number and a growing
//! "madness" meter keeps piling on chaos rules.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Color, Card) and deck contents
//! - [`deck`] - Seeded draw pile shuffled with ChaCha20 RNG
//! - [`player`] - Seats, hands and player actions
//! - [`rules`] - Play validation, madness meter and chaos rules
//! - [`game`] - Session configuration and the owned game state
//! - [`engine`] - Turn state machine: validation, win check, turn order
//! - [`session`] - Coordinator that drives a game over a [`transport`]
//! - [`transport`] - Notices, inbound actions and the transport trait
//! - [`logger`] - GameRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use madcards_engine::engine::Engine;
//! use madcards_engine::game::GameConfig;
//!
//! let config = GameConfig { seed: Some(42), ..GameConfig::with_players(2) };
//! let mut engine = Engine::new(&config).unwrap();
//!
//! // The discard pile starts empty, so any card is a legal first play.
//! let outcome = engine.submit(0, "play 0").unwrap();
//! println!("Player 1 played {}", outcome.card());
//! engine.advance_turn().unwrap();
//! assert_eq!(engine.current_player(), 1);
//! ```
//!
//! ## Move Validation
//!
//! ```rust
//! use madcards_engine::cards::{Card, Color};
//! use madcards_engine::rules::is_legal_play;
//!
//! let top = Card::new(4, Color::Green);
//! assert!(is_legal_play(&Card::new(4, Color::Blue), Some(&top)));
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod logger;
pub mod player;
pub mod rules;
pub mod session;
pub mod transport;
