//! # Gatecrawl - a six-room dungeon crawl
//!
//! A traveler enters at the Ancient Gate and explores a fixed graph of six rooms.
//! Enemies and loot appear as rooms are entered, fights are resolved one exchange
//! at a time, and the dungeon is won once its enemy quota has been slain.
//!
//! ## Features
//!
//! - **Shared World**: One world (rooms, enemy quota, inventory) shared by every session.
//! - **Per-Session Travelers**: Health, room and started flag keyed by session id.
//! - **Deterministic Randomness**: All draws go through the [`dungeon::rng::Dice`] trait.
//! - **Persistence**: World and sessions stored in sled with bincode records.
//!
//! ## Quick Start
//!
//! ```rust
//! use gatecrawl::dungeon::{DungeonEngine, GameRules, SeededDice};
//!
//! let mut engine = DungeonEngine::new(GameRules::default(), SeededDice::from_seed(7));
//! engine.start_game("alice");
//! let reply = engine.move_player("alice", "east").unwrap();
//! assert!(reply.moved);
//! println!("{}", reply.description);
//! ```
//!
//! ## Module Organization
//!
//! - [`dungeon`] - Rooms, spawning, combat, the engine and its store
//! - [`config`] - TOML configuration
//! - [`logutil`] - Log sanitizing helpers

pub mod config;
pub mod dungeon;
pub mod logutil;
