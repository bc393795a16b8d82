//! The gate-and-cavern dungeon: rooms, spawning, combat and the engine that ties them together.
//!
//! Pure game state lives in [`world`] and [`player`]; randomness enters only
//! through the [`rng::Dice`] trait so every outcome can be replayed.

pub mod combat;
pub mod commands;
pub mod counters;
pub mod engine;
pub mod errors;
pub mod inventory;
pub mod narration;
pub mod player;
pub mod rng;
pub mod rooms;
pub mod spawn;
pub mod storage;
pub mod types;
pub mod world;

pub use commands::{parse_command, DungeonCommand};
pub use engine::{ActionReply, DungeonEngine, GameRules, GameStateView, MoveReply, StatusView};
pub use errors::{CapacityError, DungeonError};
pub use player::{PlayerState, SessionPhase, SessionStore};
pub use rng::{Dice, ScriptedDice, SeededDice};
pub use storage::{DungeonStore, DungeonStoreBuilder};
pub use types::{Direction, RoomId, ENTRY_ROOM};
pub use world::World;
