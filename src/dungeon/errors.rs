use thiserror::Error;

use crate::dungeon::types::RoomId;

/// Errors that can arise while driving the dungeon engine or its storage layer.
///
/// Only malformed requests and persistence failures live here. Ordinary game
/// outcomes (nothing to pick up, no enemy, no potions) are plain replies.
#[derive(Debug, Error)]
pub enum DungeonError {
    /// The requested direction is not one of north, south, east or west.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// The session points at a room that does not exist in the graph.
    #[error("unknown room: {0}")]
    UnknownRoom(RoomId),

    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when fetching a record that is not present.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },
}

impl DungeonError {
    /// True for rejections the caller should surface as a client error.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            DungeonError::InvalidDirection(_) | DungeonError::UnknownRoom(_)
        )
    }
}

/// Raised by the inventory ledger when a limited item is already at its carry limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot carry more than {limit} of {item}")]
pub struct CapacityError {
    pub item: String,
    pub limit: usize,
}
