use log::info;
use serde::{Deserialize, Serialize};

use crate::dungeon::counters::DungeonCounters;
use crate::dungeon::inventory::{InventoryLedger, DEFAULT_CARRY_LIMIT};
use crate::dungeon::rooms::RoomGraph;

pub const WORLD_SCHEMA_VERSION: u8 = 1;

/// Enemy quota used when nothing else is configured.
pub const DEFAULT_TOTAL_ENEMIES: u32 = 20;

/// The single shared world: rooms, enemy quota and the common inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct World {
    pub rooms: RoomGraph,
    pub counters: DungeonCounters,
    pub inventory: InventoryLedger,
    #[serde(default)]
    pub schema_version: u8,
}

impl Default for World {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_ENEMIES)
    }
}

impl World {
    pub fn new(total_enemies: u32) -> Self {
        Self::with_carry_limit(total_enemies, DEFAULT_CARRY_LIMIT)
    }

    pub fn with_carry_limit(total_enemies: u32, carry_limit: usize) -> Self {
        Self {
            rooms: RoomGraph::canonical(),
            counters: DungeonCounters::new(total_enemies),
            inventory: InventoryLedger::new(carry_limit),
            schema_version: WORLD_SCHEMA_VERSION,
        }
    }

    /// Rebuild from scratch: canonical rooms, fresh counters, empty ledger.
    pub fn reset(&mut self, total_enemies: u32, carry_limit: usize) {
        *self = Self::with_carry_limit(total_enemies, carry_limit);
        info!(
            "world rebuilt with {} enemies, carry limit {}",
            total_enemies, carry_limit
        );
    }

    /// Clear room contents, spawn/kill counters and the ledger; keep the quota.
    pub fn clear_contents(&mut self) {
        self.rooms.clear_contents();
        self.counters.reset();
        self.inventory.clear();
        info!("world contents cleared");
    }
}
