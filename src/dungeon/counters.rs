use serde::{Deserialize, Serialize};

/// Global enemy quota: how many may ever appear, how many have, how many died.
///
/// Invariant: `killed <= spawned <= total`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DungeonCounters {
    total: u32,
    spawned: u32,
    killed: u32,
}

impl DungeonCounters {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            spawned: 0,
            killed: 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn killed(&self) -> u32 {
        self.killed
    }

    pub fn can_spawn(&self) -> bool {
        self.spawned < self.total
    }

    /// Returns false (and changes nothing) once the quota is exhausted.
    pub fn record_spawn(&mut self) -> bool {
        if !self.can_spawn() {
            return false;
        }
        self.spawned += 1;
        true
    }

    /// Returns false (and changes nothing) if no spawned enemy is left alive.
    pub fn record_kill(&mut self) -> bool {
        if self.killed >= self.spawned {
            return false;
        }
        self.killed += 1;
        true
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.killed)
    }

    pub fn is_cleared(&self) -> bool {
        self.killed >= self.total
    }

    pub fn reset(&mut self) {
        self.spawned = 0;
        self.killed = 0;
    }
}
