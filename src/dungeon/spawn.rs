//! Room-entry spawning of enemies and loot.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dungeon::counters::DungeonCounters;
use crate::dungeon::rng::Dice;
use crate::dungeon::types::{Enemy, Room, POTION, SHIELD_FRAGMENT, SWORD_FRAGMENT};

/// Enemy archetypes and their starting hit points.
pub const ENEMY_TABLE: [(&str, i32); 5] = [
    ("Goblin", 25),
    ("Skeleton", 40),
    ("Orc", 50),
    ("Zombie", 35),
    ("Dark Mage", 60),
];

pub const LOOT_TABLE: [&str; 3] = [POTION, SWORD_FRAGMENT, SHIELD_FRAGMENT];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpawnRules {
    pub enemy_chance: f64,
    pub item_chance: f64,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            enemy_chance: 0.4,
            item_chance: 0.3,
        }
    }
}

/// What materialized during one room entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub enemy: Option<Enemy>,
    pub item: Option<String>,
}

impl SpawnOutcome {
    pub fn is_empty(&self) -> bool {
        self.enemy.is_none() && self.item.is_none()
    }
}

/// Runs on every entry, including re-entry. Each slot is only considered
/// while empty, and the enemy check also needs quota left on `counters`.
pub fn populate_on_entry(
    room: &mut Room,
    counters: &mut DungeonCounters,
    rules: &SpawnRules,
    dice: &mut dyn Dice,
) -> SpawnOutcome {
    let mut outcome = SpawnOutcome::default();

    if room.enemy.is_none() && counters.can_spawn() && dice.chance(rules.enemy_chance) {
        let (name, health) = ENEMY_TABLE[dice.pick(ENEMY_TABLE.len())];
        let enemy = Enemy::new(name, health);
        counters.record_spawn();
        debug!(
            "spawned {} ({} hp) in room {} [{}/{} spawned]",
            name,
            health,
            room.id,
            counters.spawned(),
            counters.total()
        );
        room.enemy = Some(enemy.clone());
        outcome.enemy = Some(enemy);
    }

    if room.item.is_none() && dice.chance(rules.item_chance) {
        let loot = LOOT_TABLE[dice.pick(LOOT_TABLE.len())].to_string();
        debug!("spawned item {} in room {}", loot, room.id);
        room.item = Some(loot.clone());
        outcome.item = Some(loot);
    }

    outcome
}
