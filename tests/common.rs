//! Shared fixtures for the dungeon integration tests.

use gatecrawl::dungeon::types::Enemy;
use gatecrawl::dungeon::{DungeonEngine, GameRules, RoomId, ScriptedDice};

/// Engine with default rules driven by the given scripted draws.
#[allow(dead_code)]
pub fn scripted_engine(dice: ScriptedDice) -> DungeonEngine<ScriptedDice> {
    DungeonEngine::new(GameRules::default(), dice)
}

/// Put an enemy into `room` and count it against the spawn quota.
#[allow(dead_code)]
pub fn place_enemy(engine: &mut DungeonEngine<ScriptedDice>, room: u8, name: &str, health: i32) {
    let world = engine.world_mut();
    world.counters.record_spawn();
    if let Some(r) = world.rooms.room_mut(RoomId(room)) {
        r.enemy = Some(Enemy::new(name, health));
    }
}

#[allow(dead_code)]
pub fn place_item(engine: &mut DungeonEngine<ScriptedDice>, room: u8, item: &str) {
    if let Some(r) = engine.world_mut().rooms.room_mut(RoomId(room)) {
        r.item = Some(item.to_string());
    }
}
