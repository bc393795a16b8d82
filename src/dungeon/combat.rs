//! One attack exchange between the traveler and the enemy in their room.
//!
//! [`resolve`] only rolls and computes; [`apply_exchange`] writes the result
//! into the world and the player. Keeping the two apart lets the arithmetic be
//! checked against fixed draws without building a world.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dungeon::player::PlayerState;
use crate::dungeon::rng::Dice;
use crate::dungeon::types::{Enemy, FragmentKind, RoomId};
use crate::dungeon::world::World;

pub const PLAYER_ATTACK_RANGE: (i32, i32) = (8, 20);
pub const ENEMY_ATTACK_RANGE: (i32, i32) = (5, 15);

/// Fragments beyond this count add no further bonus.
pub const MAX_FRAGMENT_BONUS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CombatRules {
    pub fragment_break_chance: f64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            fragment_break_chance: 0.25,
        }
    }
}

/// +25% per sword fragment, floored.
pub fn sword_bonus(attack: i32, swords: usize) -> i32 {
    let swords = swords.min(MAX_FRAGMENT_BONUS) as i32;
    if swords == 0 {
        return attack;
    }
    attack * (4 + swords) / 4
}

/// -15% per shield fragment, floored.
pub fn shield_reduction(attack: i32, shields: usize) -> i32 {
    let shields = shields.min(MAX_FRAGMENT_BONUS) as i32;
    if shields == 0 {
        return attack;
    }
    attack * (100 - 15 * shields) / 100
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnemyOutcome {
    Defeated,
    Wounded { remaining: i32 },
}

/// Rolled result of one exchange, before it touches any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub player_attack: i32,
    pub enemy_attack: i32,
    pub enemy: EnemyOutcome,
    pub sword_breaks: bool,
    pub shield_breaks: bool,
}

/// Roll one exchange against `enemy` given the fragments currently held.
///
/// Draw order: player attack, enemy attack, sword break (only while a sword
/// fragment is held), shield break (only while a shield fragment is held).
pub fn resolve(
    enemy: &Enemy,
    swords_held: usize,
    shields_held: usize,
    rules: &CombatRules,
    dice: &mut dyn Dice,
) -> Exchange {
    let base_player = dice.uniform_int(PLAYER_ATTACK_RANGE.0, PLAYER_ATTACK_RANGE.1);
    let base_enemy = dice.uniform_int(ENEMY_ATTACK_RANGE.0, ENEMY_ATTACK_RANGE.1);
    let player_attack = sword_bonus(base_player, swords_held);
    let enemy_attack = shield_reduction(base_enemy, shields_held);

    let remaining = enemy.health - player_attack;
    let outcome = if remaining <= 0 {
        EnemyOutcome::Defeated
    } else {
        EnemyOutcome::Wounded { remaining }
    };

    let sword_breaks = swords_held > 0 && dice.chance(rules.fragment_break_chance);
    let shield_breaks = shields_held > 0 && dice.chance(rules.fragment_break_chance);

    debug!(
        "exchange vs {}: rolls {}/{} -> attack {} counter {} ({:?})",
        enemy.name, base_player, base_enemy, player_attack, enemy_attack, outcome
    );

    Exchange {
        player_attack,
        enemy_attack,
        enemy: outcome,
        sword_breaks,
        shield_breaks,
    }
}

/// Everything the caller needs to narrate a fight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombatReport {
    pub enemy_name: String,
    pub damage_dealt: i32,
    /// Zero when the enemy fell before striking back.
    pub damage_taken: i32,
    pub enemy: EnemyOutcome,
    pub health_after: i32,
    pub broken: Vec<FragmentKind>,
    pub victory: bool,
    pub defeat: bool,
}

/// Apply an exchange to the room, the counters, the ledger and the player.
///
/// A defeated enemy does not counter-attack. Fragment breakage removes the
/// oldest held fragment of each kind that broke.
pub fn apply_exchange(
    world: &mut World,
    room_id: RoomId,
    enemy_name: &str,
    player: &mut PlayerState,
    exchange: &Exchange,
) -> CombatReport {
    let mut damage_taken = 0;
    let mut victory = false;
    let mut defeat = false;

    if let Some(room) = world.rooms.room_mut(room_id) {
        match exchange.enemy {
            EnemyOutcome::Defeated => {
                room.enemy = None;
            }
            EnemyOutcome::Wounded { remaining } => {
                if let Some(enemy) = room.enemy.as_mut() {
                    enemy.health = remaining;
                }
            }
        }
    }

    match exchange.enemy {
        EnemyOutcome::Defeated => {
            world.counters.record_kill();
            info!(
                "{} defeated in room {} [{}/{} killed]",
                enemy_name,
                room_id,
                world.counters.killed(),
                world.counters.total()
            );
            if world.counters.is_cleared() {
                info!("dungeon cleared");
                victory = true;
            }
        }
        EnemyOutcome::Wounded { .. } => {
            damage_taken = exchange.enemy_attack;
            player.take_damage(damage_taken);
            if player.is_fallen() {
                info!("traveler fell to {}", enemy_name);
                defeat = true;
            }
        }
    }

    let mut broken = Vec::new();
    for (breaks, kind) in [
        (exchange.sword_breaks, FragmentKind::Sword),
        (exchange.shield_breaks, FragmentKind::Shield),
    ] {
        if breaks && world.inventory.remove_oldest(kind.item_name()).is_some() {
            debug!("{} broke", kind.item_name());
            broken.push(kind);
        }
    }

    CombatReport {
        enemy_name: enemy_name.to_string(),
        damage_dealt: exchange.player_attack,
        damage_taken,
        enemy: exchange.enemy,
        health_after: player.health,
        broken,
        victory,
        defeat,
    }
}
