//! Player-facing text for every engine outcome.
//!
//! Plain text only; callers decide how to frame it.

use crate::dungeon::combat::{CombatReport, EnemyOutcome};
use crate::dungeon::types::Room;

pub fn world_reset(traveler: &str) -> String {
    format!("Dungeon reset. {} awaits a new adventure!", traveler)
}

pub fn game_started() -> String {
    "Game started!".to_string()
}

pub fn blocked_exit() -> String {
    "You can't go that way!".to_string()
}

/// Static description plus whatever currently sits in the room.
pub fn describe_room(room: &Room) -> String {
    let mut text = room.description.clone();
    if let Some(item) = &room.item {
        text.push_str(&format!(
            " You found a {}! Type 'pickup' to collect it.",
            item
        ));
    }
    if let Some(enemy) = &room.enemy {
        text.push_str(&format!(
            " A wild {} appears! Type 'Fight' to engage.",
            enemy.name
        ));
    }
    text
}

pub fn nothing_to_pick_up() -> String {
    "There's nothing to pick up here.".to_string()
}

pub fn carry_limit_reached(traveler: &str, item: &str, limit: usize) -> String {
    format!("{} can't carry more than {} {}s!", traveler, limit, item)
}

pub fn picked_up(traveler: &str, item: &str) -> String {
    format!("{} picked up the {}!", traveler, item)
}

pub fn no_enemy() -> String {
    "There's no enemy here.".to_string()
}

pub fn no_potions(traveler: &str) -> String {
    format!("{} has no potions!", traveler)
}

pub fn healed(traveler: &str, health: i32) -> String {
    format!(
        "{} drinks a potion and restores health to {} HP!",
        traveler, health
    )
}

pub fn restarted(traveler: &str) -> String {
    format!(
        "{} returns to the dungeon entrance. The evil has returned anew!",
        traveler
    )
}

/// One line per event, joined with spaces.
pub fn combat(traveler: &str, report: &CombatReport) -> String {
    let enemy = &report.enemy_name;
    let mut lines = vec![format!(
        "{} attacks the {} for {} damage!",
        traveler, enemy, report.damage_dealt
    )];

    match report.enemy {
        EnemyOutcome::Defeated => {
            lines.push(format!("The {} is defeated!", enemy));
            if report.victory {
                lines.push("The dungeon has been cleansed! All enemies are defeated!".to_string());
                lines.push(format!("{} Wins!", traveler));
            }
        }
        EnemyOutcome::Wounded { remaining } => {
            lines.push(format!("The {} has {} HP left.", enemy, remaining));
            lines.push(format!(
                "The {} strikes back for {} damage! Health: {}",
                enemy, report.damage_taken, report.health_after
            ));
            if report.defeat {
                lines.push(format!("{} has fallen... Game Over.", traveler));
            }
        }
    }

    if !report.broken.is_empty() {
        let names: Vec<&str> = report.broken.iter().map(|k| k.item_name()).collect();
        lines.push(format!(
            "One of your {} broke during the fight!",
            names.join(" and ")
        ));
    }

    lines.join(" ")
}

pub fn help() -> &'static str {
    "Commands:\n\
N)orth S)outh E)ast W)est - move (also: go <direction>)\n\
P)ickup - take the item in this room\n\
F)ight - trade one round of blows with the enemy here\n\
H)eal - drink a potion to restore health\n\
STATUS - health, room, inventory and enemies left\n\
START - begin the adventure; RESTART - back to the gate\n\
RESET - rebuild the whole dungeon; Q)uit - leave"
}
