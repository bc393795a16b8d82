//! Text command parsing for the interactive front end.
//!
//! Accepts single letters, full words and a few compact forms. Movement
//! aliases are expanded to the full direction words the engine expects.

use crate::dungeon::types::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DungeonCommand {
    /// Carries the direction word as typed so the engine can reject bad input.
    Move(String),
    Pickup,
    Fight,
    Heal,
    Restart,
    Reset,
    Start,
    Status,
    State,
    Help,
    Quit,
    Unknown(String),
}

fn is_question_marks(up: &str) -> bool {
    up.chars().any(|ch| !ch.is_whitespace())
        && up.chars().all(|ch| {
            ch.is_whitespace()
                || ch == '?'
                || ch == '\u{FF1F}' /* FULLWIDTH QUESTION MARK */
                || ch == '\u{00BF}' /* INVERTED QUESTION MARK */
                || ch == '\u{FE56}' /* SMALL QUESTION MARK */
                || ch == '\u{061F}' /* ARABIC QUESTION MARK */
        })
}

fn direction_alias(token: &str) -> Option<Direction> {
    match token {
        "N" | "NORTH" => Some(Direction::North),
        "S" | "SOUTH" => Some(Direction::South),
        "E" | "EAST" => Some(Direction::East),
        "W" | "WEST" => Some(Direction::West),
        _ => None,
    }
}

pub fn parse_command(raw: &str) -> DungeonCommand {
    let up = raw.trim().to_uppercase();
    if is_question_marks(&up) {
        return DungeonCommand::Help;
    }

    let tokens: Vec<&str> = up.split_whitespace().collect();
    let Some(first) = tokens.first().copied() else {
        return DungeonCommand::Unknown(String::new());
    };

    if let Some(dir) = direction_alias(first) {
        if tokens.len() == 1 {
            return DungeonCommand::Move(dir.as_str().to_string());
        }
    }

    match first {
        "GO" | "MOVE" => match tokens.get(1) {
            Some(arg) => match direction_alias(arg) {
                Some(dir) => DungeonCommand::Move(dir.as_str().to_string()),
                None => DungeonCommand::Move(arg.to_lowercase()),
            },
            None => DungeonCommand::Unknown(raw.trim().to_string()),
        },
        "P" | "PICKUP" | "TAKE" | "GET" => DungeonCommand::Pickup,
        "PICK" if tokens.get(1) == Some(&"UP") => DungeonCommand::Pickup,
        "F" | "FIGHT" | "ATTACK" | "A" => DungeonCommand::Fight,
        "H" | "HEAL" | "POTION" | "DRINK" => DungeonCommand::Heal,
        "RESTART" => DungeonCommand::Restart,
        "RESET" => DungeonCommand::Reset,
        "START" | "BEGIN" => DungeonCommand::Start,
        "STATUS" | "STAT" | "I" | "INV" => DungeonCommand::Status,
        "STATE" => DungeonCommand::State,
        "HELP" => DungeonCommand::Help,
        "Q" | "QUIT" | "EXIT" => DungeonCommand::Quit,
        _ => DungeonCommand::Unknown(raw.trim().to_string()),
    }
}
