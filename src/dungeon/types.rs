use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dungeon::errors::DungeonError;

/// Identity of a room in the fixed dungeon topology.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u8);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where every new or restarted traveler stands.
pub const ENTRY_ROOM: RoomId = RoomId(1);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DungeonError;

    /// Accepts only the four lowercase direction words, exactly as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| DungeonError::InvalidDirection(s.to_string()))
    }
}

/// One optional destination per cardinal direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exits([Option<RoomId>; 4]);

impl Exits {
    pub fn set(&mut self, direction: Direction, target: RoomId) {
        self.0[direction.index()] = Some(target);
    }

    pub fn get(&self, direction: Direction) -> Option<RoomId> {
        self.0[direction.index()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
}

impl Enemy {
    pub fn new(name: impl Into<String>, health: i32) -> Self {
        Self {
            name: name.into(),
            health,
        }
    }
}

/// A node in the dungeon. Only `item` and `enemy` change after the world is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    pub exits: Exits,
    pub item: Option<String>,
    pub enemy: Option<Enemy>,
}

impl Room {
    pub fn new(id: u8, name: &str, description: &str) -> Self {
        Self {
            id: RoomId(id),
            name: name.to_string(),
            description: description.to_string(),
            exits: Exits::default(),
            item: None,
            enemy: None,
        }
    }

    pub fn with_exit(mut self, direction: Direction, target: u8) -> Self {
        self.exits.set(direction, RoomId(target));
        self
    }

    pub fn clear_contents(&mut self) {
        self.item = None;
        self.enemy = None;
    }
}

pub const POTION: &str = "Potion";
pub const SWORD_FRAGMENT: &str = "Sword Fragment";
pub const SHIELD_FRAGMENT: &str = "Shield Fragment";

/// Lower-cased names of the items subject to the carry limit.
pub const LIMITED_ITEMS: [&str; 3] = ["potion", "sword fragment", "shield fragment"];

pub fn is_limited_item(name: &str) -> bool {
    let lower = name.to_lowercase();
    LIMITED_ITEMS.contains(&lower.as_str())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Sword,
    Shield,
}

impl FragmentKind {
    pub fn item_name(self) -> &'static str {
        match self {
            FragmentKind::Sword => SWORD_FRAGMENT,
            FragmentKind::Shield => SHIELD_FRAGMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_full_words_only() {
        assert_eq!("north".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("west".parse::<Direction>().unwrap(), Direction::West);
        for bad in ["n", "up", "", "northeast", "West", "SOUTH", " north "] {
            let err = bad.parse::<Direction>().unwrap_err();
            assert!(err.is_rejection(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn exits_lookup_by_direction() {
        let mut exits = Exits::default();
        exits.set(Direction::South, RoomId(3));
        exits.set(Direction::East, RoomId(2));
        assert_eq!(exits.get(Direction::South), Some(RoomId(3)));
        assert_eq!(exits.get(Direction::North), None);
        assert_eq!(exits.get(Direction::East), Some(RoomId(2)));
    }

    #[test]
    fn limited_items_ignore_case() {
        assert!(is_limited_item("POTION"));
        assert!(is_limited_item("Sword Fragment"));
        assert!(!is_limited_item("Rusty Key"));
    }
}
