//! Static dungeon topology.
//!
//! Six hand-written rooms joined by one-way exits. Reverse passages exist only
//! where they are listed explicitly, so the graph is directed. Room contents
//! (one item slot, one enemy slot) are the only mutable part.

use serde::{Deserialize, Serialize};

use crate::dungeon::types::{Direction, Room, RoomId};

/// Build the six canonical rooms with empty item and enemy slots.
pub fn canonical_rooms() -> Vec<Room> {
    vec![
        Room::new(
            1,
            "Ancient Gate",
            "The cracked stone gate looms before you, half buried under vines. \
Faint runes glow as you step closer.",
        )
        .with_exit(Direction::South, 3)
        .with_exit(Direction::East, 2),
        Room::new(
            2,
            "Hallway",
            "A narrow hallway with flickering torches. The air smells of dust and oil.",
        )
        .with_exit(Direction::South, 4)
        .with_exit(Direction::West, 1),
        Room::new(
            3,
            "Guard Room",
            "A dusty room with broken armor pieces scattered around. \
A shattered banner still clings to the wall.",
        )
        .with_exit(Direction::North, 1)
        .with_exit(Direction::South, 5)
        .with_exit(Direction::East, 4),
        Room::new(
            4,
            "Armory",
            "Rusty weapons line the walls, and a cracked chest lies open on the floor.",
        )
        .with_exit(Direction::North, 2)
        .with_exit(Direction::South, 6)
        .with_exit(Direction::West, 3),
        Room::new(
            5,
            "Forgotten Shrine",
            "A circular chamber covered in moss. A broken altar stands at its center, \
glowing faintly with ancient energy.",
        )
        .with_exit(Direction::North, 3)
        .with_exit(Direction::East, 6),
        Room::new(
            6,
            "Crystal Cavern",
            "The tunnel opens into a glittering cavern. \
The air hums with magic from giant crystal shards.",
        )
        .with_exit(Direction::North, 4)
        .with_exit(Direction::West, 5),
    ]
}

/// The room graph plus the per-room item and enemy slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl Default for RoomGraph {
    fn default() -> Self {
        Self::canonical()
    }
}

impl RoomGraph {
    pub fn canonical() -> Self {
        Self {
            rooms: canonical_rooms(),
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == id)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Destination reached by leaving `id` through `direction`, if any.
    pub fn neighbor(&self, id: RoomId, direction: Direction) -> Option<RoomId> {
        self.room(id).and_then(|room| room.exits.get(direction))
    }

    /// Static description text, without any item or enemy suffix.
    pub fn describe(&self, id: RoomId) -> Option<&str> {
        self.room(id).map(|room| room.description.as_str())
    }

    /// Empty every item and enemy slot. Topology is untouched.
    pub fn clear_contents(&mut self) {
        for room in &mut self.rooms {
            room.clear_contents();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::types::{Enemy, ENTRY_ROOM};

    #[test]
    fn canonical_rooms_are_all_present() {
        let graph = RoomGraph::canonical();
        for id in (1..=6).map(RoomId) {
            assert!(graph.room(id).is_some(), "room {id} missing");
        }
        assert_eq!(graph.rooms().len(), 6);
        assert_eq!(graph.room(ENTRY_ROOM).unwrap().name, "Ancient Gate");
    }

    #[test]
    fn neighbor_follows_declared_exits() {
        let graph = RoomGraph::canonical();
        assert_eq!(graph.neighbor(RoomId(1), Direction::South), Some(RoomId(3)));
        assert_eq!(graph.neighbor(RoomId(1), Direction::East), Some(RoomId(2)));
        assert_eq!(graph.neighbor(RoomId(1), Direction::North), None);
        assert_eq!(graph.neighbor(RoomId(6), Direction::West), Some(RoomId(5)));
        assert_eq!(graph.neighbor(RoomId(42), Direction::North), None);
    }

    #[test]
    fn graph_is_directed() {
        let graph = RoomGraph::canonical();
        // 2 -> 4 exists, 4 -> 2 exists; 5 -> 6 exists but 6 has only north/west exits.
        assert_eq!(graph.neighbor(RoomId(5), Direction::East), Some(RoomId(6)));
        assert_eq!(graph.neighbor(RoomId(6), Direction::East), None);
        assert_eq!(graph.neighbor(RoomId(3), Direction::West), None);
    }

    #[test]
    fn describe_returns_static_text() {
        let graph = RoomGraph::canonical();
        let text = graph.describe(RoomId(3)).unwrap();
        assert!(text.starts_with("A dusty room with broken armor"));
        assert!(graph.describe(RoomId(0)).is_none());
    }

    #[test]
    fn clear_contents_wipes_slots() {
        let mut graph = RoomGraph::canonical();
        {
            let room = graph.room_mut(RoomId(4)).unwrap();
            room.item = Some("Potion".into());
            room.enemy = Some(Enemy::new("Orc", 50));
        }
        graph.clear_contents();
        assert!(graph.rooms().iter().all(|r| r.item.is_none() && r.enemy.is_none()));
        assert_eq!(graph.neighbor(RoomId(4), Direction::South), Some(RoomId(6)));
    }
}
