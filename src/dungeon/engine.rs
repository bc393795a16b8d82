//! # Dungeon Engine
//!
//! Orchestrates the room graph, spawning, combat, the shared inventory and the
//! per-session traveler state in response to player actions.
//!
//! ## Session lifecycle
//!
//! A session is either `NotStarted` or `InProgress`. `reset_world` and
//! `restart` return it to `NotStarted`; `start_game` moves it to `InProgress`.
//! Falling to zero health or clearing the dungeon only produces a message: the
//! session keeps accepting actions afterwards, and no action is refused while
//! the session is `NotStarted`.
//!
//! ## Errors
//!
//! Only malformed requests are errors ([`DungeonError::InvalidDirection`],
//! [`DungeonError::UnknownRoom`]). Everything else (blocked exit, nothing to
//! pick up, full pack, no enemy, no potion) is a normal reply that leaves the
//! state untouched.
//!
//! ## Usage
//!
//! ```rust
//! use gatecrawl::dungeon::{DungeonEngine, GameRules, ScriptedDice};
//!
//! let dice = ScriptedDice::new().with_chances([false, false]);
//! let mut engine = DungeonEngine::new(GameRules::default(), dice);
//! engine.start_game("alice");
//! let reply = engine.move_player("alice", "south").unwrap();
//! assert!(reply.moved);
//! assert_eq!(engine.status("alice").room, "Guard Room");
//! ```

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::dungeon::combat::{self, CombatReport, CombatRules};
use crate::dungeon::errors::DungeonError;
use crate::dungeon::inventory::DEFAULT_CARRY_LIMIT;
use crate::dungeon::narration;
use crate::dungeon::player::{PlayerState, SessionPhase, SessionStore};
use crate::dungeon::rng::{Dice, SeededDice};
use crate::dungeon::spawn::{self, SpawnRules};
use crate::dungeon::types::{Direction, RoomId, POTION, SHIELD_FRAGMENT, SWORD_FRAGMENT};
use crate::dungeon::world::{World, DEFAULT_TOTAL_ENEMIES};
use crate::logutil::escape_log;

/// Tunable constants of one dungeon.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    pub traveler_name: String,
    pub total_enemies: u32,
    pub carry_limit: usize,
    pub potion_heal: i32,
    pub spawn: SpawnRules,
    pub combat: CombatRules,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            traveler_name: "Traveler".to_string(),
            total_enemies: DEFAULT_TOTAL_ENEMIES,
            carry_limit: DEFAULT_CARRY_LIMIT,
            potion_heal: 30,
            spawn: SpawnRules::default(),
            combat: CombatRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub started: bool,
    pub phase: SessionPhase,
    pub health: i32,
    pub current_room: RoomId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusView {
    pub traveler: String,
    pub health: i32,
    /// "Unknown" when the session points outside the graph.
    pub room: String,
    pub inventory_counts: BTreeMap<String, usize>,
    pub remaining_enemies: u32,
    pub total_enemies: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveReply {
    pub description: String,
    pub moved: bool,
    pub room: RoomId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat: Option<CombatReport>,
}

impl ActionReply {
    fn text(message: String) -> Self {
        Self {
            message,
            combat: None,
        }
    }
}

/// The shared world, every session's traveler, and the dice that drive both.
#[derive(Debug)]
pub struct DungeonEngine<D: Dice = SeededDice> {
    world: World,
    sessions: SessionStore,
    dice: D,
    rules: GameRules,
}

impl<D: Dice> DungeonEngine<D> {
    pub fn new(rules: GameRules, dice: D) -> Self {
        let world = World::with_carry_limit(rules.total_enemies, rules.carry_limit);
        Self::from_parts(rules, dice, world, SessionStore::new())
    }

    /// Resume from previously persisted state.
    pub fn from_parts(rules: GameRules, dice: D, world: World, sessions: SessionStore) -> Self {
        Self {
            world,
            sessions,
            dice,
            rules,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Direct access for seeding sessions (tests, restores).
    pub fn session_mut(&mut self, session_id: &str) -> &mut PlayerState {
        self.sessions.get_or_create(session_id)
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Rebuild the whole world and mark the caller's session as not started.
    pub fn reset_world(&mut self, session_id: &str) -> ActionReply {
        self.world
            .reset(self.rules.total_enemies, self.rules.carry_limit);
        self.sessions.get_or_create(session_id).game_started = false;
        info!("world reset by session {}", escape_log(session_id));
        ActionReply::text(narration::world_reset(&self.rules.traveler_name))
    }

    pub fn start_game(&mut self, session_id: &str) -> ActionReply {
        self.sessions.get_or_create(session_id).game_started = true;
        debug!("session {} started", escape_log(session_id));
        ActionReply::text(narration::game_started())
    }

    pub fn game_state(&self, session_id: &str) -> GameStateView {
        let player = self.sessions.peek(session_id);
        GameStateView {
            started: player.game_started,
            phase: player.phase(),
            health: player.health,
            current_room: player.current_room,
        }
    }

    pub fn status(&self, session_id: &str) -> StatusView {
        let player = self.sessions.peek(session_id);
        let room = self
            .world
            .rooms
            .room(player.current_room)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        StatusView {
            traveler: self.rules.traveler_name.clone(),
            health: player.health,
            room,
            inventory_counts: self.world.inventory.counts(),
            remaining_enemies: self.world.counters.remaining(),
            total_enemies: self.world.counters.total(),
        }
    }

    /// Walk through an exit. `direction` must be north, south, east or west.
    pub fn move_player(
        &mut self,
        session_id: &str,
        direction: &str,
    ) -> Result<MoveReply, DungeonError> {
        let direction: Direction = direction.parse().map_err(|e| {
            warn!("rejected direction '{}'", escape_log(direction));
            e
        })?;
        let player = self.sessions.get_or_create(session_id);
        let current = player.current_room;
        if self.world.rooms.room(current).is_none() {
            warn!("session {} is in unknown room {}", escape_log(session_id), current);
            return Err(DungeonError::UnknownRoom(current));
        }

        let Some(next) = self.world.rooms.neighbor(current, direction) else {
            return Ok(MoveReply {
                description: narration::blocked_exit(),
                moved: false,
                room: current,
            });
        };

        let room = self
            .world
            .rooms
            .room_mut(next)
            .ok_or(DungeonError::UnknownRoom(next))?;
        player.current_room = next;
        debug!("session {} moved {} to room {}", escape_log(session_id), direction, next);

        spawn::populate_on_entry(
            room,
            &mut self.world.counters,
            &self.rules.spawn,
            &mut self.dice,
        );

        Ok(MoveReply {
            description: narration::describe_room(room),
            moved: true,
            room: next,
        })
    }

    pub fn pickup(&mut self, session_id: &str) -> ActionReply {
        let traveler = &self.rules.traveler_name;
        let current = self.sessions.get_or_create(session_id).current_room;
        let Some(room) = self.world.rooms.room_mut(current) else {
            return ActionReply::text(narration::nothing_to_pick_up());
        };
        let Some(item) = room.item.clone() else {
            return ActionReply::text(narration::nothing_to_pick_up());
        };

        match self.world.inventory.add(&item) {
            Ok(entry) => {
                room.item = None;
                debug!("picked up {} as entry {:?}", item, entry);
                ActionReply::text(narration::picked_up(traveler, &item))
            }
            Err(full) => {
                debug!("pickup refused: {}", full);
                ActionReply::text(narration::carry_limit_reached(traveler, &item, full.limit))
            }
        }
    }

    /// One exchange against the enemy in the caller's room.
    pub fn fight(&mut self, session_id: &str) -> ActionReply {
        let player = self.sessions.get_or_create(session_id);
        let current = player.current_room;
        let Some(enemy) = self
            .world
            .rooms
            .room(current)
            .and_then(|room| room.enemy.clone())
        else {
            return ActionReply::text(narration::no_enemy());
        };

        let swords = self.world.inventory.count(SWORD_FRAGMENT);
        let shields = self.world.inventory.count(SHIELD_FRAGMENT);
        let exchange = combat::resolve(&enemy, swords, shields, &self.rules.combat, &mut self.dice);
        let report = combat::apply_exchange(&mut self.world, current, &enemy.name, player, &exchange);

        ActionReply {
            message: narration::combat(&self.rules.traveler_name, &report),
            combat: Some(report),
        }
    }

    pub fn heal(&mut self, session_id: &str) -> ActionReply {
        let traveler = &self.rules.traveler_name;
        if self.world.inventory.remove_oldest(POTION).is_none() {
            return ActionReply::text(narration::no_potions(traveler));
        }
        let player = self.sessions.get_or_create(session_id);
        player.heal(self.rules.potion_heal);
        ActionReply::text(narration::healed(traveler, player.health))
    }

    /// Send the caller back to the gate and empty the world, keeping the quota.
    pub fn restart(&mut self, session_id: &str) -> ActionReply {
        self.sessions.get_or_create(session_id).reset();
        self.world.clear_contents();
        info!("session {} restarted the dungeon", escape_log(session_id));
        ActionReply::text(narration::restarted(&self.rules.traveler_name))
    }
}
