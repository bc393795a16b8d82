//! Per-session traveler state and the session-keyed store that holds it.
use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dungeon::types::{RoomId, ENTRY_ROOM};

pub const MAX_HEALTH: i32 = 100;

pub const PLAYER_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    /// Always within `0..=MAX_HEALTH`.
    pub health: i32,
    pub current_room: RoomId,
    pub game_started: bool,
    #[serde(default)]
    pub schema_version: u8,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            current_room: ENTRY_ROOM,
            game_started: false,
            schema_version: PLAYER_SCHEMA_VERSION,
        }
    }
}

impl PlayerState {
    pub fn phase(&self) -> SessionPhase {
        if self.game_started {
            SessionPhase::InProgress
        } else {
            SessionPhase::NotStarted
        }
    }

    pub fn is_fallen(&self) -> bool {
        self.health == 0
    }

    /// Health never drops below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    /// Health never rises above `MAX_HEALTH`.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount.max(0)).min(MAX_HEALTH);
    }

    pub fn reset(&mut self) {
        *self = PlayerState::default();
    }
}

/// Explicit session-keyed store; nothing about a traveler lives in globals.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<String, PlayerState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing state for `session_id`, or fresh defaults on first contact.
    pub fn get_or_create(&mut self, session_id: &str) -> &mut PlayerState {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!("new session {}", session_id);
                PlayerState::default()
            })
    }

    /// Read-only view; unknown sessions report defaults without being stored.
    pub fn peek(&self, session_id: &str) -> PlayerState {
        self.sessions.get(session_id).cloned().unwrap_or_default()
    }

    pub fn get(&self, session_id: &str) -> Option<&PlayerState> {
        self.sessions.get(session_id)
    }

    pub fn insert(&mut self, session_id: &str, state: PlayerState) {
        self.sessions.insert(session_id.to_string(), state);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_new_traveler() {
        let p = PlayerState::default();
        assert_eq!(p.health, 100);
        assert_eq!(p.current_room, ENTRY_ROOM);
        assert_eq!(p.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn health_is_clamped() {
        let mut p = PlayerState::default();
        p.take_damage(250);
        assert_eq!(p.health, 0);
        assert!(p.is_fallen());
        p.heal(30);
        assert_eq!(p.health, 30);
        p.heal(500);
        assert_eq!(p.health, 100);
        p.take_damage(-5);
        assert_eq!(p.health, 100);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut p = PlayerState {
            health: 12,
            current_room: RoomId(6),
            game_started: true,
            schema_version: PLAYER_SCHEMA_VERSION,
        };
        p.reset();
        assert_eq!(p, PlayerState::default());
    }

    #[test]
    fn peek_does_not_create_sessions() {
        let mut store = SessionStore::new();
        let view = store.peek("ghost");
        assert_eq!(view, PlayerState::default());
        assert!(store.is_empty());
        store.get_or_create("alice").health = 50;
        assert_eq!(store.peek("alice").health, 50);
        assert_eq!(store.len(), 1);
    }
}
