use std::path::{Path, PathBuf};

use log::{debug, info};
use sled::IVec;

use crate::dungeon::engine::{DungeonEngine, GameRules};
use crate::dungeon::errors::DungeonError;
use crate::dungeon::player::{PlayerState, SessionStore, PLAYER_SCHEMA_VERSION};
use crate::dungeon::rng::Dice;
use crate::dungeon::world::{World, WORLD_SCHEMA_VERSION};

const TREE_PRIMARY: &str = "gatecrawl";
const WORLD_KEY: &[u8] = b"world";
const SESSION_PREFIX: &str = "sessions:";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct DungeonStoreBuilder {
    path: PathBuf,
    ensure_world: bool,
}

impl DungeonStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ensure_world: true,
        }
    }

    /// Skip writing a fresh world on first open.
    pub fn without_world(mut self) -> Self {
        self.ensure_world = false;
        self
    }

    pub fn open(self) -> Result<DungeonStore, DungeonError> {
        DungeonStore::open_with_options(self.path, self.ensure_world)
    }
}

/// Sled-backed persistence for the shared world and every session's traveler.
pub struct DungeonStore {
    _db: sled::Db,
    primary: sled::Tree,
}

impl DungeonStore {
    /// Open (or create) the store rooted at `path`, writing a default world if none exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DungeonError> {
        Self::open_with_options(path, true)
    }

    fn open_with_options<P: AsRef<Path>>(path: P, ensure_world: bool) -> Result<Self, DungeonError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let primary = db.open_tree(TREE_PRIMARY)?;
        let store = Self { _db: db, primary };

        if ensure_world && !store.has_world()? {
            info!("no world at {}, writing a fresh one", path_ref.display());
            store.put_world(&World::default())?;
        }

        Ok(store)
    }

    fn session_key(session_id: &str) -> Vec<u8> {
        format!("{}{}", SESSION_PREFIX, session_id).into_bytes()
    }

    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, DungeonError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, DungeonError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    pub fn has_world(&self) -> Result<bool, DungeonError> {
        Ok(self.primary.contains_key(WORLD_KEY)?)
    }

    pub fn put_world(&self, world: &World) -> Result<(), DungeonError> {
        let mut record = world.clone();
        record.schema_version = WORLD_SCHEMA_VERSION;
        let bytes = Self::serialize(&record)?;
        self.primary.insert(WORLD_KEY, bytes)?;
        self.primary.flush()?;
        Ok(())
    }

    pub fn get_world(&self) -> Result<World, DungeonError> {
        let Some(bytes) = self.primary.get(WORLD_KEY)? else {
            return Err(DungeonError::NotFound("world".to_string()));
        };
        let record: World = Self::deserialize(bytes)?;
        if record.schema_version != WORLD_SCHEMA_VERSION {
            return Err(DungeonError::SchemaMismatch {
                entity: "world",
                expected: WORLD_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    /// Insert or update the traveler for `session_id`.
    pub fn put_session(&self, session_id: &str, state: &PlayerState) -> Result<(), DungeonError> {
        let mut record = state.clone();
        record.schema_version = PLAYER_SCHEMA_VERSION;
        let bytes = Self::serialize(&record)?;
        self.primary.insert(Self::session_key(session_id), bytes)?;
        self.primary.flush()?;
        Ok(())
    }

    pub fn get_session(&self, session_id: &str) -> Result<PlayerState, DungeonError> {
        let Some(bytes) = self.primary.get(Self::session_key(session_id))? else {
            return Err(DungeonError::NotFound(format!("session: {}", session_id)));
        };
        let record: PlayerState = Self::deserialize(bytes)?;
        if record.schema_version != PLAYER_SCHEMA_VERSION {
            return Err(DungeonError::SchemaMismatch {
                entity: "session",
                expected: PLAYER_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    pub fn list_session_ids(&self) -> Result<Vec<String>, DungeonError> {
        let mut ids = Vec::new();
        for entry in self.primary.scan_prefix(SESSION_PREFIX.as_bytes()) {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(id) = text.strip_prefix(SESSION_PREFIX) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }

    /// Build an engine from the stored world and sessions.
    ///
    /// A missing world is replaced by a fresh one built from `rules`.
    pub fn load_engine<D: Dice>(&self, rules: GameRules, dice: D) -> Result<DungeonEngine<D>, DungeonError> {
        let world = match self.get_world() {
            Ok(world) => world,
            Err(DungeonError::NotFound(_)) => {
                World::with_carry_limit(rules.total_enemies, rules.carry_limit)
            }
            Err(e) => return Err(e),
        };
        let mut sessions = SessionStore::new();
        for id in self.list_session_ids()? {
            let state = self.get_session(&id)?;
            sessions.insert(&id, state);
        }
        debug!("loaded world and {} sessions", sessions.len());
        Ok(DungeonEngine::from_parts(rules, dice, world, sessions))
    }

    /// Persist the world and every session the engine knows about.
    pub fn save_engine<D: Dice>(&self, engine: &DungeonEngine<D>) -> Result<(), DungeonError> {
        self.put_world(engine.world())?;
        for id in engine.sessions().ids() {
            if let Some(state) = engine.sessions().get(id) {
                self.put_session(id, state)?;
            }
        }
        Ok(())
    }
}
