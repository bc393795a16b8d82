//! # Configuration
//!
//! TOML configuration for the dungeon, its storage and logging.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gatecrawl::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("gatecrawl.toml").await?;
//!     let config = Config::load("gatecrawl.toml").await?;
//!     println!("Enemies: {}", config.game.total_enemies);
//!     Ok(())
//! }
//! ```
//!
//! ## File Format
//!
//! ```toml
//! [game]
//! traveler_name = "Traveler"
//! total_enemies = 20
//! carry_limit = 3
//! potion_heal = 30
//! enemy_spawn_chance = 0.4
//! item_spawn_chance = 0.3
//! fragment_break_chance = 0.25
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key in `[game]` is optional and falls back to the value shown.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::dungeon::combat::CombatRules;
use crate::dungeon::engine::GameRules;
use crate::dungeon::spawn::SpawnRules;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub traveler_name: String,
    pub total_enemies: u32,
    pub carry_limit: usize,
    pub potion_heal: i32,
    pub enemy_spawn_chance: f64,
    pub item_spawn_chance: f64,
    pub fragment_break_chance: f64,
    /// Fixed RNG seed for reproducible runs; entropy when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let rules = GameRules::default();
        Self {
            traveler_name: rules.traveler_name,
            total_enemies: rules.total_enemies,
            carry_limit: rules.carry_limit,
            potion_heal: rules.potion_heal,
            enemy_spawn_chance: rules.spawn.enemy_chance,
            item_spawn_chance: rules.spawn.item_chance,
            fragment_break_chance: rules.combat.fragment_break_chance,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> GameRules {
        GameRules {
            traveler_name: self.traveler_name.clone(),
            total_enemies: self.total_enemies,
            carry_limit: self.carry_limit,
            potion_heal: self.potion_heal,
            spawn: SpawnRules {
                enemy_chance: self.enemy_spawn_chance,
                item_chance: self.item_spawn_chance,
            },
            combat: CombatRules {
                fragment_break_chance: self.fragment_break_chance,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (key, p) in [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("item_spawn_chance", self.item_spawn_chance),
            ("fragment_break_chance", self.fragment_break_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(anyhow!("game.{} must be between 0 and 1, got {}", key, p));
            }
        }
        if self.carry_limit == 0 {
            return Err(anyhow!("game.carry_limit must be at least 1"));
        }
        if self.potion_heal < 0 {
            return Err(anyhow!("game.potion_heal must not be negative"));
        }
        if self.traveler_name.trim().is_empty() {
            return Err(anyhow!("game.traveler_name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.game.validate()?;
        Ok(config)
    }

    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
