//! # Spellduel
//!
//! A turn-based text duelling game: the player's wizard fights a sequence of
//! opponents drawn from a roster, casting spells from a level-dependent deck
//! until every opponent is beaten, the player falls, or the player quits.
//!
//! ## Architecture Overview
//!
//! - **Input**: the fixed command vocabulary and the line-based input boundary
//! - **Game**: combatant state, spells and decks, the turn resolver, the
//!   outcome evaluator and the battle loop state machine
//! - **Campaign**: the immutable roster, the spell catalog and the player's
//!   progression across encounters
//! - **Rendering**: the output sink the engine reports to
//! - **Scenes**: opponent selection and the campaign-level flow
//!
//! The battle engine is synchronous and single-owner: a [`Battle`] owns both
//! combatant states for one encounter, and the [`Campaign`] owns the player
//! between encounters.

pub mod campaign;
pub mod game;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use campaign::*;
pub use game::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Spellduel engine.
#[derive(thiserror::Error, Debug)]
pub enum DuelError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A command was rejected before it could touch the battle
    #[error(transparent)]
    InvalidCommand(#[from] InvalidCommand),

    /// Campaign setup data is malformed
    #[error("Setup failed: {0}")]
    Setup(String),

    /// Engine state is inconsistent
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Spellduel codebase.
pub type DuelResult<T> = Result<T, DuelError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants and the runtime configuration.
pub mod config {
    use serde::{Deserialize, Serialize};
    use std::path::PathBuf;

    /// Default random seed for enemy tactics
    pub const DEFAULT_SEED: u64 = 12345;

    /// Maximum health gained on each level up
    pub const HEALTH_PER_LEVEL: u32 = 10;

    /// Flat bonus added to spell power per level above the first
    pub const LEVEL_POWER_BONUS: u32 = 2;

    /// Default name of the player's wizard
    pub const DEFAULT_PLAYER_NAME: &str = "Apprentice";

    /// Default house of the player's wizard
    pub const DEFAULT_HOUSE: &str = "Ember";

    /// Starting health of the player's wizard at level 1
    pub const PLAYER_BASE_HEALTH: u32 = 60;

    /// Number of messages the terminal display keeps
    pub const MAX_MESSAGES: usize = 50;

    /// Roster file schema version understood by the loader
    pub const ROSTER_SCHEMA_VERSION: u32 = 1;

    /// Runtime configuration assembled from the environment and the command line.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DuelConfig {
        /// Seed for the opponents' tactics
        pub seed: u64,
        /// Roster file to load instead of the built-in roster
        pub roster_path: Option<PathBuf>,
        /// Name of the player's wizard
        pub player_name: String,
        /// House of the player's wizard
        pub house: String,
        /// Log level (error, warn, info, debug, trace)
        pub log_level: String,
    }

    impl DuelConfig {
        /// Reads `SPELLDUEL_*` variables, falling back to defaults for
        /// anything missing or unparsable.
        pub fn from_env() -> Self {
            let defaults = Self::default();
            let seed = std::env::var("SPELLDUEL_SEED")
                .ok()
                .and_then(|val| val.parse().ok())
                .unwrap_or(defaults.seed);
            let roster_path = std::env::var("SPELLDUEL_ROSTER")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .map(PathBuf::from);
            let player_name = std::env::var("SPELLDUEL_PLAYER")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or(defaults.player_name);
            let house = std::env::var("SPELLDUEL_HOUSE")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or(defaults.house);
            let log_level = std::env::var("SPELLDUEL_LOG")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or(defaults.log_level);
            Self {
                seed,
                roster_path,
                player_name,
                house,
                log_level,
            }
        }
    }

    impl Default for DuelConfig {
        fn default() -> Self {
            Self {
                seed: DEFAULT_SEED,
                roster_path: None,
                player_name: DEFAULT_PLAYER_NAME.to_string(),
                house: DEFAULT_HOUSE.to_string(),
                log_level: "warn".to_string(),
            }
        }
    }
}
