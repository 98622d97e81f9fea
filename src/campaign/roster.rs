//! # Roster Loading
//!
//! The immutable opponent catalog and spell list, read from JSON. Malformed
//! data is reported as [`DuelError::Setup`] (or [`DuelError::Serde`] for
//! JSON that does not parse) so the caller can offer another attempt.

use crate::config::{HEALTH_PER_LEVEL, ROSTER_SCHEMA_VERSION};
use crate::game::{Combatant, Spell, SpellCatalog};
use crate::{DuelError, DuelResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// The roster shipped with the game.
const BUILTIN_ROSTER: &str = include_str!("../../data/roster.json");

/// Canonical stats of one opponent, before level scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentTemplate {
    /// Unique name
    pub name: String,
    /// House, which selects the opponent's spells
    pub house: String,
    /// Health at level 1
    pub health: u32,
    /// Levels above (or below) the player's level at which the opponent fights
    #[serde(default)]
    pub level_offset: i32,
    /// Flavour text for the selection menu
    #[serde(default)]
    pub description: String,
}

/// On-disk layout of a roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterFile {
    version: u32,
    spells: Vec<Spell>,
    opponents: Vec<OpponentTemplate>,
}

/// Opponents plus the spell catalog. Never changes once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    opponents: Vec<OpponentTemplate>,
    catalog: SpellCatalog,
}

impl Roster {
    /// Builds a roster, checking that every opponent is usable.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::Setup`] for an empty roster, blank or duplicate
    /// names, zero health, or a house without an opening attack spell.
    pub fn new(opponents: Vec<OpponentTemplate>, catalog: SpellCatalog) -> DuelResult<Self> {
        if opponents.is_empty() {
            return Err(DuelError::Setup("roster has no opponents".to_string()));
        }

        let mut names = BTreeSet::new();
        for opponent in &opponents {
            let name = opponent.name.trim();
            if name.is_empty() {
                return Err(DuelError::Setup("opponent with an empty name".to_string()));
            }
            if !names.insert(name.to_lowercase()) {
                return Err(DuelError::Setup(format!("duplicate opponent '{}'", name)));
            }
            if opponent.health == 0 {
                return Err(DuelError::Setup(format!("opponent '{}' has no health", name)));
            }
            catalog.validate_house(&opponent.house)?;
        }

        Ok(Self { opponents, catalog })
    }

    /// Parses a roster from JSON text.
    pub fn from_json(json: &str) -> DuelResult<Self> {
        let file: RosterFile = serde_json::from_str(json)?;
        if file.version != ROSTER_SCHEMA_VERSION {
            return Err(DuelError::Setup(format!(
                "unsupported roster version {} (expected {})",
                file.version, ROSTER_SCHEMA_VERSION
            )));
        }
        let catalog = SpellCatalog::new(file.spells)?;
        let roster = Self::new(file.opponents, catalog)?;
        debug!(
            "roster parsed: {} opponents, {} spells",
            roster.opponents.len(),
            roster.catalog.spells().len()
        );
        Ok(roster)
    }

    /// Reads and parses a roster file.
    pub fn load(path: impl AsRef<Path>) -> DuelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let roster = Self::from_json(&json)?;
        info!("Loaded roster from {}", path.display());
        Ok(roster)
    }

    /// The roster shipped with the game.
    pub fn builtin() -> DuelResult<Self> {
        Self::from_json(BUILTIN_ROSTER)
    }

    /// Serialises the roster back to JSON.
    pub fn to_json(&self) -> DuelResult<String> {
        let file = RosterFile {
            version: ROSTER_SCHEMA_VERSION,
            spells: self.catalog.spells().to_vec(),
            opponents: self.opponents.clone(),
        };
        serde_json::to_string_pretty(&file).map_err(DuelError::from)
    }

    /// All opponents in roster order.
    pub fn opponents(&self) -> &[OpponentTemplate] {
        &self.opponents
    }

    /// The spell catalog.
    pub fn catalog(&self) -> &SpellCatalog {
        &self.catalog
    }

    /// Looks an opponent up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&OpponentTemplate> {
        let name = name.trim();
        self.opponents
            .iter()
            .find(|opponent| opponent.name.eq_ignore_ascii_case(name))
    }

    /// Derives a fresh, battle-ready opponent for a player at `player_level`.
    ///
    /// The opponent fights at the player's level plus its offset (never below
    /// 1), with health and deck scaled to that level. `house` selects the
    /// deck; the campaign passes the opponent's own house.
    pub fn combatant_for(&self, name: &str, house: &str, player_level: u32) -> DuelResult<Combatant> {
        let template = self
            .get(name)
            .ok_or_else(|| DuelError::InvalidState(format!("no opponent named '{}'", name)))?;

        let level = (i64::from(player_level) + i64::from(template.level_offset)).max(1);
        let level = u32::try_from(level).unwrap_or(u32::MAX);
        let max_health = template
            .health
            .saturating_add(HEALTH_PER_LEVEL.saturating_mul(level - 1));
        let deck = self.catalog.deck_for(house, level);
        if deck.is_empty() {
            return Err(DuelError::Setup(format!("house '{}' has no spells", house)));
        }

        Ok(Combatant::new(&template.name, house, max_health)
            .at_level(level)
            .with_deck(deck))
    }
}
