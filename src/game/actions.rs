//! # Spells and Decks
//!
//! Spells are the actions a combatant can take. A combatant's deck is the
//! slice of the spell catalog its house and level unlock.

use crate::{DuelError, DuelResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What a spell does when cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellKind {
    /// Damages the opponent
    Attack,
    /// Damages the opponent heavily and the caster a little
    Special,
    /// Guards the caster
    Defend,
    /// Heals the caster
    Heal,
}

impl SpellKind {
    /// Whether the spell lands on the opponent rather than the caster.
    pub fn targets_opponent(self) -> bool {
        matches!(self, SpellKind::Attack | SpellKind::Special)
    }
}

impl fmt::Display for SpellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpellKind::Attack => "attack",
            SpellKind::Special => "special",
            SpellKind::Defend => "defend",
            SpellKind::Heal => "heal",
        };
        f.write_str(name)
    }
}

/// A single spell in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spell {
    /// Display name, unique within the catalog
    pub name: String,
    /// Effect category
    pub kind: SpellKind,
    /// Base strength before level scaling
    #[serde(default)]
    pub power: u32,
    /// Lowest level at which the spell joins a deck
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    /// House the spell is restricted to; `None` means every house
    #[serde(default)]
    pub house: Option<String>,
}

fn default_min_level() -> u32 {
    1
}

impl Spell {
    /// Creates an unrestricted spell.
    pub fn new(name: &str, kind: SpellKind, power: u32, min_level: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            power,
            min_level,
            house: None,
        }
    }

    /// Restricts the spell to one house.
    pub fn for_house(mut self, house: &str) -> Self {
        self.house = Some(house.to_string());
        self
    }

    /// Whether a combatant of `house` at `level` may use this spell.
    pub fn available_to(&self, house: &str, level: u32) -> bool {
        level >= self.min_level
            && self
                .house
                .as_deref()
                .map_or(true, |restricted| restricted.eq_ignore_ascii_case(house))
    }
}

/// Deck ordering: by kind, then unlock level, then name.
fn deck_order(a: &Spell, b: &Spell) -> std::cmp::Ordering {
    a.kind
        .cmp(&b.kind)
        .then(a.min_level.cmp(&b.min_level))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sorts a deck into its canonical order.
pub fn sort_deck(deck: &mut [Spell]) {
    deck.sort_by(deck_order);
}

/// Picks the spell a command of `kind` casts from `deck`: the highest power,
/// with ties going to the later-unlocked spell.
pub fn strongest_of_kind(deck: &[Spell], kind: SpellKind) -> Option<&Spell> {
    deck.iter()
        .filter(|spell| spell.kind == kind)
        .max_by(|a, b| {
            a.power
                .cmp(&b.power)
                .then(a.min_level.cmp(&b.min_level))
                .then_with(|| b.name.cmp(&a.name))
        })
}

/// The full list of spells loaded for a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCatalog {
    spells: Vec<Spell>,
}

impl SpellCatalog {
    /// Builds a catalog, rejecting empty or duplicate spell names.
    pub fn new(spells: Vec<Spell>) -> DuelResult<Self> {
        let mut seen = BTreeSet::new();
        for spell in &spells {
            let name = spell.name.trim();
            if name.is_empty() {
                return Err(DuelError::Setup("spell with an empty name".to_string()));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(DuelError::Setup(format!("duplicate spell '{}'", name)));
            }
        }
        Ok(Self { spells })
    }

    /// All spells in load order.
    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    /// Every spell available to `house` at `level`, in deck order.
    ///
    /// The result for a higher level is always a superset of the result for
    /// a lower one.
    pub fn deck_for(&self, house: &str, level: u32) -> Vec<Spell> {
        let mut deck: Vec<Spell> = self
            .spells
            .iter()
            .filter(|spell| spell.available_to(house, level))
            .cloned()
            .collect();
        sort_deck(&mut deck);
        deck
    }

    /// Checks that `house` can act from level 1 onwards.
    pub fn validate_house(&self, house: &str) -> DuelResult<()> {
        let opening = self.deck_for(house, 1);
        if opening.iter().any(|spell| spell.kind == SpellKind::Attack) {
            Ok(())
        } else {
            Err(DuelError::Setup(format!(
                "house '{}' has no level 1 attack spell",
                house
            )))
        }
    }
}
