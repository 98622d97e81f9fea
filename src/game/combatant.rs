//! # Combatant State
//!
//! One character's battle attributes (health, level, deck, guard) and
//! campaign attributes (house, defeated opponents).

use crate::config::HEALTH_PER_LEVEL;
use crate::game::actions::{sort_deck, strongest_of_kind, Spell, SpellKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Transient battle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// No effect active
    #[default]
    Ready,
    /// Halves the next incoming spell; cleared when the combatant next acts
    Guarding,
}

/// Mutable state of one duellist.
///
/// Health never goes below zero, and zero health means defeat. Level never
/// decreases, and each opponent name is recorded at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Name, unique within a roster
    pub name: String,
    /// House (faction); fixed for the combatant's lifetime
    pub house: String,
    /// Current health
    pub health: u32,
    /// Health ceiling for healing
    pub max_health: u32,
    /// Experience level, starting at 1
    pub level: u32,
    /// Available spells in deck order
    pub deck: Vec<Spell>,
    /// Names of opponents beaten this campaign
    pub defeated: BTreeSet<String>,
    /// Current guard status
    pub status: Status,
}

impl Combatant {
    /// Creates a fully healthy level 1 combatant.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellduel::Combatant;
    ///
    /// let wizard = Combatant::new("Ada", "Ember", 40);
    /// assert_eq!(wizard.health, 40);
    /// assert_eq!(wizard.level, 1);
    /// assert!(!wizard.is_defeated());
    /// ```
    pub fn new(name: &str, house: &str, max_health: u32) -> Self {
        Self {
            name: name.to_string(),
            house: house.to_string(),
            health: max_health,
            max_health,
            level: 1,
            deck: Vec::new(),
            defeated: BTreeSet::new(),
            status: Status::Ready,
        }
    }

    /// Replaces the deck, keeping it in canonical order.
    pub fn with_deck(mut self, mut deck: Vec<Spell>) -> Self {
        sort_deck(&mut deck);
        self.deck = deck;
        self
    }

    /// Sets the level without changing health.
    pub fn at_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    /// Sets current health, clamped to the maximum.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    /// Reduces health, stopping at zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restores health, capped at `max_health`.
    ///
    /// Returns the amount actually restored.
    pub fn apply_heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Gains one level: the health ceiling and current health both rise by
    /// [`HEALTH_PER_LEVEL`]. No stat ever goes down.
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.max_health = self.max_health.saturating_add(HEALTH_PER_LEVEL);
        self.health = self
            .health
            .saturating_add(HEALTH_PER_LEVEL)
            .min(self.max_health);
    }

    /// Records a beaten opponent. Recording the same name twice is a no-op.
    ///
    /// Returns `true` if the name was new.
    pub fn record_defeat(&mut self, opponent_name: &str) -> bool {
        self.defeated.insert(opponent_name.to_string())
    }

    /// Whether the combatant has been beaten.
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Whether `opponent_name` has already been beaten.
    pub fn has_defeated(&self, opponent_name: &str) -> bool {
        self.defeated.contains(opponent_name)
    }

    /// Adds spells missing from the deck. Nothing is ever removed.
    ///
    /// Returns the names of the newly learnt spells.
    pub fn learn(&mut self, spells: impl IntoIterator<Item = Spell>) -> Vec<String> {
        let mut learnt = Vec::new();
        for spell in spells {
            if !self.deck.iter().any(|known| known.name == spell.name) {
                learnt.push(spell.name.clone());
                self.deck.push(spell);
            }
        }
        sort_deck(&mut self.deck);
        learnt
    }

    /// Heals to full and drops any guard. Used when an encounter starts.
    pub fn restore(&mut self) {
        self.health = self.max_health;
        self.status = Status::Ready;
    }

    /// Whether the combatant can take a turn at all.
    pub fn can_act(&self) -> bool {
        !self.is_defeated() && !self.deck.is_empty()
    }

    /// The spell a command of `kind` would cast.
    pub fn spell_for(&self, kind: SpellKind) -> Option<&Spell> {
        strongest_of_kind(&self.deck, kind)
    }

    /// Whether a guard is up.
    pub fn is_guarding(&self) -> bool {
        self.status == Status::Guarding
    }
}
