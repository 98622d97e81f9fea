//! # Outcome Evaluation
//!
//! Classifies an encounter from the two combatant states alone.

use crate::game::combatant::Combatant;
use serde::{Deserialize, Serialize};

/// Where an encounter stands after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Neither side has fallen
    Continue,
    /// The enemy fell and the player is still standing
    Win,
    /// The player fell
    Loss,
}

impl Outcome {
    /// Whether the encounter is over.
    pub fn is_terminal(self) -> bool {
        self != Outcome::Continue
    }
}

/// Classifies the encounter.
///
/// Player defeat is checked first, so a round that drops both sides is a
/// loss.
///
/// # Examples
///
/// ```
/// use spellduel::{evaluate, Combatant, Outcome};
///
/// let player = Combatant::new("Ada", "Ember", 10).with_health(0);
/// let enemy = Combatant::new("Morgan", "Tide", 10).with_health(0);
/// assert_eq!(evaluate(&player, &enemy), Outcome::Loss);
/// ```
pub fn evaluate(player: &Combatant, enemy: &Combatant) -> Outcome {
    if player.is_defeated() {
        Outcome::Loss
    } else if enemy.is_defeated() {
        Outcome::Win
    } else {
        Outcome::Continue
    }
}
