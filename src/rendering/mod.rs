//! # Rendering Module
//!
//! The output boundary. The engine reports to a [`BattleDisplay`] and never
//! reads anything back from it; a display that fails to write must swallow
//! the failure rather than stop the game.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::{Combatant, Outcome, TurnEvent};

/// Sink for everything the player sees.
pub trait BattleDisplay {
    /// Appends a line to the message log.
    fn add_message(&mut self, text: String);

    /// Shows both duellists before the player's next command.
    fn render_status(&mut self, player: &Combatant, enemy: &Combatant, round: u32);

    /// Narrates a resolved round.
    fn render_events(&mut self, events: &[TurnEvent]) {
        for event in events {
            if let Some(text) = describe_event(event) {
                self.add_message(text);
            }
        }
    }

    /// Announces how the encounter ended.
    fn render_outcome(&mut self, outcome: Outcome, player: &Combatant, enemy: &Combatant) {
        let text = match outcome {
            Outcome::Win => format!("{} is defeated! {} wins the duel.", enemy.name, player.name),
            Outcome::Loss => format!("{} has fallen. The campaign is over.", player.name),
            Outcome::Continue => return,
        };
        self.add_message(text);
    }
}

/// Turns an event into a line of narration.
pub fn describe_event(event: &TurnEvent) -> Option<String> {
    let text = match event {
        TurnEvent::SpellCast { caster, spell, .. } => format!("{} casts {}!", caster, spell),
        TurnEvent::Damaged {
            target,
            amount,
            remaining,
        } => format!("{} takes {} damage ({} left).", target, amount, remaining),
        TurnEvent::Backlash {
            caster,
            amount,
            remaining,
        } => format!(
            "The spell recoils on {} for {} damage ({} left).",
            caster, amount, remaining
        ),
        TurnEvent::Healed {
            target,
            amount,
            health,
        } => format!("{} recovers {} health ({} now).", target, amount, health),
        TurnEvent::Guarded { caster } => format!("{} raises a guard.", caster),
        TurnEvent::HelpShown => return None,
    };
    Some(text)
}
