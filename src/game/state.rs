//! # Campaign Statistics
//!
//! Running totals for the player's campaign, fed from turn events.

use crate::game::resolver::TurnEvent;
use serde::{Deserialize, Serialize};

/// Statistics tracking the player's progress across encounters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStatistics {
    /// Number of encounters won
    pub encounters_won: u32,
    /// Rounds resolved across all encounters
    pub rounds_played: u64,
    /// Damage the player's spells dealt
    pub damage_dealt: u64,
    /// Damage the player took, including backlash
    pub damage_taken: u64,
    /// Spells the player cast
    pub spells_cast: u64,
}

impl CampaignStatistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics from one event, seen from `player`'s side.
    pub fn update_from_event(&mut self, player: &str, event: &TurnEvent) {
        match event {
            TurnEvent::SpellCast { caster, .. } if caster == player => {
                self.spells_cast += 1;
            }
            TurnEvent::Damaged { target, amount, .. } => {
                if target == player {
                    self.damage_taken += u64::from(*amount);
                } else {
                    self.damage_dealt += u64::from(*amount);
                }
            }
            TurnEvent::Backlash { caster, amount, .. } if caster == player => {
                self.damage_taken += u64::from(*amount);
            }
            _ => {}
        }
    }

    /// Adds another set of totals into this one.
    pub fn merge(&mut self, other: &CampaignStatistics) {
        self.encounters_won += other.encounters_won;
        self.rounds_played += other.rounds_played;
        self.damage_dealt += other.damage_dealt;
        self.damage_taken += other.damage_taken;
        self.spells_cast += other.spells_cast;
    }

    /// Counts one resolved round and folds in its events.
    pub fn record_round(&mut self, player: &str, events: &[TurnEvent]) {
        self.rounds_played += 1;
        for event in events {
            self.update_from_event(player, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SpellKind;

    #[test]
    fn test_statistics_update() {
        let mut stats = CampaignStatistics::new();
        let events = vec![
            TurnEvent::SpellCast {
                caster: "Ada".to_string(),
                spell: "Nova".to_string(),
                kind: SpellKind::Special,
            },
            TurnEvent::Damaged {
                target: "Morgan".to_string(),
                amount: 20,
                remaining: 5,
            },
            TurnEvent::Backlash {
                caster: "Ada".to_string(),
                amount: 5,
                remaining: 30,
            },
            TurnEvent::SpellCast {
                caster: "Morgan".to_string(),
                spell: "Splash".to_string(),
                kind: SpellKind::Attack,
            },
            TurnEvent::Damaged {
                target: "Ada".to_string(),
                amount: 4,
                remaining: 26,
            },
        ];
        stats.record_round("Ada", &events);

        assert_eq!(stats.rounds_played, 1);
        assert_eq!(stats.spells_cast, 1);
        assert_eq!(stats.damage_dealt, 20);
        assert_eq!(stats.damage_taken, 9);
    }

    #[test]
    fn test_merge_adds_totals() {
        let mut total = CampaignStatistics {
            encounters_won: 1,
            rounds_played: 4,
            ..CampaignStatistics::default()
        };
        let encounter = CampaignStatistics {
            rounds_played: 3,
            damage_dealt: 40,
            ..CampaignStatistics::default()
        };
        total.merge(&encounter);
        assert_eq!(total.encounters_won, 1);
        assert_eq!(total.rounds_played, 7);
        assert_eq!(total.damage_dealt, 40);
    }
}
