//! # Campaign Module
//!
//! The roster of opponents and the player's progression across encounters.
//!
//! The campaign owns the player between encounters. Each battle gets a copy,
//! and the campaign takes the updated player back only on a win, so a loss
//! or a quit never leaks half-finished state into the campaign.

pub mod roster;

pub use roster::*;

use crate::config::{DEFAULT_SEED, PLAYER_BASE_HEALTH};
use crate::game::{Battle, CampaignStatistics, Combatant, TurnResolver};
use crate::{DuelError, DuelResult};
use log::info;

/// One player's run through the roster.
#[derive(Debug, Clone)]
pub struct Campaign {
    roster: Roster,
    player: Combatant,
    statistics: CampaignStatistics,
    seed: u64,
    encounters_started: u64,
}

impl Campaign {
    /// Creates a campaign for a new level 1 player.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::Setup`] for a blank name, a name an opponent
    /// already has, or a house the catalog cannot equip.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellduel::{Campaign, Roster};
    ///
    /// let campaign = Campaign::new(Roster::builtin().unwrap(), "Ada", "Ember").unwrap();
    /// assert_eq!(campaign.player().level, 1);
    /// assert!(!campaign.is_complete());
    /// ```
    pub fn new(roster: Roster, player_name: &str, house: &str) -> DuelResult<Self> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(DuelError::Setup("the player needs a name".to_string()));
        }
        if roster.get(player_name).is_some() {
            return Err(DuelError::Setup(format!(
                "'{}' is already an opponent's name",
                player_name
            )));
        }
        roster.catalog().validate_house(house)?;

        let deck = roster.catalog().deck_for(house, 1);
        let player = Combatant::new(player_name, house, PLAYER_BASE_HEALTH).with_deck(deck);
        info!("Campaign started for {} of house {}", player.name, player.house);

        Ok(Self {
            roster,
            player,
            statistics: CampaignStatistics::new(),
            seed: DEFAULT_SEED,
            encounters_started: 0,
        })
    }

    /// Sets the seed for opponents' tactics.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The player as of the last completed encounter.
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Totals across all won encounters.
    pub fn statistics(&self) -> &CampaignStatistics {
        &self.statistics
    }

    /// Opponents the player has not beaten yet, in roster order.
    pub fn remaining_opponents(&self) -> Vec<&OpponentTemplate> {
        self.roster
            .opponents()
            .iter()
            .filter(|opponent| !self.player.has_defeated(&opponent.name))
            .collect()
    }

    /// Resolves a menu choice: a 1-based index into the remaining opponents,
    /// or a name (ignoring case).
    pub fn find_opponent(&self, choice: &str) -> Option<&OpponentTemplate> {
        let choice = choice.trim();
        let remaining = self.remaining_opponents();
        if let Ok(index) = choice.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|index| remaining.get(index).copied());
        }
        remaining
            .into_iter()
            .find(|opponent| opponent.name.eq_ignore_ascii_case(choice))
    }

    /// Whether every opponent has been beaten.
    pub fn is_complete(&self) -> bool {
        self.remaining_opponents().is_empty()
    }

    /// Starts an encounter using the standard resolver.
    pub fn start_encounter(&mut self, opponent_name: &str) -> DuelResult<Battle> {
        let resolver = TurnResolver::standard(self.seed.wrapping_add(self.encounters_started));
        self.start_encounter_with(opponent_name, resolver)
    }

    /// Starts an encounter against a fresh copy of the named opponent.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::InvalidState`] for an unknown or already beaten
    /// opponent.
    pub fn start_encounter_with(
        &mut self,
        opponent_name: &str,
        resolver: TurnResolver,
    ) -> DuelResult<Battle> {
        let template = self.roster.get(opponent_name).ok_or_else(|| {
            DuelError::InvalidState(format!("no opponent named '{}'", opponent_name))
        })?;
        if self.player.has_defeated(&template.name) {
            return Err(DuelError::InvalidState(format!(
                "{} has already been defeated",
                template.name
            )));
        }

        let enemy = self
            .roster
            .combatant_for(&template.name, &template.house, self.player.level)?;
        self.encounters_started += 1;
        Ok(Battle::new(self.player.clone(), enemy, resolver))
    }

    /// Takes back the player after a won encounter and teaches any spells
    /// the new level unlocks.
    ///
    /// Returns the names of the new spells.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::InvalidState`] if `player` is not this
    /// campaign's player.
    pub fn record_victory(
        &mut self,
        mut player: Combatant,
        encounter: &CampaignStatistics,
    ) -> DuelResult<Vec<String>> {
        if player.name != self.player.name || player.house != self.player.house {
            return Err(DuelError::InvalidState(format!(
                "{} is not this campaign's player",
                player.name
            )));
        }

        let learnt = player.learn(self.roster.catalog().deck_for(&player.house, player.level));
        self.statistics.merge(encounter);
        self.statistics.encounters_won += 1;
        self.player = player;

        info!(
            "{} is now level {} with {} of {} opponents beaten",
            self.player.name,
            self.player.level,
            self.player.defeated.len(),
            self.roster.opponents().len()
        );
        Ok(learnt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EncounterResult, ScriptedTactics, SpellKind, StandardPolicy};

    fn campaign() -> Campaign {
        Campaign::new(Roster::builtin().unwrap(), "Ada", "Ember").unwrap()
    }

    fn win(campaign: &mut Campaign, opponent: &str) {
        let resolver = TurnResolver::new(
            Box::new(StandardPolicy::default()),
            Box::new(ScriptedTactics::new([SpellKind::Defend; 64])),
        );
        let mut battle = campaign.start_encounter_with(opponent, resolver).unwrap();
        while battle.outcome() == crate::Outcome::Continue {
            battle.submit("attack").unwrap();
        }
        match battle.finish().unwrap() {
            EncounterResult::Won { player, statistics } => {
                campaign.record_victory(player, &statistics).unwrap();
            }
            other => panic!("expected a win, got {:?}", other),
        }
    }

    #[test]
    fn test_new_player_gets_opening_deck() {
        let campaign = campaign();
        assert_eq!(campaign.player().health, PLAYER_BASE_HEALTH);
        assert!(campaign.player().can_act());
        assert_eq!(
            campaign.remaining_opponents().len(),
            campaign.roster().opponents().len()
        );
    }

    #[test]
    fn test_setup_rejects_blank_name_and_unknown_house() {
        let roster = Roster::builtin().unwrap();
        assert!(matches!(
            Campaign::new(roster.clone(), "  ", "Ember"),
            Err(DuelError::Setup(_))
        ));
        // Every house can use the shared opening spells.
        assert!(Campaign::new(roster, "Ada", "Moss").is_ok());
    }

    #[test]
    fn test_setup_rejects_an_opponents_name() {
        let roster = Roster::builtin().unwrap();
        let taken = roster.opponents()[1].name.clone();
        for name in [taken.clone(), taken.to_uppercase(), format!("  {} ", taken)] {
            assert!(matches!(
                Campaign::new(roster.clone(), &name, "Ember"),
                Err(DuelError::Setup(_))
            ));
        }
    }

    #[test]
    fn test_find_opponent_by_index_and_name() {
        let campaign = campaign();
        let first = campaign.roster().opponents()[0].name.clone();
        assert_eq!(campaign.find_opponent("1").unwrap().name, first);
        assert_eq!(
            campaign.find_opponent(&first.to_uppercase()).unwrap().name,
            first
        );
        assert!(campaign.find_opponent("0").is_none());
        assert!(campaign.find_opponent("99").is_none());
        assert!(campaign.find_opponent("Nobody").is_none());
    }

    #[test]
    fn test_victory_updates_player_and_removes_opponent() {
        let mut campaign = campaign();
        let first = campaign.roster().opponents()[0].name.clone();
        win(&mut campaign, &first);

        assert_eq!(campaign.player().level, 2);
        assert!(campaign.player().has_defeated(&first));
        assert!(campaign.find_opponent(&first).is_none());
        assert_eq!(campaign.statistics().encounters_won, 1);
        assert!(campaign.player().deck.iter().any(|spell| spell.name == "Mend"));
        assert!(campaign.start_encounter(&first).is_err());
    }

    #[test]
    fn test_record_victory_rejects_strangers() {
        let mut campaign = campaign();
        let stranger = Combatant::new("Mallory", "Ember", 10);
        assert!(campaign
            .record_victory(stranger, &CampaignStatistics::new())
            .is_err());
    }

    #[test]
    fn test_campaign_completes_after_every_opponent() {
        let mut campaign = campaign();
        let names: Vec<String> = campaign
            .roster()
            .opponents()
            .iter()
            .map(|opponent| opponent.name.clone())
            .collect();
        for name in &names {
            win(&mut campaign, name);
        }
        assert!(campaign.is_complete());
        assert_eq!(campaign.player().level, 1 + names.len() as u32);
    }
}
