//! # Battle Loop
//!
//! The state machine driving one encounter. A [`Battle`] exclusively owns
//! both combatant states until it ends; the player's updated state is handed
//! back only on a win.

use crate::game::combatant::Combatant;
use crate::game::outcome::{evaluate, Outcome};
use crate::game::resolver::{TurnEvent, TurnResolver};
use crate::game::state::CampaignStatistics;
use crate::input::{help_text, parse_command, Command, CommandSource, InvalidCommand};
use crate::rendering::BattleDisplay;
use crate::{DuelError, DuelResult};
use log::{debug, info, warn};

/// Phase of the encounter state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Waiting for the player's next line
    AwaitingCommand,
    /// A command is being applied. Only held inside [`Battle::submit`], so
    /// callers never observe it.
    Resolving,
    /// The enemy fell; terminal for this encounter
    Won,
    /// The player fell; terminal for the session
    Lost,
}

/// What one submitted line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStep {
    /// A round was resolved
    Resolved {
        events: Vec<TurnEvent>,
        outcome: Outcome,
    },
    /// Help was shown; no round was spent
    Help,
    /// The line was rejected; nothing changed
    Rejected(InvalidCommand),
    /// The player asked to leave the game
    QuitRequested,
}

/// How an encounter ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncounterResult {
    /// The enemy fell. `player` has levelled up and recorded the opponent.
    Won {
        player: Combatant,
        statistics: CampaignStatistics,
    },
    /// The player fell. The campaign is over.
    Lost { statistics: CampaignStatistics },
    /// The player quit. Nothing from this encounter is kept.
    Quit,
}

/// One encounter between the player and a single opponent.
#[derive(Debug)]
pub struct Battle {
    player: Combatant,
    enemy: Combatant,
    phase: BattlePhase,
    round: u32,
    resolver: TurnResolver,
    statistics: CampaignStatistics,
}

impl Battle {
    /// Starts an encounter with both sides fully healthy.
    pub fn new(mut player: Combatant, mut enemy: Combatant, resolver: TurnResolver) -> Self {
        player.restore();
        enemy.restore();
        Self {
            player,
            enemy,
            phase: BattlePhase::AwaitingCommand,
            round: 0,
            resolver,
            statistics: CampaignStatistics::new(),
        }
    }

    /// The player's current state.
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// The opponent's current state.
    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    /// The current phase.
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Rounds resolved so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Statistics gathered during this encounter.
    pub fn statistics(&self) -> &CampaignStatistics {
        &self.statistics
    }

    /// Classifies the encounter as it stands.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.player, &self.enemy)
    }

    /// Performs one Awaiting-Command transition for the raw line.
    ///
    /// A rejected line leaves the battle exactly as it was. A quit request is
    /// reported without touching either side.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::InvalidState`] if the battle has already ended.
    pub fn submit(&mut self, raw: &str) -> DuelResult<BattleStep> {
        if self.phase != BattlePhase::AwaitingCommand {
            return Err(DuelError::InvalidState(format!(
                "battle already ended ({:?})",
                self.phase
            )));
        }

        let command = match parse_command(raw) {
            Ok(command) => command,
            Err(rejected) => {
                warn!("{}", rejected);
                return Ok(BattleStep::Rejected(rejected));
            }
        };
        if command == Command::Quit {
            info!("{} quit during round {}", self.player.name, self.round + 1);
            return Ok(BattleStep::QuitRequested);
        }

        self.phase = BattlePhase::Resolving;
        let turn = match self.resolver.resolve(command, &self.player, &self.enemy) {
            Ok(turn) => turn,
            Err(rejected) => {
                warn!("{}", rejected);
                self.phase = BattlePhase::AwaitingCommand;
                return Ok(BattleStep::Rejected(rejected));
            }
        };
        if !turn.consumed {
            self.phase = BattlePhase::AwaitingCommand;
            return Ok(BattleStep::Help);
        }

        self.player = turn.actor;
        self.enemy = turn.opponent;
        self.round += 1;
        self.statistics.record_round(&self.player.name, &turn.events);

        let outcome = self.outcome();
        debug!(
            "round {}: {} {}hp, {} {}hp -> {:?}",
            self.round,
            self.player.name,
            self.player.health,
            self.enemy.name,
            self.enemy.health,
            outcome
        );
        self.phase = match outcome {
            Outcome::Continue => BattlePhase::AwaitingCommand,
            Outcome::Win => BattlePhase::Won,
            Outcome::Loss => BattlePhase::Lost,
        };

        Ok(BattleStep::Resolved {
            events: turn.events,
            outcome,
        })
    }

    /// Runs the encounter to its end.
    ///
    /// Each iteration renders the status, reads one line and submits it.
    /// Running out of input counts as quitting.
    pub fn run(
        mut self,
        input: &mut dyn CommandSource,
        display: &mut dyn BattleDisplay,
    ) -> DuelResult<EncounterResult> {
        info!(
            "Encounter: {} (level {}) vs {} (level {})",
            self.player.name, self.player.level, self.enemy.name, self.enemy.level
        );
        display.add_message(format!(
            "{} of house {} steps forward. Type 'help' for commands.",
            self.enemy.name, self.enemy.house
        ));

        loop {
            display.render_status(&self.player, &self.enemy, self.round + 1);
            let Some(line) = input.next_line("> ")? else {
                info!("Input closed; leaving the game");
                return Ok(EncounterResult::Quit);
            };

            match self.submit(&line)? {
                BattleStep::Resolved { events, outcome } => {
                    display.render_events(&events);
                    if outcome.is_terminal() {
                        display.render_outcome(outcome, &self.player, &self.enemy);
                        return self.finish();
                    }
                }
                BattleStep::Help => display.add_message(help_text()),
                BattleStep::Rejected(rejected) => display.add_message(rejected.to_string()),
                BattleStep::QuitRequested => return Ok(EncounterResult::Quit),
            }
        }
    }

    /// Converts a finished battle into its result. On a win the player levels
    /// up and records the opponent.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::InvalidState`] if the battle is still running.
    pub fn finish(self) -> DuelResult<EncounterResult> {
        match self.phase {
            BattlePhase::Won => {
                let mut player = self.player;
                player.level_up();
                player.record_defeat(&self.enemy.name);
                info!(
                    "{} defeated {} and reached level {}",
                    player.name, self.enemy.name, player.level
                );
                Ok(EncounterResult::Won {
                    player,
                    statistics: self.statistics,
                })
            }
            BattlePhase::Lost => {
                info!("{} was defeated by {}", self.player.name, self.enemy.name);
                Ok(EncounterResult::Lost {
                    statistics: self.statistics,
                })
            }
            phase => Err(DuelError::InvalidState(format!(
                "battle has not ended ({:?})",
                phase
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ScriptedTactics, Spell, SpellKind, StandardPolicy};
    use crate::input::RejectReason;

    fn battle(player_health: u32, enemy_health: u32) -> Battle {
        let deck = vec![
            Spell::new("Spark", SpellKind::Attack, 10, 1),
            Spell::new("Ward", SpellKind::Defend, 0, 1),
        ];
        let resolver = TurnResolver::new(
            Box::new(StandardPolicy::default()),
            Box::new(ScriptedTactics::new([SpellKind::Defend; 8])),
        );
        Battle::new(
            Combatant::new("Ada", "Ember", player_health).with_deck(deck.clone()),
            Combatant::new("Morgan", "Tide", enemy_health).with_deck(deck),
            resolver,
        )
    }

    #[test]
    fn test_new_battle_awaits_command() {
        let battle = battle(30, 30);
        assert_eq!(battle.phase(), BattlePhase::AwaitingCommand);
        assert_eq!(battle.round(), 0);
        assert_eq!(battle.outcome(), Outcome::Continue);
    }

    #[test]
    fn test_rejected_line_changes_nothing() {
        let mut battle = battle(30, 30);
        let before = (battle.player().clone(), battle.enemy().clone());
        let step = battle.submit("xyzzy").unwrap();
        assert!(matches!(step, BattleStep::Rejected(ref e) if e.reason == RejectReason::UnknownToken));
        assert_eq!((battle.player().clone(), battle.enemy().clone()), before);
        assert_eq!(battle.phase(), BattlePhase::AwaitingCommand);
        assert_eq!(battle.round(), 0);
    }

    #[test]
    fn test_not_in_deck_changes_nothing() {
        let mut battle = battle(30, 30);
        let step = battle.submit("heal").unwrap();
        assert!(matches!(step, BattleStep::Rejected(ref e) if e.reason == RejectReason::NotInDeck));
        assert_eq!(battle.phase(), BattlePhase::AwaitingCommand);
        assert_eq!(battle.round(), 0);
    }

    #[test]
    fn test_help_does_not_spend_a_round() {
        let mut battle = battle(30, 30);
        assert_eq!(battle.submit("help").unwrap(), BattleStep::Help);
        assert_eq!(battle.round(), 0);
        assert_eq!(battle.player().health, 30);
    }

    #[test]
    fn test_win_levels_up_and_records() {
        let mut battle = battle(30, 10);
        let step = battle.submit("attack").unwrap();
        assert!(matches!(step, BattleStep::Resolved { outcome: Outcome::Win, .. }));
        assert_eq!(battle.phase(), BattlePhase::Won);
        assert!(battle.submit("attack").is_err());

        match battle.finish().unwrap() {
            EncounterResult::Won { player, statistics } => {
                assert_eq!(player.level, 2);
                assert!(player.has_defeated("Morgan"));
                assert_eq!(statistics.damage_dealt, 10);
            }
            other => panic!("expected a win, got {:?}", other),
        }
    }

    #[test]
    fn test_finish_before_end_is_an_error() {
        assert!(battle(30, 30).finish().is_err());
    }

    #[test]
    fn test_quit_leaves_state_untouched() {
        let mut battle = battle(30, 30);
        assert_eq!(battle.submit("QUIT").unwrap(), BattleStep::QuitRequested);
        assert_eq!(battle.player().health, 30);
        assert_eq!(battle.round(), 0);
    }
}
