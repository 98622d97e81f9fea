//! # Scene Management System
//!
//! Coordinates the campaign-level scenes: choosing an opponent, fighting the
//! battle, and the game-over screen. The selection scene only decides which
//! opponent enters the battle engine; it contains no combat logic.

use crate::campaign::Campaign;
use crate::game::{EncounterResult, TurnResolver};
use crate::input::CommandSource;
use crate::rendering::BattleDisplay;
use crate::DuelResult;
use log::info;

/// How the whole session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneExit {
    /// Every opponent was defeated
    CampaignWon,
    /// The player lost an encounter
    Defeated,
    /// The player quit; nothing is accounted
    Quit,
}

/// Represents the current scene in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneType {
    /// Listing the remaining opponents and asking for a choice
    ChooseOpponent,
    /// Fighting the named opponent
    Battle(String),
    /// The session is over
    GameOver(SceneExit),
}

type ResolverFactory = Box<dyn FnMut() -> TurnResolver>;

/// The main scene manager that coordinates all game scenes
pub struct SceneManager<I: CommandSource, D: BattleDisplay> {
    current_scene: SceneType,
    campaign: Campaign,
    input: I,
    display: D,
    resolver_factory: Option<ResolverFactory>,
}

impl<I: CommandSource, D: BattleDisplay> SceneManager<I, D> {
    /// Creates a scene manager starting at opponent selection.
    pub fn new(campaign: Campaign, input: I, display: D) -> Self {
        Self {
            current_scene: SceneType::ChooseOpponent,
            campaign,
            input,
            display,
            resolver_factory: None,
        }
    }

    /// Uses `factory` for every encounter instead of the campaign's standard
    /// resolver.
    pub fn with_resolvers(mut self, factory: impl FnMut() -> TurnResolver + 'static) -> Self {
        self.resolver_factory = Some(Box::new(factory));
        self
    }

    /// The scene about to run.
    pub fn current_scene(&self) -> &SceneType {
        &self.current_scene
    }

    /// The campaign as it stands.
    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// Takes the manager apart.
    pub fn into_parts(self) -> (Campaign, I, D) {
        (self.campaign, self.input, self.display)
    }

    /// Runs scenes until the session ends.
    pub fn run(&mut self) -> DuelResult<SceneExit> {
        loop {
            let next = match &self.current_scene {
                SceneType::ChooseOpponent => self.update_choose_scene()?,
                SceneType::Battle(name) => {
                    let name = name.clone();
                    self.update_battle_scene(&name)?
                }
                SceneType::GameOver(exit) => {
                    let exit = *exit;
                    self.render_game_over(exit);
                    return Ok(exit);
                }
            };
            self.current_scene = next;
        }
    }

    fn update_choose_scene(&mut self) -> DuelResult<SceneType> {
        if self.campaign.is_complete() {
            return Ok(SceneType::GameOver(SceneExit::CampaignWon));
        }

        self.render_menu();
        let Some(line) = self.input.next_line("Choose your opponent: ")? else {
            return Ok(SceneType::GameOver(SceneExit::Quit));
        };
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("quit") {
            return Ok(SceneType::GameOver(SceneExit::Quit));
        }

        let Some(opponent) = self.campaign.find_opponent(choice) else {
            self.display
                .add_message(format!("There is no opponent '{}' left to duel.", choice));
            return Ok(SceneType::ChooseOpponent);
        };
        let name = opponent.name.clone();

        let prompt = format!("Duel {}? (y/n) ", name);
        let Some(answer) = self.input.next_line(&prompt)? else {
            return Ok(SceneType::GameOver(SceneExit::Quit));
        };
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(SceneType::Battle(name)),
            "quit" => Ok(SceneType::GameOver(SceneExit::Quit)),
            _ => Ok(SceneType::ChooseOpponent),
        }
    }

    fn update_battle_scene(&mut self, name: &str) -> DuelResult<SceneType> {
        let battle = match self.resolver_factory.as_mut() {
            Some(factory) => {
                let resolver = factory();
                self.campaign.start_encounter_with(name, resolver)?
            }
            None => self.campaign.start_encounter(name)?,
        };

        match battle.run(&mut self.input, &mut self.display)? {
            EncounterResult::Won { player, statistics } => {
                let learnt = self.campaign.record_victory(player, &statistics)?;
                let player = self.campaign.player();
                self.display.add_message(format!(
                    "{} reaches level {} ({} health).",
                    player.name, player.level, player.max_health
                ));
                if !learnt.is_empty() {
                    self.display
                        .add_message(format!("New spells learnt: {}", learnt.join(", ")));
                }
                Ok(SceneType::ChooseOpponent)
            }
            EncounterResult::Lost { statistics } => {
                info!("Campaign lost after {} rounds", statistics.rounds_played);
                Ok(SceneType::GameOver(SceneExit::Defeated))
            }
            EncounterResult::Quit => Ok(SceneType::GameOver(SceneExit::Quit)),
        }
    }

    fn render_menu(&mut self) {
        let mut text = String::from("Opponents remaining:");
        for (index, opponent) in self.campaign.remaining_opponents().iter().enumerate() {
            text.push_str(&format!(
                "\n  {}. {} of house {}",
                index + 1,
                opponent.name,
                opponent.house
            ));
            if !opponent.description.is_empty() {
                text.push_str(&format!(" - {}", opponent.description));
            }
        }
        text.push_str("\nEnter a number or name, or 'quit'.");
        self.display.add_message(text);
    }

    fn render_game_over(&mut self, exit: SceneExit) {
        let headline = match exit {
            SceneExit::CampaignWon => "Every challenger has fallen. You are the champion!",
            SceneExit::Defeated => "Game over.",
            SceneExit::Quit => return,
        };
        let stats = self.campaign.statistics();
        self.display.add_message(format!(
            "{}\nDuels won: {}  Rounds: {}  Damage dealt: {}  Damage taken: {}  Spells cast: {}",
            headline,
            stats.encounters_won,
            stats.rounds_played,
            stats.damage_dealt,
            stats.damage_taken,
            stats.spells_cast
        ));
        info!("Session ended: {:?}", exit);
    }
}
