//! # Spellduel Main Entry Point
//!
//! Reads configuration, sets up logging, loads the roster and runs the
//! campaign in the terminal.

use clap::Parser;
use log::{error, info};
use spellduel::config::{DuelConfig, DEFAULT_PLAYER_NAME};
use spellduel::{
    Campaign, CommandSource, DuelError, DuelResult, InputHandler, Roster, SceneExit,
    SceneManager, TerminalDisplay,
};
use std::path::PathBuf;

/// Command line arguments for Spellduel.
#[derive(Parser, Debug)]
#[command(name = "spellduel")]
#[command(about = "A turn-based text spell duelling game")]
#[command(version)]
struct Args {
    /// Random seed for opponents' tactics
    #[arg(short, long)]
    seed: Option<u64>,

    /// Roster file to use instead of the built-in roster
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Name of your wizard
    #[arg(short, long)]
    name: Option<String>,

    /// House of your wizard (Ember, Tide, Gale, Stone)
    #[arg(long)]
    house: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Applies any flags given on the command line over `config`.
    fn apply(self, mut config: DuelConfig) -> DuelConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(roster) = self.roster {
            config.roster_path = Some(roster);
        }
        if let Some(name) = self.name {
            config.player_name = name;
        }
        if let Some(house) = self.house {
            config.house = house;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        config
    }
}

fn main() -> DuelResult<()> {
    let config = Args::parse().apply(DuelConfig::from_env());

    initialize_logging(&config.log_level)?;

    info!("Starting Spellduel v{}", spellduel::VERSION);

    let mut input = InputHandler::stdin();
    let Some(campaign) = set_up_campaign(&config, &mut input)? else {
        std::process::exit(0);
    };

    let mut scenes = SceneManager::new(campaign, input, TerminalDisplay::stdout());
    match scenes.run()? {
        SceneExit::Quit => {
            info!("Player quit the game");
            std::process::exit(0);
        }
        exit => {
            info!("Game ended: {:?}", exit);
            Ok(())
        }
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> DuelResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
            .with_target(false)
            .try_init()
            .map_err(|e| DuelError::InvalidState(e.to_string()))?;
        tracing::debug!("tracing subscriber installed at '{}'", log_level);
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_target(false)
            .try_init()
            .map_err(|e| DuelError::InvalidState(e.to_string()))?;
    }

    Ok(())
}

/// Loads the roster and creates the player, asking again after any setup
/// failure. Returns `None` if the player gives up.
fn set_up_campaign(
    config: &DuelConfig,
    input: &mut dyn CommandSource,
) -> DuelResult<Option<Campaign>> {
    let mut roster_path = config.roster_path.clone();
    let mut house = config.house.clone();
    let mut player_name = match config.player_name.trim() {
        "" => DEFAULT_PLAYER_NAME.to_string(),
        name => name.to_string(),
    };

    loop {
        let roster = match &roster_path {
            Some(path) => Roster::load(path),
            None => Roster::builtin(),
        };
        let roster = match roster {
            Ok(roster) => roster,
            Err(e) => {
                error!("Roster setup failed: {}", e);
                println!("Could not load the roster: {}", e);
                let prompt = "Roster file ('default' for the built-in roster, 'quit' to exit): ";
                let Some(answer) = input.next_line(prompt)? else {
                    return Ok(None);
                };
                let answer = answer.trim();
                if answer.eq_ignore_ascii_case("quit") {
                    return Ok(None);
                }
                roster_path = if answer.is_empty() || answer.eq_ignore_ascii_case("default") {
                    None
                } else {
                    Some(PathBuf::from(answer))
                };
                continue;
            }
        };

        let name_taken = roster.get(&player_name).is_some();
        match Campaign::new(roster, &player_name, &house) {
            Ok(campaign) => return Ok(Some(campaign.with_seed(config.seed))),
            Err(e) => {
                error!("Campaign setup failed: {}", e);
                println!("Could not start the campaign: {}", e);
                let prompt = if name_taken {
                    "Choose another name ('quit' to exit): "
                } else {
                    "Choose another house ('quit' to exit): "
                };
                let Some(answer) = input.next_line(prompt)? else {
                    return Ok(None);
                };
                let answer = answer.trim();
                if answer.eq_ignore_ascii_case("quit") {
                    return Ok(None);
                }
                if name_taken && answer.is_empty() {
                    player_name = DEFAULT_PLAYER_NAME.to_string();
                } else if name_taken {
                    player_name = answer.to_string();
                } else {
                    house = answer.to_string();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellduel::ScriptedInput;

    fn config_with_missing_roster() -> DuelConfig {
        DuelConfig {
            roster_path: Some(PathBuf::from("/nonexistent/spellduel/roster.json")),
            ..DuelConfig::default()
        }
    }

    #[test]
    fn test_setup_quit_ignores_case() {
        let mut input = ScriptedInput::new(["QUIT"]);
        let campaign = set_up_campaign(&config_with_missing_roster(), &mut input).unwrap();
        assert!(campaign.is_none());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_setup_falls_back_to_builtin_roster() {
        let mut input = ScriptedInput::new(["Default"]);
        let campaign = set_up_campaign(&config_with_missing_roster(), &mut input)
            .unwrap()
            .unwrap();
        assert_eq!(campaign.roster(), &Roster::builtin().unwrap());
    }

    #[test]
    fn test_setup_asks_again_for_a_taken_name() {
        let roster = Roster::builtin().unwrap();
        let config = DuelConfig {
            player_name: roster.opponents()[0].name.to_uppercase(),
            ..DuelConfig::default()
        };
        let mut input = ScriptedInput::new(["Ada"]);
        let campaign = set_up_campaign(&config, &mut input).unwrap().unwrap();
        assert_eq!(campaign.player().name, "Ada");
        assert_eq!(input.prompts().len(), 1);
    }
}
