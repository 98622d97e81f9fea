//! # Command Definitions
//!
//! The fixed command vocabulary and the parser that turns a raw line into a
//! [`Command`]. Unknown text never becomes a `Command`; it is rejected with
//! [`InvalidCommand`] at this boundary.

use crate::game::SpellKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the command vocabulary. Adding or removing a token changes
/// which inputs are legal, so it bumps this number.
pub const VOCABULARY_VERSION: u32 = 1;

/// Every recognised token and the command it parses to.
pub const VOCABULARY: [(&str, Command); 6] = [
    ("attack", Command::Attack),
    ("special", Command::Special),
    ("defend", Command::Defend),
    ("heal", Command::Heal),
    ("help", Command::Help),
    ("quit", Command::Quit),
];

/// A typed action a combatant can invoke in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Cast the strongest attack spell at the opponent
    Attack,
    /// Cast the strongest special spell at the opponent, taking backlash
    Special,
    /// Raise a guard that halves the next incoming spell
    Defend,
    /// Cast the strongest healing spell on oneself
    Heal,
    /// Show the command list; a free action
    Help,
    /// Leave the game immediately
    Quit,
}

impl Command {
    /// Returns the canonical token for this command.
    pub fn token(self) -> &'static str {
        match self {
            Command::Attack => "attack",
            Command::Special => "special",
            Command::Defend => "defend",
            Command::Heal => "heal",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Returns the spell kind this command casts, or `None` for meta commands.
    pub fn spell_kind(self) -> Option<SpellKind> {
        match self {
            Command::Attack => Some(SpellKind::Attack),
            Command::Special => Some(SpellKind::Special),
            Command::Defend => Some(SpellKind::Defend),
            Command::Heal => Some(SpellKind::Heal),
            Command::Help | Command::Quit => None,
        }
    }

    /// Whether this command is handled outside of combat resolution.
    pub fn is_meta(self) -> bool {
        self.spell_kind().is_none()
    }

    /// One-line description used by the help text.
    pub fn describe(self) -> &'static str {
        match self {
            Command::Attack => "strike your opponent with your strongest attack spell",
            Command::Special => "cast your strongest special spell; it hurts you too",
            Command::Defend => "guard, halving the next spell that hits you",
            Command::Heal => "restore your own health",
            Command::Help => "show this list (does not use your turn)",
            Command::Quit => "leave the game at once",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Command {
    type Err = InvalidCommand;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_command(raw)
    }
}

/// Why a command was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The text is not in the vocabulary
    UnknownToken,
    /// The token is known but the actor has no spell of that kind
    NotInDeck,
}

/// A recoverable rejection of player input. The battle is left exactly as it
/// was before the attempt.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid command '{raw}': {}", describe_reason(.reason))]
pub struct InvalidCommand {
    /// The text as the player typed it
    pub raw: String,
    /// Why it was rejected
    pub reason: RejectReason,
}

fn describe_reason(reason: &RejectReason) -> &'static str {
    match reason {
        RejectReason::UnknownToken => "not a known command (type 'help')",
        RejectReason::NotInDeck => "you have no spell of that kind yet",
    }
}

impl InvalidCommand {
    /// Creates a rejection for text outside the vocabulary.
    pub fn unknown(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            reason: RejectReason::UnknownToken,
        }
    }

    /// Creates a rejection for a command the actor's deck cannot back.
    pub fn not_in_deck(command: Command) -> Self {
        Self {
            raw: command.token().to_string(),
            reason: RejectReason::NotInDeck,
        }
    }
}

/// Parses one raw line into a command.
///
/// Surrounding whitespace is ignored and tokens match regardless of ASCII
/// case. Anything else, including an empty line, is rejected.
///
/// # Examples
///
/// ```
/// use spellduel::{parse_command, Command};
///
/// assert_eq!(parse_command("Attack\n").unwrap(), Command::Attack);
/// assert!(parse_command("xyzzy").is_err());
/// ```
pub fn parse_command(raw: &str) -> Result<Command, InvalidCommand> {
    let token = raw.trim();
    VOCABULARY
        .iter()
        .find(|(word, _)| word.eq_ignore_ascii_case(token))
        .map(|(_, command)| *command)
        .ok_or_else(|| InvalidCommand::unknown(raw))
}

/// Renders the help text listing every command.
pub fn help_text() -> String {
    let mut text = String::from("Commands:");
    for (token, command) in VOCABULARY.iter() {
        text.push_str(&format!("\n  {:<8} {}", token, command.describe()));
    }
    text
}
