//! # Display Management
//!
//! Terminal output for the game, plus a headless display that keeps a
//! transcript.

use crate::config::MAX_MESSAGES;
use crate::game::Combatant;
use crate::rendering::ui::status_line;
use crate::rendering::BattleDisplay;
use log::warn;
use std::collections::VecDeque;
use std::io::Write;

/// Terminal display writing plain text to any writer.
///
/// Write failures are logged and otherwise ignored.
pub struct TerminalDisplay<W: Write> {
    out: W,
    /// Message history, newest last
    pub messages: VecDeque<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl TerminalDisplay<std::io::Stdout> {
    /// Creates a display on the process's stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Creates a display writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            messages: VecDeque::new(),
            max_messages: MAX_MESSAGES,
        }
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("display write failed: {}", e);
        }
    }
}

impl<W: Write> BattleDisplay for TerminalDisplay<W> {
    fn add_message(&mut self, text: String) {
        self.write_line(&text);
        self.messages.push_back(text);
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
    }

    fn render_status(&mut self, player: &Combatant, enemy: &Combatant, round: u32) {
        self.write_line(&format!("\n-- Round {} --", round));
        self.write_line(&status_line(player));
        self.write_line(&status_line(enemy));
    }
}

/// Headless display that records every line it is given.
#[derive(Debug, Clone, Default)]
pub struct TranscriptDisplay {
    /// Everything rendered, in order
    pub lines: Vec<String>,
    /// Number of status renders
    pub status_renders: usize,
}

impl TranscriptDisplay {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl BattleDisplay for TranscriptDisplay {
    fn add_message(&mut self, text: String) {
        self.lines.push(text);
    }

    fn render_status(&mut self, player: &Combatant, enemy: &Combatant, _round: u32) {
        self.status_renders += 1;
        self.lines.push(status_line(player));
        self.lines.push(status_line(enemy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_terminal_display_writes_and_keeps_history() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.max_messages = 2;
        for text in ["one", "two", "three"] {
            display.add_message(text.to_string());
        }
        assert_eq!(display.messages, vec!["two", "three"]);
        let written = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(written, "one\ntwo\nthree\n");
    }

    #[test]
    fn test_write_failure_does_not_panic() {
        let mut display = TerminalDisplay::new(BrokenPipe);
        display.add_message("lost".to_string());
        display.render_status(
            &Combatant::new("Ada", "Ember", 10),
            &Combatant::new("Morgan", "Tide", 10),
            1,
        );
        assert_eq!(display.messages.len(), 1);
    }

    #[test]
    fn test_transcript_records_status() {
        let mut display = TranscriptDisplay::new();
        display.render_status(
            &Combatant::new("Ada", "Ember", 10),
            &Combatant::new("Morgan", "Tide", 10),
            1,
        );
        assert_eq!(display.status_renders, 1);
        assert!(display.contains("Morgan"));
    }
}
