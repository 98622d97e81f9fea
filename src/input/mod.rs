//! # Input Module
//!
//! Command parsing and the line-based input boundary. The engine pulls at
//! most one line per prompt and never buffers ahead.

pub mod commands;

pub use commands::*;

use crate::DuelResult;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Source of raw player lines.
///
/// Returns `Ok(None)` once input is exhausted.
pub trait CommandSource {
    /// Shows `prompt` and reads one line.
    fn next_line(&mut self, prompt: &str) -> DuelResult<Option<String>>;
}

/// Input handler reading player lines from any buffered reader.
///
/// The prompt is written to `prompt_out` before each read.
pub struct InputHandler<R: BufRead, W: Write> {
    reader: R,
    prompt_out: W,
}

impl InputHandler<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Creates an input handler bound to the process's stdin and stdout.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> InputHandler<R, W> {
    /// Creates an input handler over the given reader and prompt sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use spellduel::{CommandSource, InputHandler};
    ///
    /// let mut input = InputHandler::new("attack\n".as_bytes(), Vec::new());
    /// assert_eq!(input.next_line("> ").unwrap().as_deref(), Some("attack"));
    /// assert_eq!(input.next_line("> ").unwrap(), None);
    /// ```
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> CommandSource for InputHandler<R, W> {
    fn next_line(&mut self, prompt: &str) -> DuelResult<Option<String>> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        // Bytes that are not UTF-8 become replacement characters, so the
        // parser rejects the line instead of the read failing.
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Replays a fixed sequence of lines. Used for tests and scripted demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    /// Creates a script from the given lines, consumed in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl CommandSource for ScriptedInput {
    fn next_line(&mut self, prompt: &str) -> DuelResult<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
