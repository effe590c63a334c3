//! Standard input/output battle collaborator.
use std::io::{BufRead, Write};

use legends_core::BattleIo;

/// Reads hero choices from stdin and writes battle text to stdout.
pub struct TerminalIo {
    input: std::io::StdinLock<'static>,
    output: std::io::Stdout,
}

impl TerminalIo {
    pub fn new() -> Self {
        Self {
            input: std::io::stdin().lock(),
            output: std::io::stdout(),
        }
    }
}

impl Default for TerminalIo {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleIo for TerminalIo {
    fn print(&mut self, text: &str) {
        // Prompts must show before blocking on input.
        let _ = write!(self.output, "{text}");
        let _ = self.output.flush();
    }

    fn println(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_owned()),
            Err(error) => {
                tracing::warn!(%error, "failed to read from stdin");
                None
            }
        }
    }

    fn clear(&mut self) {
        let _ = write!(self.output, "\x1b[2J\x1b[H");
        let _ = self.output.flush();
    }
}
