//! Player-facing I/O collaborator.
//!
//! The scheduler and skill resolution write every line of player-facing text
//! through [`BattleIo`] and read hero choices from it. No battle rule depends
//! on the formatting of what is written.

use std::collections::VecDeque;

/// Text input/output used by the battle loop.
pub trait BattleIo {
    /// Write text without a trailing newline (prompts).
    fn print(&mut self, text: &str);

    /// Write a full line.
    fn println(&mut self, text: &str);

    /// Read one line of player input. `None` means the input is closed.
    fn read_line(&mut self) -> Option<String>;

    /// Clear the display.
    fn clear(&mut self);
}

impl<T: BattleIo + ?Sized> BattleIo for &mut T {
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }

    fn println(&mut self, text: &str) {
        (**self).println(text);
    }

    fn read_line(&mut self) -> Option<String> {
        (**self).read_line()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Headless I/O with queued inputs and a captured transcript.
///
/// Used by tests and replays: inputs are consumed in order and every written
/// fragment is recorded.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
    clears: usize,
}

impl ScriptedIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scripted I/O preloaded with `inputs`.
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut io = Self::new();
        io.extend_inputs(inputs);
        io
    }

    /// Queues one more input line.
    pub fn push_input(&mut self, input: impl Into<String>) {
        self.inputs.push_back(input.into());
    }

    /// Queues several input lines.
    pub fn extend_inputs<I, S>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
    }

    /// Number of inputs not yet consumed.
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Every fragment written so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// The transcript joined into a single string.
    pub fn output(&self) -> String {
        self.transcript.concat()
    }

    /// Returns true if any written fragment contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl BattleIo for ScriptedIo {
    fn print(&mut self, text: &str) {
        self.transcript.push(text.to_owned());
    }

    fn println(&mut self, text: &str) {
        self.transcript.push(format!("{text}\n"));
    }

    fn read_line(&mut self) -> Option<String> {
        self.inputs.pop_front()
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_io_consumes_inputs_in_order() {
        let mut io = ScriptedIo::with_inputs(["1", "2"]);
        assert_eq!(io.read_line().as_deref(), Some("1"));
        assert_eq!(io.read_line().as_deref(), Some("2"));
        assert_eq!(io.read_line(), None);
    }

    #[test]
    fn scripted_io_records_transcript() {
        let mut io = ScriptedIo::new();
        io.print("Choose: ");
        io.println("done");
        io.clear();
        assert_eq!(io.output(), "Choose: done\n");
        assert!(io.contains("done"));
        assert_eq!(io.clears(), 1);
    }
}
