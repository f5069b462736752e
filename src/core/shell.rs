//! Interpreter state: scrollback, input line and command history.

use crate::models::OutputLine;
use crate::utils::RingBuffer;

/// Line-editing and history state of the terminal.
///
/// Scrollback is a [`RingBuffer`], so the oldest lines fall off once
/// the limit is reached. History keeps every submission in order
/// (duplicates included) up to its own limit.
#[derive(Clone, Debug)]
pub struct Shell {
    scrollback: RingBuffer<OutputLine>,
    history: Vec<String>,
    history_limit: usize,
    /// Position while browsing history; `None` when not browsing.
    history_index: Option<usize>,
    input: String,
}

impl Shell {
    pub fn new(scrollback_limit: usize, history_limit: usize) -> Self {
        Self {
            scrollback: RingBuffer::new(scrollback_limit),
            history: Vec::new(),
            history_limit: history_limit.max(1),
            history_index: None,
            input: String::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Scrollback
    // -------------------------------------------------------------------------

    pub fn lines(&self) -> impl Iterator<Item = &OutputLine> {
        self.scrollback.iter()
    }

    pub fn scrollback_len(&self) -> usize {
        self.scrollback.len()
    }

    pub fn push_line(&mut self, line: OutputLine) {
        self.scrollback.push(line);
    }

    pub fn push_lines(&mut self, lines: impl IntoIterator<Item = OutputLine>) {
        self.scrollback.extend(lines);
    }

    pub fn clear_screen(&mut self) {
        self.scrollback.clear();
    }

    // -------------------------------------------------------------------------
    // Input Line
    // -------------------------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Take the current input, leaving the line empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Drop the current line without recording it (Ctrl+C).
    pub fn cancel_input(&mut self) -> String {
        self.history_index = None;
        self.take_input()
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Record a submitted line and stop browsing.
    pub fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
        if self.history.len() > self.history_limit {
            self.history.remove(0);
        }
        self.history_index = None;
    }

    /// Step toward older entries, stopping at the oldest.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(index);
        self.input = self.history[index].clone();
    }

    /// Step toward newer entries. Past the newest, clear the line and stop
    /// browsing.
    pub fn history_next(&mut self) {
        let Some(i) = self.history_index else {
            return;
        };
        if i + 1 < self.history.len() {
            self.history_index = Some(i + 1);
            self.input = self.history[i + 1].clone();
        } else {
            self.history_index = None;
            self.input.clear();
        }
    }
}
