//! Modal text editor.
//!
//! An [`EditorSession`] edits one file's content in memory. It never
//! touches the filesystem itself: closing it returns an
//! [`EditorOutcome::Close`] and the session decides whether to write.
//!
//! Modes:
//! - **Normal**: `i a o O h j k l x d 0 $ g G :` and arrow keys
//! - **Insert**: typing, Enter, Backspace; Escape returns to Normal
//! - **Command**: `:w`, `:q`, `:q!`, `:wq`, `:x`, `:help`

mod buffer;
mod key;
mod mode;

pub use buffer::{Position, TextBuffer};
pub use key::Key;
pub use mode::EditorMode;

use crate::core::error::EditorError;

const INSERT_STATUS: &str = "-- INSERT --";
const HELP_STATUS: &str =
    "Use :w to save, :q to quit, :wq to save & quit, :q! to quit without saving";

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Editor stays open.
    Continue,
    /// Editor closed. `content` is what should be written when `saved`.
    Close { saved: bool, content: String },
}

/// State of one open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    path: String,
    original: String,
    buffer: TextBuffer,
    cursor: Position,
    mode: EditorMode,
    command: String,
    status: String,
}

impl EditorSession {
    /// Open `path` with `content` (empty for a new file).
    pub fn open(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let original = content.into();
        let buffer = TextBuffer::from_text(&original);
        let status = if original.is_empty() {
            format!("\"{}\" [New File]", path)
        } else {
            format!("\"{}\" {}L", path, buffer.line_count())
        };
        Self {
            path,
            original,
            buffer,
            cursor: Position::default(),
            mode: EditorMode::Normal,
            command: String::new(),
            status,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Pending ex command text (without the leading `:`).
    pub fn command_text(&self) -> &str {
        &self.command
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// True iff the buffer differs from the content the editor opened with.
    pub fn is_dirty(&self) -> bool {
        self.buffer.to_text() != self.original
    }

    /// `line,col`, both 1-based.
    pub fn position_label(&self) -> String {
        format!("{},{}", self.cursor.line + 1, self.cursor.col + 1)
    }

    /// How far through the buffer the cursor line is, rounded.
    pub fn percent(&self) -> usize {
        let total = self.buffer.line_count().max(1);
        ((self.cursor.line + 1) * 100 + total / 2) / total
    }

    pub fn handle_key(&mut self, key: Key) -> EditorOutcome {
        match self.mode {
            EditorMode::Normal => {
                self.handle_normal(key);
                EditorOutcome::Continue
            }
            EditorMode::Insert => {
                self.handle_insert(key);
                EditorOutcome::Continue
            }
            EditorMode::Command => self.handle_command(key),
        }
    }

    // =========================================================================
    // Normal Mode
    // =========================================================================

    fn enter_insert(&mut self) {
        self.mode = EditorMode::Insert;
        self.status = INSERT_STATUS.to_string();
    }

    fn handle_normal(&mut self, key: Key) {
        let Position { line, col } = self.cursor;
        match key {
            Key::Char('i') => self.enter_insert(),
            Key::Char('a') => {
                self.cursor.col = (col + 1).min(self.buffer.line_len(line));
                self.enter_insert();
            }
            Key::Char('o') => {
                self.buffer.insert_line(line + 1);
                self.cursor = Position::new(line + 1, 0);
                self.enter_insert();
            }
            Key::Char('O') => {
                self.buffer.insert_line(line);
                self.cursor = Position::new(line, 0);
                self.enter_insert();
            }
            Key::Char('h') | Key::Left => self.move_left(),
            Key::Char('j') | Key::Down => self.move_down(),
            Key::Char('k') | Key::Up => self.move_up(),
            Key::Char('l') | Key::Right => self.move_right(),
            Key::Char('x') => {
                self.buffer.delete_char(self.cursor);
            }
            Key::Char('d') => {
                self.buffer.delete_line(line);
                self.cursor = Position::new(line.min(self.buffer.line_count() - 1), 0);
                self.status = "line deleted".to_string();
            }
            Key::Char('0') => self.cursor.col = 0,
            Key::Char('$') => self.cursor.col = self.buffer.line_len(line),
            Key::Char('g') => self.cursor = Position::new(0, 0),
            Key::Char('G') => self.cursor = Position::new(self.buffer.line_count() - 1, 0),
            Key::Char(':') => {
                self.mode = EditorMode::Command;
                self.command.clear();
            }
            _ => {}
        }
    }

    fn move_left(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.buffer.line_len(self.cursor.line) {
            self.cursor.col += 1;
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_col();
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.buffer.line_count() {
            self.cursor.line += 1;
            self.clamp_col();
        }
    }

    fn clamp_col(&mut self) {
        self.cursor.col = self.cursor.col.min(self.buffer.line_len(self.cursor.line));
    }

    // =========================================================================
    // Insert Mode
    // =========================================================================

    fn handle_insert(&mut self, key: Key) {
        match key {
            Key::Escape => {
                self.mode = EditorMode::Normal;
                self.status.clear();
            }
            Key::Char(c) => {
                if self.buffer.insert_char(self.cursor, c) {
                    self.cursor.col += 1;
                }
            }
            Key::Enter => {
                if self.buffer.split_line(self.cursor) {
                    self.cursor = Position::new(self.cursor.line + 1, 0);
                }
            }
            Key::Backspace => {
                if let Some(pos) = self.buffer.backspace(self.cursor) {
                    self.cursor = pos;
                }
            }
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Ctrl(_) => {}
        }
    }

    // =========================================================================
    // Command Mode
    // =========================================================================

    fn handle_command(&mut self, key: Key) -> EditorOutcome {
        match key {
            Key::Char(c) => self.command.push(c),
            Key::Backspace => {
                // Backspace on an empty command line leaves command mode, as in vim
                if self.command.pop().is_none() {
                    self.mode = EditorMode::Normal;
                }
            }
            Key::Escape => {
                self.command.clear();
                self.mode = EditorMode::Normal;
            }
            Key::Enter => {
                let command = std::mem::take(&mut self.command);
                self.mode = EditorMode::Normal;
                return match self.execute(command.trim()) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        self.status = err.to_string();
                        EditorOutcome::Continue
                    }
                };
            }
            _ => {}
        }
        EditorOutcome::Continue
    }

    fn execute(&mut self, command: &str) -> Result<EditorOutcome, EditorError> {
        tracing::debug!(path = %self.path, command, "editor command");
        match command {
            "w" | "write" => {
                self.status = format!("\"{}\" {}L written", self.path, self.buffer.line_count());
                Ok(EditorOutcome::Continue)
            }
            "q" => {
                if self.is_dirty() {
                    return Err(EditorError::Unsaved);
                }
                Ok(EditorOutcome::Close {
                    saved: false,
                    content: self.buffer.to_text(),
                })
            }
            "q!" => Ok(EditorOutcome::Close {
                saved: false,
                content: self.original.clone(),
            }),
            "wq" | "x" => Ok(EditorOutcome::Close {
                saved: true,
                content: self.buffer.to_text(),
            }),
            "help" => {
                self.status = HELP_STATUS.to_string();
                Ok(EditorOutcome::Continue)
            }
            other => Err(EditorError::UnknownCommand(other.to_string())),
        }
    }
}
