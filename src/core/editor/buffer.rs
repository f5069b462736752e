//! Text buffer and position types

/// Cursor position in the buffer. `col` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Line-based text storage. Always holds at least one line.
///
/// Splitting on `'\n'` (rather than `str::lines`) keeps a trailing newline
/// as a final empty line, so `from_text(s).to_text() == s` for every `s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }
}

fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Length of a line in characters; 0 past the end.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(|l| l.chars().count()).unwrap_or(0)
    }

    pub fn insert_char(&mut self, pos: Position, ch: char) -> bool {
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        let at = byte_offset(line, pos.col);
        line.insert(at, ch);
        true
    }

    /// Split the line at `pos`, moving the tail to a new line below.
    pub fn split_line(&mut self, pos: Position) -> bool {
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        let at = byte_offset(line, pos.col);
        let rest = line.split_off(at);
        self.lines.insert(pos.line + 1, rest);
        true
    }

    /// Delete the character at `pos`. Returns `false` past end of line.
    pub fn delete_char(&mut self, pos: Position) -> bool {
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        match line.char_indices().nth(pos.col) {
            Some((at, _)) => {
                line.remove(at);
                true
            }
            None => false,
        }
    }

    /// Delete the character before `pos`, joining with the previous line at
    /// column 0. Returns the new cursor position.
    pub fn backspace(&mut self, pos: Position) -> Option<Position> {
        if pos.line >= self.lines.len() {
            return None;
        }
        if pos.col > 0 {
            let line = &mut self.lines[pos.line];
            let at = line.char_indices().nth(pos.col - 1).map(|(i, _)| i)?;
            line.remove(at);
            Some(Position::new(pos.line, pos.col - 1))
        } else if pos.line > 0 {
            let current = self.lines.remove(pos.line);
            let prev = &mut self.lines[pos.line - 1];
            let col = prev.chars().count();
            prev.push_str(&current);
            Some(Position::new(pos.line - 1, col))
        } else {
            None
        }
    }

    /// Insert an empty line so that it becomes line `index`.
    pub fn insert_line(&mut self, index: usize) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, String::new());
    }

    /// Remove line `index`. Deleting the only line leaves one empty line.
    pub fn delete_line(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        true
    }
}
