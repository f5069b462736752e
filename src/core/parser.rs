//! Command-line tokenizer.
//!
//! Splits a submitted line into words:
//! - Whitespace separates words
//! - `"double"` and `'single'` quotes group text and are removed
//! - `\` escapes the next character (outside single quotes)
//!
//! Quoted and unquoted parts touching each other join into one word, so
//! `-m "first commit"` yields `["-m", "first commit"]` and
//! `user.name="Ada"` yields `["user.name=Ada"]`. An unterminated quote runs
//! to the end of the line.

// =============================================================================
// Lexer
// =============================================================================

/// Iterator over the words of one input line.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// Tokenize the entire input into a vector
    pub fn tokenize(self) -> Vec<String> {
        self.collect()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn read_single_quoted(&mut self, word: &mut String) {
        for c in self.chars.by_ref() {
            if c == '\'' {
                return;
            }
            word.push(c);
        }
    }

    fn read_double_quoted(&mut self, word: &mut String) {
        while let Some(c) = self.chars.next() {
            match c {
                '"' => return,
                '\\' => match self.chars.peek() {
                    // Inside double quotes only quote and backslash are escapable
                    Some(&next @ ('"' | '\\')) => {
                        self.chars.next();
                        word.push(next);
                    }
                    _ => word.push('\\'),
                },
                _ => word.push(c),
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.skip_whitespace();
        self.chars.peek()?;

        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                break;
            }
            self.chars.next();
            match c {
                '\'' => self.read_single_quoted(&mut word),
                '"' => self.read_double_quoted(&mut word),
                '\\' => {
                    if let Some(escaped) = self.chars.next() {
                        word.push(escaped);
                    }
                }
                _ => word.push(c),
            }
        }
        Some(word)
    }
}

// =============================================================================
// Parsed Command
// =============================================================================

/// A command name with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Tokenize `input` into a command, or `None` for a blank line.
pub fn parse_input(input: &str) -> Option<ParsedCommand> {
    let mut words = Lexer::new(input).tokenize().into_iter();
    let name = words.next()?;
    Some(ParsedCommand {
        name,
        args: words.collect(),
    })
}
