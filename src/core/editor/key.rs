//! Platform-independent key representation.

/// One keystroke as the session sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character
    Char(char),
    Enter,
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Control chord, lowercase letter (`Ctrl(c)` is Ctrl+C)
    Ctrl(char),
}

impl Key {
    /// Translate a DOM `KeyboardEvent.key` value.
    ///
    /// Returns `None` for keys the terminal ignores (modifiers alone,
    /// function keys, Tab, ...).
    pub fn from_dom(key: &str, ctrl: bool) -> Option<Self> {
        let mut chars = key.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        if ctrl {
            return single
                .filter(char::is_ascii_alphabetic)
                .map(|c| Key::Ctrl(c.to_ascii_lowercase()));
        }

        match key {
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "Backspace" => Some(Key::Backspace),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => single.filter(|c| !c.is_control()).map(Key::Char),
        }
    }
}
