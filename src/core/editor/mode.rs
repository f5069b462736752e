/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Navigation and single-key commands
    #[default]
    Normal,
    /// Text entry
    Insert,
    /// Ex command line (`:w`, `:q`, ...)
    Command,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Command => "COMMAND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(EditorMode::default(), EditorMode::Normal);
        assert_eq!(EditorMode::Insert.as_str(), "INSERT");
    }
}
