//! Command execution result type.

use crate::core::error::GitError;
use crate::core::remote::PushTask;
use crate::models::OutputLine;

/// Side effect a command asks the session to perform after its output is
/// printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Empty the scrollback (`clear`).
    ClearScreen,
    /// Open the editor on a path (`vim`).
    OpenEditor(String),
    /// Start collecting remote credentials (`push` without a remote).
    BeginLink,
    /// Hand a push to the host and mark it in flight.
    StartPush(PushTask),
}

impl Action {
    /// Whether the command's output ends without the usual blank line.
    ///
    /// Clearing and opening the editor print nothing; a push prints its
    /// blank line only once the upload resolves.
    pub fn suppresses_spacer(&self) -> bool {
        matches!(
            self,
            Action::ClearScreen | Action::OpenEditor(_) | Action::StartPush(_)
        )
    }
}

/// Result of executing a command.
#[derive(Clone, Debug, Default)]
pub struct CommandResult {
    /// Output lines to display
    pub output: Vec<OutputLine>,
    /// Follow-up for the session
    pub action: Option<Action>,
}

impl CommandResult {
    /// Create a result with just output, no action.
    pub fn output(lines: Vec<OutputLine>) -> Self {
        Self {
            output: lines,
            action: None,
        }
    }

    /// Create a result with only an action.
    pub fn action(action: Action) -> Self {
        Self {
            output: vec![],
            action: Some(action),
        }
    }

    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single error line.
    pub fn error(message: impl Into<String>) -> Self {
        Self::output(vec![OutputLine::error(message)])
    }

    /// Error line followed by plain-text hint lines.
    pub fn error_with_hints<'a>(
        message: impl Into<String>,
        hints: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut lines = vec![OutputLine::error(message)];
        lines.extend(hints.into_iter().map(OutputLine::text));
        Self::output(lines)
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

impl From<GitError> for CommandResult {
    fn from(err: GitError) -> Self {
        let hints = err.hints();
        Self::error_with_hints(err.to_string(), hints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputLineData;

    #[test]
    fn test_git_error_renders_hints() {
        let result = CommandResult::from(GitError::Rejected);
        assert_eq!(result.output.len(), 3);
        assert!(result.output[0].is_error());
        assert!(matches!(result.output[1].data, OutputLineData::Text(_)));
        assert!(result.action.is_none());
    }

    #[test]
    fn test_spacer_rules() {
        assert!(Action::ClearScreen.suppresses_spacer());
        assert!(Action::OpenEditor("a.v".into()).suppresses_spacer());
        assert!(!Action::BeginLink.suppresses_spacer());
    }
}
