//! Custom error types for the application.
//!
//! Each variant's `Display` text is exactly the line shown in the
//! terminal, so command handlers can render errors without reformatting:
//!
//! - [`GitError`] - Version-control failures (usage, precondition, pathspec, ...)
//! - [`EditorError`] - Editor commands refused by the modal editor
//! - [`RemoteError`] - Failures reported by the remote hosting adapter

use thiserror::Error;

/// Version-control errors. None of them mutate repository state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitError {
    /// Malformed invocation (e.g. `commit` without `-m`).
    #[error("{message}")]
    Usage {
        message: String,
        usage: &'static str,
    },
    /// Operation requires an initialized repository.
    #[error("fatal: not a git repository (or any of the parent directories): .git")]
    NotARepository,
    /// Path given to `add` is not in the workspace.
    #[error("fatal: pathspec '{0}' did not match any files")]
    Pathspec(String),
    /// `commit` with an empty staged set.
    #[error("nothing to commit, working tree clean")]
    NothingToCommit,
    /// `log` before the first commit.
    #[error("fatal: your current branch '{0}' does not have any commits yet")]
    NoCommits(String),
    /// `push` with a linked remote but no local commits.
    #[error("error: failed to push some refs")]
    Rejected,
    /// A second `push` while the first is unresolved.
    #[error("error: a push is already in progress")]
    PushInProgress,
    /// Remote adapter failure during push.
    #[error("error: failed to push to GitHub: {0}")]
    Network(String),
    /// Config key without a `section.` prefix.
    #[error("error: key does not contain a section: {0}")]
    InvalidConfigKey(String),
    /// Unrecognized `git` subcommand.
    #[error("git: '{0}' is not a git command. See 'git --help'.")]
    UnknownSubcommand(String),
}

impl GitError {
    /// Plain-text lines printed after the error line.
    pub fn hints(&self) -> Vec<&'static str> {
        match self {
            Self::Usage { usage, .. } => vec![*usage],
            Self::Rejected => vec![
                "hint: Updates were rejected because the remote contains work that you do not have locally.",
                "hint: You may want to first integrate the remote changes (e.g., 'git pull ...')",
            ],
            _ => vec![],
        }
    }
}

/// Editor command errors. The editor stays open when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// `:q` with unsaved changes.
    #[error("No write since last change (:q! to quit)")]
    Unsaved,
    /// Unrecognized ex command.
    #[error("Not an editor command: {0}")]
    UnknownCommand(String),
}

/// Errors reported by the remote hosting adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Token rejected by the host.
    #[error("Invalid GitHub token or authentication failed")]
    Unauthorized,
    /// Token belongs to a different account than the one entered.
    #[error("Username does not match the token owner")]
    OwnerMismatch,
    /// A required credential field was empty.
    #[error("All fields are required")]
    MissingField,
    /// Non-2xx API response, with the API's message when it sent one.
    #[error("{}", api_message(.status, .message))]
    Api { status: u16, message: Option<String> },
    /// Request never completed (offline, CORS, ...).
    #[error("Network error: {0}")]
    Transport(String),
    /// Response body was not what the API documents.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

fn api_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("GitHub API error: {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_error_lines() {
        assert_eq!(
            GitError::Pathspec("nope.v".into()).to_string(),
            "fatal: pathspec 'nope.v' did not match any files"
        );
        assert_eq!(
            GitError::UnknownSubcommand("pull".into()).to_string(),
            "git: 'pull' is not a git command. See 'git --help'."
        );
        assert_eq!(
            GitError::Network("Bad credentials".into()).to_string(),
            "error: failed to push to GitHub: Bad credentials"
        );
    }

    #[test]
    fn test_rejected_has_two_hints() {
        assert_eq!(GitError::Rejected.hints().len(), 2);
        assert!(GitError::NothingToCommit.hints().is_empty());
    }

    #[test]
    fn test_usage_hint_is_usage_line() {
        let err = GitError::Usage {
            message: "error: no commit message given".into(),
            usage: "Usage: git commit -m \"commit message\"",
        };
        assert_eq!(err.to_string(), "error: no commit message given");
        assert_eq!(err.hints(), vec!["Usage: git commit -m \"commit message\""]);
    }

    #[test]
    fn test_remote_api_error_message() {
        let with_message = RemoteError::Api {
            status: 404,
            message: Some("Not Found".into()),
        };
        assert_eq!(with_message.to_string(), "Not Found");

        let bare = RemoteError::Api {
            status: 502,
            message: None,
        };
        assert_eq!(bare.to_string(), "GitHub API error: 502");
    }
}
