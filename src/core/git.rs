//! Simplified version-control model over the virtual filesystem.
//!
//! A [`Repository`] tracks intent, not content: staging records a path,
//! committing records a message. File content is only read at push time,
//! when every workspace file is uploaded as-is.

use chrono::{DateTime, Local, Utc};
use indexmap::{IndexMap, IndexSet};
use sha2::{Digest, Sha256};

use crate::config::{COMMIT_HASH_LEN, DEFAULT_BRANCH};
use crate::core::error::GitError;
use crate::core::filesystem::VirtualFs;
use crate::core::remote::{PushTask, RemoteFile, RemoteLink};

const COMMIT_USAGE: &str = "Usage: git commit -m \"commit message\"";

/// Keys `git config --list` always prints, set or not.
const IDENTITY_KEYS: [&str; 2] = ["user.name", "user.email"];

// =============================================================================
// Value Types
// =============================================================================

/// A recorded commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Timestamp in the form `git log` prints.
    pub fn date_line(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

/// What `commit` reports back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitSummary {
    pub branch: String,
    pub hash: String,
    pub message: String,
    pub files_changed: usize,
}

/// Snapshot of the working tree as `status` sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: String,
    pub staged: Vec<String>,
    pub untracked: Vec<String>,
}

/// Operand of `add`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddTarget {
    /// `add .`
    All,
    Paths(Vec<String>),
}

/// Next step for `push`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PushPlan {
    /// No remote yet; the user has to link one first.
    NeedsRemote,
    /// Ready to hand to the remote adapter.
    Ready(PushTask),
}

// =============================================================================
// Repository
// =============================================================================

/// Repository lifecycle state. Uninitialized until [`Repository::init`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    initialized: bool,
    branch: String,
    staged: IndexSet<String>,
    commits: Vec<Commit>,
    config: IndexMap<String, String>,
    remote: Option<RemoteLink>,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new(DEFAULT_BRANCH)
    }
}

impl Repository {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            initialized: false,
            branch: branch.into(),
            staged: IndexSet::new(),
            commits: Vec::new(),
            config: IndexMap::new(),
            remote: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn staged(&self) -> impl Iterator<Item = &str> {
        self.staged.iter().map(String::as_str)
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Most recent commit.
    pub fn head(&self) -> Option<&Commit> {
        self.commits.last()
    }

    pub fn remote(&self) -> Option<&RemoteLink> {
        self.remote.as_ref()
    }

    pub fn set_remote(&mut self, link: RemoteLink) {
        tracing::info!(url = %link.repository_url(), "remote linked");
        self.remote = Some(link);
    }

    fn require_initialized(&self) -> Result<(), GitError> {
        if self.initialized {
            Ok(())
        } else {
            Err(GitError::NotARepository)
        }
    }

    /// Mark the repository initialized. Returns `true` if it already was.
    ///
    /// Re-initializing keeps staged paths and commits.
    pub fn init(&mut self) -> bool {
        let reinit = self.initialized;
        self.initialized = true;
        tracing::debug!(reinit, "repository initialized");
        reinit
    }

    // -------------------------------------------------------------------------
    // Config
    // -------------------------------------------------------------------------

    fn check_key(key: &str) -> Result<(), GitError> {
        match key.split_once('.') {
            Some((section, name)) if !section.is_empty() && !name.is_empty() => Ok(()),
            _ => Err(GitError::InvalidConfigKey(key.to_string())),
        }
    }

    pub fn config_set(&mut self, key: &str, value: &str) -> Result<(), GitError> {
        Self::check_key(key)?;
        self.config.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Configured value, or the empty string when unset.
    pub fn config_get(&self, key: &str) -> Result<&str, GitError> {
        Self::check_key(key)?;
        Ok(self.config.get(key).map(String::as_str).unwrap_or(""))
    }

    /// Identity keys first, then every other key in the order it was set.
    pub fn config_list(&self) -> Vec<(&str, &str)> {
        let identity = IDENTITY_KEYS
            .iter()
            .map(|&k| (k, self.config.get(k).map(String::as_str).unwrap_or("")));
        let rest = self
            .config
            .iter()
            .filter(|(k, _)| !IDENTITY_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()));
        identity.chain(rest).collect()
    }

    fn author(&self) -> String {
        let name = self.config.get("user.name").map(String::as_str).unwrap_or("");
        let email = self.config.get("user.email").map(String::as_str).unwrap_or("");
        format!("{} <{}>", name, email)
    }

    // -------------------------------------------------------------------------
    // Working Tree
    // -------------------------------------------------------------------------

    /// Stage paths. Returns how many paths are now staged.
    ///
    /// Explicit paths are all checked before any is staged; one missing
    /// path leaves the staged set untouched.
    pub fn add(&mut self, fs: &VirtualFs, target: &AddTarget) -> Result<usize, GitError> {
        self.require_initialized()?;
        match target {
            AddTarget::All => {
                for path in fs.list() {
                    self.staged.insert(path.to_string());
                }
            }
            AddTarget::Paths(paths) => {
                if let Some(missing) = paths.iter().find(|p| !fs.exists(p)) {
                    return Err(GitError::Pathspec(missing.clone()));
                }
                self.staged.extend(paths.iter().cloned());
            }
        }
        tracing::debug!(staged = self.staged.len(), "paths staged");
        Ok(self.staged.len())
    }

    pub fn status(&self, fs: &VirtualFs) -> Result<StatusReport, GitError> {
        self.require_initialized()?;
        let untracked = fs
            .list()
            .into_iter()
            .filter(|p| !self.staged.contains(*p))
            .map(str::to_string)
            .collect();
        Ok(StatusReport {
            branch: self.branch.clone(),
            staged: self.staged.iter().cloned().collect(),
            untracked,
        })
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Record a commit of everything staged.
    ///
    /// `message` is `None` when `-m` was not given at all and `Some("")`
    /// when it was given without text.
    pub fn commit(
        &mut self,
        message: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<CommitSummary, GitError> {
        self.require_initialized()?;
        if self.staged.is_empty() {
            return Err(GitError::NothingToCommit);
        }
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            Some(_) => {
                return Err(GitError::Usage {
                    message: "error: switch `m' requires a value".to_string(),
                    usage: COMMIT_USAGE,
                });
            }
            None => {
                return Err(GitError::Usage {
                    message: "error: no commit message given".to_string(),
                    usage: COMMIT_USAGE,
                });
            }
        };

        let files_changed = self.staged.len();
        let hash = self.next_hash(&message, &timestamp);
        self.commits.push(Commit {
            hash: hash.clone(),
            message: message.clone(),
            author: self.author(),
            timestamp,
        });
        self.staged.clear();

        tracing::info!(%hash, files_changed, "commit recorded");
        Ok(CommitSummary {
            branch: self.branch.clone(),
            hash,
            message,
            files_changed,
        })
    }

    fn next_hash(&self, message: &str, timestamp: &DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        if let Some(parent) = self.head() {
            hasher.update(parent.hash.as_bytes());
        }
        hasher.update(self.commits.len().to_le_bytes());
        hasher.update(timestamp.to_rfc3339().as_bytes());
        hasher.update(message.as_bytes());
        for path in &self.staged {
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
        }
        let mut hash = hex::encode(hasher.finalize());
        hash.truncate(COMMIT_HASH_LEN);
        hash
    }

    /// Commits, newest first.
    pub fn log(&self) -> Result<Vec<&Commit>, GitError> {
        self.require_initialized()?;
        if self.commits.is_empty() {
            return Err(GitError::NoCommits(self.branch.clone()));
        }
        Ok(self.commits.iter().rev().collect())
    }

    // -------------------------------------------------------------------------
    // Push
    // -------------------------------------------------------------------------

    /// Decide what `push` does next. Never mutates the repository.
    pub fn prepare_push(&self, fs: &VirtualFs) -> Result<PushPlan, GitError> {
        self.require_initialized()?;
        let Some(link) = &self.remote else {
            return Ok(PushPlan::NeedsRemote);
        };
        let Some(head) = self.head() else {
            return Err(GitError::Rejected);
        };
        let files = fs
            .iter()
            .map(|(path, content)| RemoteFile {
                path: path.to_string(),
                content: content.to_string(),
            })
            .collect();
        Ok(PushPlan::Ready(PushTask {
            link: link.clone(),
            files,
            message: head.message.clone(),
            hash: head.hash.clone(),
            branch: self.branch.clone(),
        }))
    }
}
