//! Remote hosting boundary.
//!
//! The core never talks HTTP itself. It depends only on [`RemoteHost`]:
//! - [`RemoteHost::link`] turns a [`Credential`] into a [`RemoteLink`]
//! - [`RemoteHost::push`] uploads the workspace files with a commit message
//!
//! `git push` produces a [`PushTask`]; the host runs it against whichever
//! adapter it owns ([`GitHubRemote`] in the browser, `MockRemote` in tests)
//! and feeds the result back into the session.

mod github;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use github::GitHubRemote;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockRemote, RecordedPush};

use std::fmt;

use crate::core::error::RemoteError;

// =============================================================================
// Credential / Link
// =============================================================================

/// What the linking dialog collects from the user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub owner: String,
    pub repository: String,
}

impl Credential {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into().trim().to_string(),
            owner: owner.into().trim().to_string(),
            repository: repository.into().trim().to_string(),
        }
    }

    /// Every field must be non-empty before a link is attempted.
    pub fn validate(&self) -> Result<(), RemoteError> {
        if self.token.is_empty() || self.owner.is_empty() || self.repository.is_empty() {
            return Err(RemoteError::MissingField);
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .finish()
    }
}

/// An established association with a hosted repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteLink {
    url: String,
    credential: Credential,
}

impl RemoteLink {
    pub fn new(credential: Credential, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credential,
        }
    }

    /// Browsable repository URL, as chosen by the adapter.
    pub fn repository_url(&self) -> &str {
        &self.url
    }

    pub fn owner(&self) -> &str {
        &self.credential.owner
    }

    pub fn repository(&self) -> &str {
        &self.credential.repository
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

// =============================================================================
// Adapter Trait
// =============================================================================

/// A file uploaded by push.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    pub content: String,
}

/// Capability surface of a remote hosting service.
///
/// Retry, repository creation and content encoding are the adapter's
/// business; callers only see success or a [`RemoteError`].
#[allow(async_fn_in_trait)]
pub trait RemoteHost {
    /// Verify `credential` and return the resulting link.
    async fn link(&self, credential: Credential) -> Result<RemoteLink, RemoteError>;

    /// Upload `files` to the linked repository under `message`.
    async fn push(
        &self,
        link: &RemoteLink,
        files: &[RemoteFile],
        message: &str,
    ) -> Result<(), RemoteError>;
}

/// Validate `credential` locally, then ask `remote` to link it.
pub async fn link_remote<R: RemoteHost>(
    remote: &R,
    credential: Credential,
) -> Result<RemoteLink, RemoteError> {
    credential.validate()?;
    tracing::info!(owner = %credential.owner, repository = %credential.repository, "linking remote");
    remote.link(credential).await
}

// =============================================================================
// Push Task
// =============================================================================

/// A push request handed from the session to its host.
///
/// Carries everything the adapter needs, so the session's state can keep
/// changing while the request is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushTask {
    pub link: RemoteLink,
    pub files: Vec<RemoteFile>,
    pub message: String,
    pub hash: String,
    pub branch: String,
}

impl PushTask {
    /// Run the upload against `remote`.
    pub async fn run<R: RemoteHost>(&self, remote: &R) -> Result<(), RemoteError> {
        tracing::info!(
            url = %self.link.repository_url(),
            files = self.files.len(),
            hash = %self.hash,
            "pushing"
        );
        remote.push(&self.link, &self.files, &self.message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_trims_fields() {
        let cred = Credential::new(" ghp_abc ", " ada ", " hdl-workspace\n");
        assert_eq!(cred.token, "ghp_abc");
        assert_eq!(cred.owner, "ada");
        assert_eq!(cred.repository, "hdl-workspace");
    }

    #[test]
    fn test_credential_requires_all_fields() {
        assert_eq!(
            Credential::new("", "ada", "repo").validate(),
            Err(RemoteError::MissingField)
        );
        assert_eq!(
            Credential::new("tok", "  ", "repo").validate(),
            Err(RemoteError::MissingField)
        );
        assert!(Credential::new("tok", "ada", "repo").validate().is_ok());
    }

    #[test]
    fn test_credential_debug_hides_token() {
        let cred = Credential::new("ghp_secret", "ada", "repo");
        let dbg = format!("{:?}", cred);
        assert!(!dbg.contains("ghp_secret"));
        assert!(dbg.contains("ada"));
    }

    #[test]
    fn test_link_accessors() {
        let link = RemoteLink::new(
            Credential::new("tok", "ada", "hdl-workspace"),
            "https://github.com/ada/hdl-workspace",
        );
        assert_eq!(link.owner(), "ada");
        assert_eq!(link.repository(), "hdl-workspace");
        assert_eq!(link.repository_url(), "https://github.com/ada/hdl-workspace");
    }

    #[tokio::test]
    async fn test_link_remote_rejects_blank_fields_before_adapter() {
        let remote = MockRemote::new();
        let result = link_remote(&remote, Credential::new("", "ada", "repo")).await;
        assert_eq!(result, Err(RemoteError::MissingField));
        assert_eq!(remote.link_attempts(), 0);
    }

    #[tokio::test]
    async fn test_push_task_forwards_to_adapter() {
        let remote = MockRemote::new();
        let link = link_remote(&remote, Credential::new(MockRemote::TOKEN, "ada", "repo"))
            .await
            .unwrap();
        let task = PushTask {
            link,
            files: vec![RemoteFile {
                path: "counter.v".into(),
                content: "module counter;".into(),
            }],
            message: "first".into(),
            hash: "abc1234".into(),
            branch: "main".into(),
        };
        task.run(&remote).await.unwrap();

        let pushes = remote.pushes();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].message, "first");
        assert_eq!(pushes[0].files, task.files);
    }
}
