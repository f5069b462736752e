//! In-memory remote for tests.

use std::cell::{Cell, RefCell};

use super::{Credential, RemoteFile, RemoteHost, RemoteLink};
use crate::core::error::RemoteError;

/// One upload received by [`MockRemote`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedPush {
    pub url: String,
    pub files: Vec<RemoteFile>,
    pub message: String,
}

/// Remote that accepts a single fixed token and records every push.
#[derive(Debug, Default)]
pub struct MockRemote {
    push_error: Option<RemoteError>,
    link_attempts: Cell<usize>,
    pushes: RefCell<Vec<RecordedPush>>,
}

impl MockRemote {
    /// The only token [`MockRemote::link`] accepts.
    pub const TOKEN: &'static str = "ghp_mock";

    pub fn new() -> Self {
        Self::default()
    }

    /// A remote whose every push fails with `error`.
    pub fn failing(error: RemoteError) -> Self {
        Self {
            push_error: Some(error),
            ..Self::default()
        }
    }

    pub fn url_for(owner: &str, repository: &str) -> String {
        format!("https://git.example.test/{}/{}", owner, repository)
    }

    pub fn pushes(&self) -> Vec<RecordedPush> {
        self.pushes.borrow().clone()
    }

    pub fn link_attempts(&self) -> usize {
        self.link_attempts.get()
    }
}

impl RemoteHost for MockRemote {
    async fn link(&self, credential: Credential) -> Result<RemoteLink, RemoteError> {
        self.link_attempts.set(self.link_attempts.get() + 1);
        if credential.token != Self::TOKEN {
            return Err(RemoteError::Unauthorized);
        }
        let url = Self::url_for(&credential.owner, &credential.repository);
        Ok(RemoteLink::new(credential, url))
    }

    async fn push(
        &self,
        link: &RemoteLink,
        files: &[RemoteFile],
        message: &str,
    ) -> Result<(), RemoteError> {
        if let Some(err) = &self.push_error {
            return Err(err.clone());
        }
        self.pushes.borrow_mut().push(RecordedPush {
            url: link.repository_url().to_string(),
            files: files.to_vec(),
            message: message.to_string(),
        });
        Ok(())
    }
}
