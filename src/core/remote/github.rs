//! GitHub REST adapter.
//!
//! Linking verifies the token with `GET /user`. Pushing creates the
//! repository when it is missing, then writes each file through the
//! contents API, passing the existing blob SHA when the file is already
//! there so GitHub treats the write as an update.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};

use super::{Credential, RemoteFile, RemoteHost, RemoteLink};
use crate::config::{GITHUB_API_BASE, GITHUB_WEB_BASE, NEW_REPO_DESCRIPTION, REPO_CREATE_DELAY_MS};
use crate::core::error::RemoteError;

const ACCEPT: &str = "application/vnd.github.v3+json";

impl From<gloo_net::Error> for RemoteError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => RemoteError::Decode(e.to_string()),
            other => RemoteError::Transport(other.to_string()),
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Serialize)]
struct CreateRepoBody<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
}

#[derive(Debug, Serialize)]
struct PutContentBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

impl<'a> PutContentBody<'a> {
    fn new(message: &'a str, file: &RemoteFile, sha: Option<String>) -> Self {
        Self {
            message,
            content: BASE64.encode(file.content.as_bytes()),
            sha,
        }
    }
}

// =============================================================================
// Adapter
// =============================================================================

/// [`RemoteHost`] backed by the GitHub REST API.
#[derive(Clone, Debug)]
pub struct GitHubRemote {
    api_base: String,
    web_base: String,
}

impl Default for GitHubRemote {
    fn default() -> Self {
        Self::new(GITHUB_API_BASE, GITHUB_WEB_BASE)
    }
}

impl GitHubRemote {
    pub fn new(api_base: impl Into<String>, web_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            web_base: web_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn user_url(&self) -> String {
        format!("{}/user", self.api_base)
    }

    fn create_repo_url(&self) -> String {
        format!("{}/user/repos", self.api_base)
    }

    fn repo_api_url(&self, owner: &str, repository: &str) -> String {
        format!("{}/repos/{}/{}", self.api_base, owner, repository)
    }

    fn contents_url(&self, owner: &str, repository: &str, path: &str) -> String {
        format!("{}/contents/{}", self.repo_api_url(owner, repository), path)
    }

    fn web_url(&self, owner: &str, repository: &str) -> String {
        format!("{}/{}/{}", self.web_base, owner, repository)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header("Authorization", &format!("token {}", token))
            .header("Accept", ACCEPT)
    }

    async fn repository_exists(&self, link: &RemoteLink) -> bool {
        let url = self.repo_api_url(link.owner(), link.repository());
        let request = Self::authorized(Request::get(&url), &link.credential().token);
        matches!(request.send().await, Ok(resp) if resp.ok())
    }

    async fn create_repository(&self, link: &RemoteLink) -> Result<(), RemoteError> {
        tracing::info!(repository = %link.repository(), "creating repository");
        let body = CreateRepoBody {
            name: link.repository(),
            description: NEW_REPO_DESCRIPTION,
            private: false,
            auto_init: true,
        };
        let request =
            Self::authorized(Request::post(&self.create_repo_url()), &link.credential().token)
                .json(&body)?;
        expect_ok(request.send().await?).await?;

        // GitHub needs a moment before the new repository accepts writes
        TimeoutFuture::new(REPO_CREATE_DELAY_MS).await;
        Ok(())
    }

    async fn existing_sha(&self, url: &str, token: &str) -> Option<String> {
        let resp = Self::authorized(Request::get(url), token).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<ContentResponse>().await.ok().map(|c| c.sha)
    }

    async fn put_file(
        &self,
        link: &RemoteLink,
        file: &RemoteFile,
        message: &str,
    ) -> Result<(), RemoteError> {
        let token = &link.credential().token;
        let url = self.contents_url(link.owner(), link.repository(), &file.path);
        let sha = self.existing_sha(&url, token).await;
        tracing::debug!(path = %file.path, update = sha.is_some(), "uploading file");

        let body = PutContentBody::new(message, file, sha);
        let request = Self::authorized(Request::put(&url), token).json(&body)?;
        expect_ok(request.send().await?).await?;
        Ok(())
    }
}

/// Pass successful responses through; turn the rest into [`RemoteError::Api`].
async fn expect_ok(resp: Response) -> Result<Response, RemoteError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = resp.json::<ApiMessage>().await.ok().map(|m| m.message);
    tracing::warn!(status, ?message, "GitHub API error");
    Err(RemoteError::Api { status, message })
}

impl RemoteHost for GitHubRemote {
    async fn link(&self, credential: Credential) -> Result<RemoteLink, RemoteError> {
        credential.validate()?;

        let resp = Self::authorized(Request::get(&self.user_url()), &credential.token)
            .send()
            .await?;
        if !resp.ok() {
            return Err(RemoteError::Unauthorized);
        }
        let user: UserResponse = resp.json().await?;
        if !user.login.eq_ignore_ascii_case(&credential.owner) {
            return Err(RemoteError::OwnerMismatch);
        }

        let url = self.web_url(&credential.owner, &credential.repository);
        Ok(RemoteLink::new(credential, url))
    }

    async fn push(
        &self,
        link: &RemoteLink,
        files: &[RemoteFile],
        message: &str,
    ) -> Result<(), RemoteError> {
        if !self.repository_exists(link).await {
            self.create_repository(link).await?;
        }
        for file in files {
            self.put_file(link, file, message).await?;
        }
        Ok(())
    }
}
