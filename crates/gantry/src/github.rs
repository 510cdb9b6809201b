//! GitHub release publication
//!
//! Thin REST wrapper used by the release flow to publish a release note
//! for an already-pushed tag. Failures here are reported and never roll
//! back the local release.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use tracing::{info, instrument};

use gantry_core::error::ReleaseError;

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "gantry-cli";

/// Owner/repository pair parsed from a remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoSlug {
    /// Parse a GitHub slug out of a remote URL
    ///
    /// Understands the ssh (`git@github.com:owner/repo.git`) and https
    /// (`https://github.com/owner/repo.git`) forms. Returns `None` for
    /// anything that does not point at github.com.
    pub fn from_remote_url(url: &str) -> Option<Self> {
        let url = url.trim();

        let rest = url
            .strip_prefix("git@github.com:")
            .or_else(|| url.strip_prefix("ssh://git@github.com/"))
            .or_else(|| url.strip_prefix("https://github.com/"))
            .or_else(|| url.strip_prefix("http://github.com/"))?;

        let rest = rest.strip_suffix(".git").unwrap_or(rest);
        let rest = rest.trim_end_matches('/');

        let (owner, repo) = rest.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
}

/// GitHub API client scoped to release creation
pub struct GitHubClient {
    http: Client,
    api_base: String,
}

impl GitHubClient {
    /// Build a client from the GITHUB_TOKEN environment variable
    pub fn from_env() -> Result<Self, ReleaseError> {
        let token = std::env::var("GITHUB_TOKEN").map_err(|_| ReleaseError::MissingToken)?;
        Self::with_token(&token)
    }

    /// Build a client with an explicit token
    pub fn with_token(token: &str) -> Result<Self, ReleaseError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ReleaseError::PublishFailed("invalid token value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ReleaseError::PublishFailed(e.to_string()))?;

        Ok(Self {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Create a release for an existing tag
    #[instrument(skip(self, body), fields(%slug, tag))]
    pub fn publish_release(
        &self,
        slug: &RepoSlug,
        tag: &str,
        body: &str,
    ) -> Result<(), ReleaseError> {
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.api_base, slug.owner, slug.repo
        );

        let request = CreateReleaseRequest {
            tag_name: tag,
            name: tag,
            body,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| ReleaseError::PublishFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ReleaseError::PublishFailed(format!(
                "GitHub API returned {}: {}",
                status,
                detail.trim()
            )));
        }

        info!(%slug, tag, "published GitHub release");
        Ok(())
    }
}
