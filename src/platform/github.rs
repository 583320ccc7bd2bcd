//! GitHub REST API gateway.

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::gateway::{
    repository_url, GatewayFuture, PlatformGateway, TransportError, EVENTS_PAGE_SIZE, USER_AGENT,
};
use super::Platform;
use crate::data::event::{GitHubEvent, UnifiedEvent};

/// Default GitHub API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Gateway to `api.github.com` (or a compatible endpoint).
pub struct GitHubGateway {
    client: Client,
    base_url: String,
}

impl Default for GitHubGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubGateway {
    /// Creates a gateway for the public GitHub API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a gateway for a custom API base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn get(&self, url: url::Url, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("token {token}"));
        }
        builder
    }
}

impl PlatformGateway for GitHubGateway {
    fn platform(&self) -> Platform {
        Platform::GitHub
    }

    fn fetch_events<'a>(
        &'a self,
        repo: &'a str,
        token: Option<&'a str>,
    ) -> GatewayFuture<'a, Vec<UnifiedEvent>> {
        Box::pin(async move {
            let page_size = EVENTS_PAGE_SIZE.to_string();
            let url = repository_url(
                &self.base_url,
                repo,
                "events",
                &[("per_page", page_size.as_str())],
            )?;

            info!(%url, authenticated = token.is_some(), "Fetching GitHub events");

            let response = self
                .get(url, token)
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let status = response.status();
            if status != StatusCode::OK {
                debug!(status = status.as_u16(), repo, "GitHub events request rejected");
                return Err(TransportError::Status(status.as_u16()));
            }

            let events: Vec<GitHubEvent> = response
                .json()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))?;

            debug!(count = events.len(), repo, "Received GitHub events");
            Ok(events.into_iter().map(UnifiedEvent::from).collect())
        })
    }

    fn has_commits<'a>(&'a self, repo: &'a str, token: Option<&'a str>) -> GatewayFuture<'a, bool> {
        Box::pin(async move {
            let url = repository_url(&self.base_url, repo, "commits", &[("per_page", "1")])?;

            info!(%url, "Checking GitHub commits");

            let response = self
                .get(url, token)
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            match response.status() {
                StatusCode::OK => Ok(true),
                // 409 Conflict: "Git Repository is empty."
                StatusCode::CONFLICT | StatusCode::NOT_FOUND => Ok(false),
                other => Err(TransportError::Status(other.as_u16())),
            }
        })
    }
}
