//! Gitee REST API (v5) gateway.
//!
//! Gitee takes its token as an `access_token` query parameter rather than
//! an `Authorization` header.

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::gateway::{
    repository_url, GatewayFuture, PlatformGateway, TransportError, EVENTS_PAGE_SIZE, USER_AGENT,
};
use super::Platform;
use crate::data::event::{GiteeEvent, UnifiedEvent};

/// Default Gitee API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://gitee.com/api/v5";

/// Gateway to the Gitee v5 API.
pub struct GiteeGateway {
    client: Client,
    base_url: String,
}

impl Default for GiteeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl GiteeGateway {
    /// Creates a gateway for the public Gitee API.
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

    async fn get(
        &self,
        repo: &str,
        resource: &str,
        mut query: Vec<(&str, &str)>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, TransportError> {
        if let Some(token) = token {
            query.push(("access_token", token));
        }
        let url = repository_url(&self.base_url, repo, resource, &query)?;

        // The URL carries the token, so only the path is logged.
        info!(path = url.path(), authenticated = token.is_some(), "Requesting Gitee API");

        self.client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url().to_string()))
    }
}

impl PlatformGateway for GiteeGateway {
    fn platform(&self) -> Platform {
        Platform::Gitee
    }

    fn fetch_events<'a>(
        &'a self,
        repo: &'a str,
        token: Option<&'a str>,
    ) -> GatewayFuture<'a, Vec<UnifiedEvent>> {
        Box::pin(async move {
            let page_size = EVENTS_PAGE_SIZE.to_string();
            let response = self
                .get(repo, "events", vec![("limit", page_size.as_str())], token)
                .await?;

            let status = response.status();
            if status != StatusCode::OK {
                debug!(status = status.as_u16(), repo, "Gitee events request rejected");
                return Err(TransportError::Status(status.as_u16()));
            }

            let events: Vec<GiteeEvent> = response
                .json()
                .await
                .map_err(|e| TransportError::Decode(e.without_url().to_string()))?;

            debug!(count = events.len(), repo, "Received Gitee events");
            Ok(events.into_iter().map(UnifiedEvent::from).collect())
        })
    }

    fn has_commits<'a>(&'a self, repo: &'a str, token: Option<&'a str>) -> GatewayFuture<'a, bool> {
        Box::pin(async move {
            let response = self
                .get(repo, "commits", vec![("per_page", "1")], token)
                .await?;

            match response.status() {
                StatusCode::OK => Ok(true),
                // Gitee answers 404 for both empty and missing repositories.
                StatusCode::NOT_FOUND => Ok(false),
                other => Err(TransportError::Status(other.as_u16())),
            }
        })
    }
}
