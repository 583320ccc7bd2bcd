//! Platform gateway contract shared by the GitHub and Gitee adapters.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use super::Platform;
use crate::data::event::UnifiedEvent;

/// Maximum number of events requested from a single events page.
pub const EVENTS_PAGE_SIZE: u32 = 100;

/// User agent sent with every platform request.
pub const USER_AGENT: &str = concat!("git-event-monitor/", env!("CARGO_PKG_VERSION"));

/// Failures talking to a hosting platform.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The repository string is not `owner/repo`.
    #[error("invalid repository format '{0}', expected 'owner/repo'")]
    InvalidRepository(String),

    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),

    /// The platform answered with an unexpected status code.
    #[error("API request failed with status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("decode response: {0}")]
    Decode(String),

    /// The call did not complete within the allotted time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Boxed future returned by gateway calls.
pub type GatewayFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, TransportError>> + Send + 'a>>;

/// REST capability of one hosting platform.
///
/// Implementations issue exactly one request per call: no pagination, no
/// retries and no timeout of their own. Callers bound each call.
pub trait PlatformGateway: Send + Sync {
    /// Returns the platform this gateway talks to.
    fn platform(&self) -> Platform;

    /// Fetches the first page of repository events, newest first.
    fn fetch_events<'a>(
        &'a self,
        repo: &'a str,
        token: Option<&'a str>,
    ) -> GatewayFuture<'a, Vec<UnifiedEvent>>;

    /// Reports whether the repository has at least one commit.
    ///
    /// Empty and missing repositories both report `false`.
    fn has_commits<'a>(&'a self, repo: &'a str, token: Option<&'a str>) -> GatewayFuture<'a, bool>;
}

/// One gateway per supported platform.
pub struct GatewaySet {
    github: Box<dyn PlatformGateway>,
    gitee: Box<dyn PlatformGateway>,
}

impl GatewaySet {
    /// Creates a set from explicit gateways.
    pub fn new(github: Box<dyn PlatformGateway>, gitee: Box<dyn PlatformGateway>) -> Self {
        Self { github, gitee }
    }

    /// Returns the gateway for `platform`.
    pub fn get(&self, platform: Platform) -> &dyn PlatformGateway {
        match platform {
            Platform::GitHub => self.github.as_ref(),
            Platform::Gitee => self.gitee.as_ref(),
        }
    }
}

/// Splits `owner/repo`, rejecting anything with a different shape.
pub(crate) fn split_repository(repo: &str) -> Result<(&str, &str), TransportError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(TransportError::InvalidRepository(repo.to_string())),
    }
}

/// Joins a base URL and a `repos/{owner}/{repo}/{resource}` path.
pub(crate) fn repository_url(
    base_url: &str,
    repo: &str,
    resource: &str,
    query: &[(&str, &str)],
) -> Result<url::Url, TransportError> {
    let (owner, name) = split_repository(repo)?;
    let raw = format!(
        "{}/repos/{owner}/{name}/{resource}",
        base_url.trim_end_matches('/')
    );
    let mut url = url::Url::parse(&raw)
        .map_err(|e| TransportError::Request(format!("invalid URL {raw}: {e}")))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}
