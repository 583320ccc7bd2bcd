//! Shared test utilities for gateway consumers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::gateway::{GatewayFuture, PlatformGateway, TransportError};
use super::Platform;
use crate::data::event::UnifiedEvent;

/// Scripted gateway.
///
/// Each call pops the next scripted response; an exhausted queue yields
/// `TransportError::Request("no more mock responses")`. Call counters are
/// shared through [`MockGateway::calls`] so they stay readable after the
/// mock has been boxed.
pub(crate) struct MockGateway {
    platform: Platform,
    events: Mutex<VecDeque<Result<Vec<UnifiedEvent>, TransportError>>>,
    commits: Mutex<VecDeque<Result<bool, TransportError>>>,
    delay: Option<Duration>,
    calls: Arc<CallCounts>,
    tokens: Arc<Mutex<Vec<Option<String>>>>,
}

/// Number of calls made to each gateway operation.
#[derive(Default)]
pub(crate) struct CallCounts {
    pub(crate) fetch_events: AtomicUsize,
    pub(crate) has_commits: AtomicUsize,
}

impl CallCounts {
    pub(crate) fn fetch_events(&self) -> usize {
        self.fetch_events.load(Ordering::SeqCst)
    }

    pub(crate) fn has_commits(&self) -> usize {
        self.has_commits.load(Ordering::SeqCst)
    }
}

impl MockGateway {
    pub(crate) fn new(platform: Platform) -> Self {
        Self {
            platform,
            events: Mutex::new(VecDeque::new()),
            commits: Mutex::new(VecDeque::new()),
            delay: None,
            calls: Arc::new(CallCounts::default()),
            tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a response for `fetch_events`.
    pub(crate) fn with_events(self, response: Result<Vec<UnifiedEvent>, TransportError>) -> Self {
        self.events.lock().unwrap().push_back(response);
        self
    }

    /// Queues a response for `has_commits`.
    pub(crate) fn with_commits(self, response: Result<bool, TransportError>) -> Self {
        self.commits.lock().unwrap().push_back(response);
        self
    }

    /// Delays every response.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Arc<CallCounts> {
        self.calls.clone()
    }

    /// Tokens passed to `fetch_events`, in call order.
    pub(crate) fn tokens(&self) -> Arc<Mutex<Vec<Option<String>>>> {
        self.tokens.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn exhausted() -> TransportError {
    TransportError::Request("no more mock responses".to_string())
}

impl PlatformGateway for MockGateway {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn fetch_events<'a>(
        &'a self,
        _repo: &'a str,
        token: Option<&'a str>,
    ) -> GatewayFuture<'a, Vec<UnifiedEvent>> {
        Box::pin(async move {
            self.calls.fetch_events.fetch_add(1, Ordering::SeqCst);
            self.tokens.lock().unwrap().push(token.map(String::from));
            self.pause().await;
            let next = self.events.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(exhausted()))
        })
    }

    fn has_commits<'a>(
        &'a self,
        _repo: &'a str,
        _token: Option<&'a str>,
    ) -> GatewayFuture<'a, bool> {
        Box::pin(async move {
            self.calls.has_commits.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            let next = self.commits.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(exhausted()))
        })
    }
}

/// Builds a unified event for tests.
pub(crate) fn event(event_type: &str, created_at: &str) -> UnifiedEvent {
    UnifiedEvent {
        id: format!("{event_type}-{created_at}"),
        event_type: event_type.to_string(),
        created_at: created_at.to_string(),
        actor_login: "octocat".to_string(),
        actor_avatar_url: "https://avatars.example/octocat".to_string(),
        repo_name: "owner/repo".to_string(),
        repo_url: "https://api.github.com/repos/owner/repo".to_string(),
        payload: serde_json::Map::new(),
    }
}
