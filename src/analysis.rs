//! Deadline-compliance analysis of a single repository.
//!
//! The analyzer walks a fixed sequence: fetch events, keep push events,
//! fall back to a commit-existence check when none surfaced, then compare
//! the newest push against the deadline. Every failure along the way ends
//! in an [`AnalysisOutcome`] variant; nothing is propagated.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, warn};

pub mod duration;

pub use duration::{describe_difference, format_duration, Language};

use crate::data::analysis::{
    AnalysisOutcome, AnalysisRequest, RepositoryAnalysis, TimestampError,
};
use crate::data::event::UnifiedEvent;
use crate::platform::{GatewayFuture, PlatformGateway, TransportError};

/// Upper bound for each individual gateway call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the compliance state machine against a platform gateway.
#[derive(Debug, Clone)]
pub struct ComplianceAnalyzer {
    timeout: Duration,
    language: Language,
}

impl Default for ComplianceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceAnalyzer {
    /// Creates an analyzer with the default timeout and English output.
    pub fn new() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            language: Language::English,
        }
    }

    /// Overrides the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the language of rendered time differences.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    async fn bounded<T>(&self, call: GatewayFuture<'_, T>) -> Result<T, TransportError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(TransportError::Timeout(self.timeout)))
    }

    /// Analyses one repository.
    pub async fn analyze(
        &self,
        gateway: &dyn PlatformGateway,
        request: &AnalysisRequest,
    ) -> RepositoryAnalysis {
        let repo = request.repository.as_str();
        let token = request.token.as_deref();

        if gateway.platform() != request.platform {
            warn!(
                requested = %request.platform,
                gateway = %gateway.platform(),
                "Gateway platform does not match request"
            );
        }

        let events = match self.bounded(gateway.fetch_events(repo, token)).await {
            Ok(events) => events,
            Err(e) => {
                warn!(repo, error = %e, "Failed to fetch repository events");
                return RepositoryAnalysis {
                    events_checked: 0,
                    outcome: AnalysisOutcome::Unreachable {
                        error: e.to_string(),
                    },
                };
            }
        };

        let events_checked = events.len();
        let pushes: Vec<UnifiedEvent> = events
            .into_iter()
            .filter(UnifiedEvent::is_code_submission)
            .collect();
        debug!(repo, events_checked, push_events = pushes.len(), "Filtered events");

        let Some(latest) = pushes.into_iter().next() else {
            let outcome = match self.bounded(gateway.has_commits(repo, token)).await {
                Ok(true) => AnalysisOutcome::NoRecentPushEvent,
                Ok(false) => AnalysisOutcome::EmptyRepository,
                Err(e) => {
                    warn!(repo, error = %e, "Failed to check repository commits");
                    AnalysisOutcome::CommitCheckFailed
                }
            };
            info!(repo, ?outcome, "No push event found");
            return RepositoryAnalysis {
                events_checked,
                outcome,
            };
        };

        let outcome = match request.deadline.as_deref() {
            None => AnalysisOutcome::NotEvaluated { event: latest },
            Some(deadline) => evaluate_deadline(latest, deadline, self.language),
        };

        RepositoryAnalysis {
            events_checked,
            outcome,
        }
    }
}

fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|e| format!("{value:?}: {e}"))
}

/// Compares a push event against a deadline.
///
/// A push exactly at the deadline counts as on time.
pub fn evaluate_deadline(
    event: UnifiedEvent,
    deadline: &str,
    language: Language,
) -> AnalysisOutcome {
    let deadline_at = match parse_instant(deadline) {
        Ok(instant) => instant,
        Err(e) => {
            return AnalysisOutcome::InvalidTimestamp {
                event,
                error: TimestampError::InvalidDeadline(e),
            }
        }
    };
    let event_at = match parse_instant(&event.created_at) {
        Ok(instant) => instant,
        Err(e) => {
            return AnalysisOutcome::InvalidTimestamp {
                event,
                error: TimestampError::InvalidEventTime(e),
            }
        }
    };

    let on_time = event_at <= deadline_at;
    let delta = if on_time {
        deadline_at - event_at
    } else {
        event_at - deadline_at
    };
    let time_difference = describe_difference(delta, on_time, language);

    debug!(
        pushed_at = %event_at,
        deadline = %deadline_at,
        on_time,
        "Compared push against deadline"
    );

    if on_time {
        AnalysisOutcome::OnTime {
            event,
            time_difference,
        }
    } else {
        AnalysisOutcome::Late {
            event,
            time_difference,
        }
    }
}
