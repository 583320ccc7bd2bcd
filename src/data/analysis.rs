//! Analysis request, terminal outcomes and the flat result record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::UnifiedEvent;
use crate::platform::{Platform, RepositoryReference};

/// Error reported when the commit-existence check itself fails.
pub const ANALYSIS_FAILED: &str = "analysis failed";

/// Error reported when commits exist but no push event surfaced.
pub const NO_RECENT_PUSH_EVENT: &str =
    "has commits but no recent push event (likely bulk/initial commit)";

/// Error reported for repositories without any commit.
pub const REPOSITORY_EMPTY: &str = "repository is empty";

/// Input to a single repository analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Repository as `owner/repo`.
    pub repository: String,
    /// Hosting platform.
    pub platform: Platform,
    /// Optional API token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Optional ISO-8601 deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl AnalysisRequest {
    /// Creates an unauthenticated request without a deadline.
    pub fn new(reference: &RepositoryReference) -> Self {
        Self {
            repository: reference.full_name(),
            platform: reference.platform,
            token: None,
            deadline: None,
        }
    }

    /// Sets the API token; empty tokens are treated as absent.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Sets the deadline; empty deadlines are treated as absent.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<String>) -> Self {
        self.deadline = deadline.filter(|d| !d.trim().is_empty());
        self
    }
}

/// A timestamp that could not be read as an ISO-8601 instant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The supplied deadline is malformed.
    #[error("invalid deadline format: {0}")]
    InvalidDeadline(String),

    /// The event's `created_at` is malformed.
    #[error("invalid event time format: {0}")]
    InvalidEventTime(String),
}

/// Terminal state of one repository analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Events could not be fetched.
    Unreachable {
        /// Transport error message.
        error: String,
    },
    /// No push events and the commit check failed.
    CommitCheckFailed,
    /// No push events although the repository has commits.
    NoRecentPushEvent,
    /// No push events and no commits.
    EmptyRepository,
    /// A push event was found but no deadline was supplied.
    NotEvaluated {
        /// Newest push event.
        event: UnifiedEvent,
    },
    /// A push event was found but a timestamp did not parse.
    InvalidTimestamp {
        /// Newest push event.
        event: UnifiedEvent,
        /// Which timestamp failed.
        error: TimestampError,
    },
    /// Newest push event is at or before the deadline.
    OnTime {
        /// Newest push event.
        event: UnifiedEvent,
        /// Rendered distance to the deadline.
        time_difference: String,
    },
    /// Newest push event is after the deadline.
    Late {
        /// Newest push event.
        event: UnifiedEvent,
        /// Rendered distance to the deadline.
        time_difference: String,
    },
}

/// Outcome of analysing one repository together with the event count.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryAnalysis {
    /// Number of events retrieved, before filtering.
    pub events_checked: usize,
    /// Terminal state.
    pub outcome: AnalysisOutcome,
}

impl RepositoryAnalysis {
    /// Returns false only when events could not be fetched.
    pub fn is_accessible(&self) -> bool {
        !matches!(self.outcome, AnalysisOutcome::Unreachable { .. })
    }

    /// Returns the newest push event, if one was found.
    pub fn last_code_event(&self) -> Option<&UnifiedEvent> {
        match &self.outcome {
            AnalysisOutcome::NotEvaluated { event }
            | AnalysisOutcome::InvalidTimestamp { event, .. }
            | AnalysisOutcome::OnTime { event, .. }
            | AnalysisOutcome::Late { event, .. } => Some(event),
            _ => None,
        }
    }

    /// Returns the deadline verdict, if one was reached.
    pub fn submitted_before(&self) -> Option<bool> {
        match self.outcome {
            AnalysisOutcome::OnTime { .. } => Some(true),
            AnalysisOutcome::Late { .. } => Some(false),
            _ => None,
        }
    }

    /// Flattens the outcome into the serializable result record.
    pub fn to_result(&self) -> AnalysisResult {
        let last_code_event = self.last_code_event().cloned();
        let event_description = last_code_event.as_ref().map(UnifiedEvent::describe);

        let (time_difference, error) = match &self.outcome {
            AnalysisOutcome::Unreachable { error } => (None, Some(error.clone())),
            AnalysisOutcome::CommitCheckFailed => (None, Some(ANALYSIS_FAILED.to_string())),
            AnalysisOutcome::NoRecentPushEvent => (None, Some(NO_RECENT_PUSH_EVENT.to_string())),
            AnalysisOutcome::EmptyRepository => (None, Some(REPOSITORY_EMPTY.to_string())),
            AnalysisOutcome::NotEvaluated { .. } => (None, None),
            AnalysisOutcome::InvalidTimestamp { error, .. } => (None, Some(error.to_string())),
            AnalysisOutcome::OnTime {
                time_difference, ..
            }
            | AnalysisOutcome::Late {
                time_difference, ..
            } => (Some(time_difference.clone()), None),
        };

        AnalysisResult {
            found: last_code_event.is_some(),
            events_checked: if self.is_accessible() {
                self.events_checked
            } else {
                0
            },
            last_code_event,
            submitted_before: self.submitted_before(),
            time_difference,
            event_description,
            error,
        }
    }
}

/// Flat analysis result, as rendered and serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether a push event was found.
    pub found: bool,
    /// Number of events retrieved.
    pub events_checked: usize,
    /// Newest push event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_code_event: Option<UnifiedEvent>,
    /// Deadline verdict; absent when not evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_before: Option<bool>,
    /// Human-readable distance to the deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_difference: Option<String>,
    /// `<type> (<timestamp>)` of the newest push event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    /// Failure or explanation, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
