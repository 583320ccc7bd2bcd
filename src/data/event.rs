//! Platform event shapes and the unified event model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Event type that marks a code push.
pub const PUSH_EVENT: &str = "PushEvent";

/// Platform-neutral repository event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedEvent {
    /// Event identifier.
    pub id: String,
    /// Event type, e.g. `PushEvent`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// ISO-8601 creation timestamp, verbatim from the platform.
    pub created_at: String,
    /// Login of the user who triggered the event.
    pub actor_login: String,
    /// Avatar URL of the actor.
    pub actor_avatar_url: String,
    /// Full repository name (`owner/repo`).
    pub repo_name: String,
    /// Repository URL as reported by the platform.
    pub repo_url: String,
    /// Event payload, never interpreted.
    pub payload: Map<String, Value>,
}

impl UnifiedEvent {
    /// Returns true for code-submission events.
    pub fn is_code_submission(&self) -> bool {
        self.event_type == PUSH_EVENT
    }

    /// Returns a short `<type> (<timestamp>)` description.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.event_type, self.created_at)
    }
}

/// Accepts ids encoded either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Actor block of a GitHub event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubActor {
    /// Login name.
    #[serde(default)]
    pub login: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: String,
}

/// Repository block of a GitHub event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubRepo {
    /// `owner/repo`.
    #[serde(default)]
    pub name: String,
    /// API URL of the repository.
    #[serde(default)]
    pub url: String,
}

/// Event as returned by `GET /repos/{owner}/{repo}/events` on GitHub.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEvent {
    /// Event identifier.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Event type.
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Acting user.
    #[serde(default)]
    pub actor: GitHubActor,
    /// Target repository.
    #[serde(default)]
    pub repo: GitHubRepo,
    /// Opaque payload.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl From<GitHubEvent> for UnifiedEvent {
    fn from(event: GitHubEvent) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type,
            created_at: event.created_at,
            actor_login: event.actor.login,
            actor_avatar_url: event.actor.avatar_url,
            repo_name: event.repo.name,
            repo_url: event.repo.url,
            payload: event.payload,
        }
    }
}

/// Actor block of a Gitee event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GiteeActor {
    /// Login name.
    #[serde(default)]
    pub login: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: String,
}

/// Repository block of a Gitee event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GiteeRepo {
    /// `owner/repo`.
    #[serde(default)]
    pub full_name: String,
    /// Web URL of the repository.
    #[serde(default)]
    pub html_url: String,
}

/// Event as returned by `GET /repos/{owner}/{repo}/events` on Gitee.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeEvent {
    /// Event identifier (numeric on Gitee).
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Event type.
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Acting user.
    #[serde(default)]
    pub actor: GiteeActor,
    /// Target repository.
    #[serde(default)]
    pub repo: GiteeRepo,
    /// Opaque payload.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl From<GiteeEvent> for UnifiedEvent {
    fn from(event: GiteeEvent) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type,
            created_at: event.created_at,
            actor_login: event.actor.login,
            actor_avatar_url: event.actor.avatar_url,
            repo_name: event.repo.full_name,
            repo_url: event.repo.html_url,
            payload: event.payload,
        }
    }
}
