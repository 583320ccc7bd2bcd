//! Hosting platforms, repository references and the per-platform gateways.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod classify;
pub mod gateway;
pub mod gitee;
pub mod github;
#[cfg(test)]
pub(crate) mod test_utils;

pub use classify::{classify, is_valid_name};
pub use gateway::{GatewayFuture, GatewaySet, PlatformGateway, TransportError};
pub use gitee::GiteeGateway;
pub use github::GitHubGateway;

/// Supported Git hosting platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// github.com
    GitHub,
    /// gitee.com
    Gitee,
}

impl Platform {
    /// All supported platforms, in classification order.
    pub const ALL: [Self; 2] = [Self::GitHub, Self::Gitee];

    /// Returns the web host of the platform.
    pub fn host(self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::Gitee => "gitee.com",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => write!(f, "github"),
            Self::Gitee => write!(f, "gitee"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "gitee" => Ok(Self::Gitee),
            other => Err(format!(
                "unsupported platform: {other} (supported: github, gitee)"
            )),
        }
    }
}

/// A repository on a supported platform.
///
/// Only produced by [`classify`] or [`RepositoryReference::new`], both of
/// which enforce the `[A-Za-z0-9._-]+` rule on owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    /// Hosting platform.
    pub platform: Platform,
    /// Owning user or organisation.
    pub owner: String,
    /// Repository name without any `.git` suffix.
    pub name: String,
}

impl RepositoryReference {
    /// Builds a reference from parts, validating owner and name.
    pub fn new(platform: Platform, owner: &str, name: &str) -> Option<Self> {
        let owner = owner.trim();
        let name = name.trim();
        if is_valid_name(owner) && is_valid_name(name) {
            Some(Self {
                platform,
                owner: owner.to_string(),
                name: name.to_string(),
            })
        } else {
            None
        }
    }

    /// Parses a bare `owner/repo` string for a known platform.
    pub fn from_full_name(platform: Platform, full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        Self::new(platform, owner, name)
    }

    /// Returns `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Returns the canonical bare form, e.g. `github.com/owner/repo`.
    ///
    /// A name that itself ends in `.git` gets an extra `.git` so that
    /// classification strips only the suffix and keeps the name intact.
    pub fn canonical_url(&self) -> String {
        let suffix = if self.name.ends_with(".git") { ".git" } else { "" };
        format!(
            "{}/{}/{}{suffix}",
            self.platform.host(),
            self.owner,
            self.name
        )
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.platform, self.owner, self.name)
    }
}
