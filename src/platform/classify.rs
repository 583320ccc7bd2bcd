//! Repository reference classification.
//!
//! Turns a free-form cell or argument such as `https://github.com/o/r.git`,
//! `git@gitee.com:o/r.git` or `github.com/o/r` into a
//! [`RepositoryReference`]. Anything that cannot be attributed to exactly
//! one repository on a supported platform is rejected.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::{Platform, RepositoryReference};

/// Shortest reference worth pattern matching.
pub const MIN_REFERENCE_LEN: usize = 10;

/// Longest reference worth pattern matching.
pub const MAX_REFERENCE_LEN: usize = 200;

/// Compiled URL shapes for one platform.
struct HostPatterns {
    platform: Platform,
    /// `scheme://host/owner/repo`, `git@host:owner/repo`, `host/owner/repo`.
    shapes: [Regex; 3],
}

impl HostPatterns {
    #[allow(clippy::expect_used)]
    fn for_platform(platform: Platform) -> Self {
        let host = regex::escape(platform.host());
        // Only scheme and host are case-insensitive; owner/repo keep their case.
        let tail = r"([^/\s]+)/([^/\s]+?)(?:\.git)?/?$";
        let compile = |pattern: String| Regex::new(&pattern).expect("static URL pattern compiles");

        Self {
            platform,
            shapes: [
                compile(format!(r"^(?i:https?://{host})[/:]{tail}")),
                compile(format!(r"^(?i:git@{host}):{tail}")),
                compile(format!(r"^(?i:{host})[/:]{tail}")),
            ],
        }
    }
}

fn host_patterns() -> &'static [HostPatterns] {
    static PATTERNS: OnceLock<Vec<HostPatterns>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Platform::ALL
            .iter()
            .map(|&platform| HostPatterns::for_platform(platform))
            .collect()
    })
}

/// Returns true when `name` is a non-empty `[A-Za-z0-9._-]+` identifier.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Cheap structural checks that reject cells holding several links or
/// free text before any pattern work.
///
/// Counting `http` is a heuristic: a single URL whose query string mentions
/// `http` is rejected as well.
fn is_plausible_single_reference(reference: &str) -> bool {
    if reference.contains('\n') || reference.matches("http").count() > 1 {
        return false;
    }
    (MIN_REFERENCE_LEN..=MAX_REFERENCE_LEN).contains(&reference.len())
}

/// Classifies a free-form repository reference.
///
/// Returns `None` for anything unrecognised; callers skip such inputs
/// without recording a result.
pub fn classify(raw: &str) -> Option<RepositoryReference> {
    let reference = raw.trim();

    if !is_plausible_single_reference(reference) {
        debug!(reference, "Rejected repository reference before matching");
        return None;
    }

    for host in host_patterns() {
        for shape in &host.shapes {
            let Some(captures) = shape.captures(reference) else {
                continue;
            };
            let owner = captures.get(1).map_or("", |m| m.as_str());
            let name = captures.get(2).map_or("", |m| m.as_str());

            if let Some(classified) = RepositoryReference::new(host.platform, owner, name) {
                debug!(reference, repository = %classified, "Classified repository reference");
                return Some(classified);
            }
        }
    }

    debug!(reference, "Unrecognised repository reference");
    None
}
