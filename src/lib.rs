//! # git-event-monitor
//!
//! Checks whether GitHub and Gitee repositories received a push before a
//! deadline, one repository at a time or in bulk from a CSV or Excel roster.
//!
//! ## Quick Start
//!
//! ```rust
//! use git_event_monitor::platform::{classify, Platform};
//!
//! let reference = classify("https://github.com/microsoft/vscode.git").unwrap();
//! assert_eq!(reference.platform, Platform::GitHub);
//! assert_eq!(reference.full_name(), "microsoft/vscode");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod data;
pub mod output;
pub mod platform;
pub mod table;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of git-event-monitor.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
