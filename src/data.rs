//! Data structures shared across the analysis pipeline.

pub mod analysis;
pub mod event;

pub use analysis::{
    AnalysisOutcome, AnalysisRequest, AnalysisResult, RepositoryAnalysis, TimestampError,
};
pub use event::{GitHubEvent, GiteeEvent, UnifiedEvent, PUSH_EVENT};
