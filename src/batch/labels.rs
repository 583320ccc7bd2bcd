//! Column names and cell labels written by the batch workflow.

use crate::analysis::Language;
use crate::data::analysis::AnalysisOutcome;

/// Header names the batch workflow reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// Column holding the repository reference (required).
    pub repository: String,
    /// Column holding a display name (optional).
    pub name: String,
    /// Result column for reachability.
    pub accessibility: String,
    /// Result column for the deadline verdict.
    pub status: String,
}

impl ColumnNames {
    /// Default column names for `language`.
    pub fn for_language(language: Language) -> Self {
        let (repository, name, accessibility, status) = match language {
            Language::English => ("repository", "name", "accessibility", "submission status"),
            Language::Chinese => ("代码仓库地址", "姓名", "是否可访问", "是否准时提交"),
        };
        Self {
            repository: repository.to_string(),
            name: name.to_string(),
            accessibility: accessibility.to_string(),
            status: status.to_string(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self::for_language(Language::English)
    }
}

/// Returns the accessibility cell label.
pub fn accessibility_label(accessible: bool, language: Language) -> &'static str {
    match (language, accessible) {
        (Language::English, true) => "accessible",
        (Language::English, false) => "inaccessible",
        (Language::Chinese, true) => "可访问",
        (Language::Chinese, false) => "不可访问",
    }
}

/// Value written to the submission status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Newest push at or before the deadline.
    OnTime,
    /// Newest push after the deadline.
    Late,
    /// Push found, no deadline given.
    NoDeadline,
    /// The commit-existence check failed.
    AnalysisFailed,
    /// Commits exist but no push event surfaced.
    InitialCommit,
    /// The repository has no commits.
    EmptyRepository,
    /// A timestamp could not be compared.
    Undetermined,
}

impl RowStatus {
    /// Maps an outcome to a status; `None` for unreachable repositories,
    /// whose status cell is left untouched.
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Option<Self> {
        match outcome {
            AnalysisOutcome::Unreachable { .. } => None,
            AnalysisOutcome::CommitCheckFailed => Some(Self::AnalysisFailed),
            AnalysisOutcome::NoRecentPushEvent => Some(Self::InitialCommit),
            AnalysisOutcome::EmptyRepository => Some(Self::EmptyRepository),
            AnalysisOutcome::NotEvaluated { .. } => Some(Self::NoDeadline),
            AnalysisOutcome::InvalidTimestamp { .. } => Some(Self::Undetermined),
            AnalysisOutcome::OnTime { .. } => Some(Self::OnTime),
            AnalysisOutcome::Late { .. } => Some(Self::Late),
        }
    }

    /// Returns the cell label.
    pub fn label(self, language: Language) -> &'static str {
        match language {
            Language::English => match self {
                Self::OnTime => "on time",
                Self::Late => "late",
                Self::NoDeadline => "no deadline set",
                Self::AnalysisFailed => "analysis failed",
                Self::InitialCommit => "initial commit (submission time unknown)",
                Self::EmptyRepository => "empty repository (submission time unknown)",
                Self::Undetermined => "undetermined",
            },
            Language::Chinese => match self {
                Self::OnTime => "准时提交",
                Self::Late => "超时提交",
                Self::NoDeadline => "未设置截止时间",
                Self::AnalysisFailed => "分析失败",
                Self::InitialCommit => "初始提交（无法检查提交时间）",
                Self::EmptyRepository => "空仓库（无法检查提交时间）",
                Self::Undetermined => "无法确定",
            },
        }
    }
}
