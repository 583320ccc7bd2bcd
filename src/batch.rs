//! Batch compliance check over the rows of a tabular file.
//!
//! Each data row in the requested range names a repository. The row is
//! classified, analysed against the deadline and annotated in place with an
//! accessibility label and a submission status label.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

pub mod labels;

pub use labels::{accessibility_label, ColumnNames, RowStatus};

use crate::analysis::{ComplianceAnalyzer, Language};
use crate::data::analysis::AnalysisRequest;
use crate::platform::{classify, GatewaySet, Platform};
use crate::table::{self, RecordTable, TableError};

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// First data row to process, 1-based with the header as row 1.
    pub start_row: usize,
    /// Last data row to process, inclusive.
    pub end_row: usize,
    /// RFC 3339 deadline; rows are not evaluated against time when absent.
    pub deadline: Option<String>,
    /// Token used for GitHub rows.
    pub github_token: Option<String>,
    /// Token used for Gitee rows.
    pub gitee_token: Option<String>,
    /// Language of written labels.
    pub language: Language,
    /// Column names to read and write.
    pub columns: ColumnNames,
}

impl BatchOptions {
    /// Creates options for rows `start_row..=end_row` with English labels.
    pub fn new(start_row: usize, end_row: usize) -> Self {
        Self {
            start_row,
            end_row,
            deadline: None,
            github_token: None,
            gitee_token: None,
            language: Language::English,
            columns: ColumnNames::default(),
        }
    }

    fn token_for(&self, platform: Platform) -> Option<String> {
        match platform {
            Platform::GitHub => self.github_token.clone(),
            Platform::Gitee => self.gitee_token.clone(),
        }
    }

    /// Checks the row range against a table of `rows` rows.
    pub fn validate_range(&self, rows: usize) -> Result<(), TableError> {
        if self.start_row < 2 {
            return Err(TableError::InvalidRange(format!(
                "start row must be at least 2 (row 1 is the header), got {}",
                self.start_row
            )));
        }
        if self.end_row < self.start_row {
            return Err(TableError::InvalidRange(format!(
                "end row {} is before start row {}",
                self.end_row, self.start_row
            )));
        }
        if self.end_row > rows {
            return Err(TableError::InvalidRange(format!(
                "end row {} exceeds the {rows} rows in the file",
                self.end_row
            )));
        }
        Ok(())
    }
}

/// Counters reported at the end of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows that were analysed.
    pub processed: usize,
    /// Rows skipped for a missing or unrecognised repository cell.
    pub skipped: usize,
    /// Analysed rows whose repository could not be reached.
    pub inaccessible: usize,
    /// Rows marked on time.
    pub on_time: usize,
    /// Rows marked late.
    pub late: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed: {}, skipped: {}, inaccessible: {}, on time: {}, late: {}",
            self.processed, self.skipped, self.inaccessible, self.on_time, self.late
        )
    }
}

/// Runs the compliance analyzer over table rows.
pub struct BatchProcessor {
    gateways: GatewaySet,
    analyzer: ComplianceAnalyzer,
}

impl BatchProcessor {
    /// Creates a processor over the given gateways.
    pub fn new(gateways: GatewaySet, analyzer: ComplianceAnalyzer) -> Self {
        Self { gateways, analyzer }
    }

    /// Annotates rows `start_row..=end_row` of `table` in place.
    ///
    /// Result columns are appended when missing. Rows whose repository
    /// cannot be reached get only the accessibility label.
    pub async fn process(
        &self,
        table: &mut RecordTable,
        options: &BatchOptions,
    ) -> Result<BatchSummary, TableError> {
        options.validate_range(table.len())?;

        let columns = &options.columns;
        let repo_column = table
            .find_column(&columns.repository)
            .ok_or_else(|| TableError::MissingColumn(columns.repository.clone()))?;
        let name_column = table.find_column(&columns.name);
        let access_column = table.ensure_column(&columns.accessibility);
        let status_column = table.ensure_column(&columns.status);
        debug!(
            repo_column,
            ?name_column,
            access_column,
            status_column,
            "Resolved batch columns"
        );

        let language = options.language;
        let mut summary = BatchSummary::default();

        for row_number in options.start_row..=options.end_row {
            let row = row_number - 1;
            let raw = table.cell(row, repo_column).unwrap_or_default().trim();
            let Some(reference) = classify(raw) else {
                println!("\u{23ed}\u{fe0f}  Row {row_number}: skipped, no repository reference");
                summary.skipped += 1;
                continue;
            };

            let name = name_column
                .and_then(|column| table.cell(row, column))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("-")
                .to_string();
            println!("\u{1f50d} Row {row_number}: {name} ({reference})");

            let request = AnalysisRequest::new(&reference)
                .with_token(options.token_for(reference.platform))
                .with_deadline(options.deadline.clone());
            let analysis = self
                .analyzer
                .analyze(self.gateways.get(reference.platform), &request)
                .await;
            summary.processed += 1;

            let accessible = analysis.is_accessible();
            table.set_cell(
                row,
                access_column,
                accessibility_label(accessible, language),
            );

            match RowStatus::from_outcome(&analysis.outcome) {
                Some(status) => {
                    table.set_cell(row, status_column, status.label(language));
                    match status {
                        RowStatus::OnTime => summary.on_time += 1,
                        RowStatus::Late => summary.late += 1,
                        _ => {}
                    }
                    println!("   \u{2192} {}", status.label(language));
                }
                None => {
                    summary.inaccessible += 1;
                    println!("   \u{2192} {}", accessibility_label(false, language));
                }
            }
        }

        info!(%summary, "Batch run finished");
        Ok(summary)
    }

    /// Reads `path`, annotates the requested rows and writes the result to
    /// `<stem>_processed.csv` (or `.xlsx` for Excel input) next to the input.
    pub async fn process_file(
        &self,
        path: &Path,
        options: &BatchOptions,
    ) -> Result<(PathBuf, BatchSummary)> {
        let output = table::processed_path(path)?;
        let mut records = table::read_table(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let summary = self.process(&mut records, options).await?;

        table::write_table(&output, &records)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        Ok((output, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_utils::{event, MockGateway};
    use crate::platform::TransportError;

    fn table(rows: &[&[&str]]) -> RecordTable {
        RecordTable::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        )
    }

    fn processor(github: MockGateway, gitee: MockGateway) -> BatchProcessor {
        BatchProcessor::new(
            GatewaySet::new(Box::new(github), Box::new(gitee)),
            ComplianceAnalyzer::new(),
        )
    }

    fn options(start: usize, end: usize) -> BatchOptions {
        BatchOptions {
            deadline: Some("2024-03-15T18:00:00Z".to_string()),
            ..BatchOptions::new(start, end)
        }
    }

    #[test]
    fn range_validation() {
        assert!(BatchOptions::new(2, 3).validate_range(3).is_ok());
        for (start, end) in [(1, 2), (3, 2), (2, 4)] {
            assert!(matches!(
                BatchOptions::new(start, end).validate_range(3),
                Err(TableError::InvalidRange(_))
            ));
        }
    }

    #[tokio::test]
    async fn annotates_rows_per_outcome() {
        let github = MockGateway::new(Platform::GitHub)
            .with_events(Ok(vec![event("PushEvent", "2024-03-15T17:00:00Z")]))
            .with_events(Ok(vec![event("PushEvent", "2024-03-15T19:00:00Z")]))
            .with_events(Err(TransportError::Status(404)));
        let gitee = MockGateway::new(Platform::Gitee)
            .with_events(Ok(vec![event("IssueEvent", "2024-03-15T17:00:00Z")]))
            .with_commits(Ok(false));
        let mut t = table(&[
            &["name", "repository"],
            &["alice", "https://github.com/a/early"],
            &["bob", "github.com/b/late"],
            &["carol", "git@github.com:c/gone.git"],
            &["dave", "gitee.com/d/empty"],
        ]);

        let summary = processor(github, gitee)
            .process(&mut t, &options(2, 5))
            .await
            .unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                processed: 4,
                skipped: 0,
                inaccessible: 1,
                on_time: 1,
                late: 1,
            }
        );
        assert_eq!(
            t.header(),
            ["name", "repository", "accessibility", "submission status"]
        );
        assert_eq!(t.rows()[1][2..], ["accessible", "on time"]);
        assert_eq!(t.rows()[2][2..], ["accessible", "late"]);
        assert_eq!(t.rows()[3][2..], ["inaccessible", ""]);
        assert_eq!(
            t.rows()[4][2..],
            ["accessible", "empty repository (submission time unknown)"]
        );
    }

    #[tokio::test]
    async fn skips_unrecognised_rows_and_honours_range() {
        let github = MockGateway::new(Platform::GitHub)
            .with_events(Ok(vec![event("PushEvent", "2024-03-15T17:00:00Z")]));
        let calls = github.calls();
        let mut t = table(&[
            &["repository"],
            &["github.com/outside/range"],
            &["not a repository"],
            &[],
            &["https://github.com/a/b https://gitee.com/c/d"],
            &["github.com/a/b"],
        ]);

        let summary = processor(github, MockGateway::new(Platform::Gitee))
            .process(&mut t, &options(3, 6))
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(calls.fetch_events(), 1);
        assert_eq!(t.rows()[1], ["github.com/outside/range", "", ""]);
        assert_eq!(
            t.rows()[4],
            ["https://github.com/a/b https://gitee.com/c/d", "", ""]
        );
        assert_eq!(t.rows()[5], ["github.com/a/b", "accessible", "on time"]);
    }

    #[tokio::test]
    async fn routes_tokens_by_platform() {
        let github = MockGateway::new(Platform::GitHub)
            .with_events(Ok(vec![event("PushEvent", "2024-03-15T17:00:00Z")]));
        let gitee = MockGateway::new(Platform::Gitee)
            .with_events(Ok(vec![event("PushEvent", "2024-03-15T17:00:00Z")]));
        let github_tokens = github.tokens();
        let gitee_tokens = gitee.tokens();
        let mut t = table(&[&["repository"], &["github.com/a/b"], &["gitee.com/c/d"]]);
        let opts = BatchOptions {
            github_token: Some("gh-token".to_string()),
            gitee_token: Some("ge-token".to_string()),
            ..options(2, 3)
        };

        processor(github, gitee).process(&mut t, &opts).await.unwrap();

        assert_eq!(*github_tokens.lock().unwrap(), [Some("gh-token".to_string())]);
        assert_eq!(*gitee_tokens.lock().unwrap(), [Some("ge-token".to_string())]);
    }

    #[tokio::test]
    async fn chinese_labels_and_existing_columns() {
        let github = MockGateway::new(Platform::GitHub)
            .with_events(Ok(vec![event("PushEvent", "2024-03-15T17:00:00Z")]));
        let mut t = table(&[
            &["姓名", "代码仓库地址", "是否可访问", "是否准时提交"],
            &["张三", "github.com/a/b", "", "旧值"],
        ]);
        let opts = BatchOptions {
            deadline: None,
            language: Language::Chinese,
            columns: ColumnNames::for_language(Language::Chinese),
            ..BatchOptions::new(2, 2)
        };

        processor(github, MockGateway::new(Platform::Gitee))
            .process(&mut t, &opts)
            .await
            .unwrap();

        assert_eq!(t.rows()[1], ["张三", "github.com/a/b", "可访问", "未设置截止时间"]);
    }

    #[tokio::test]
    async fn missing_repository_column() {
        let mut t = table(&[&["name"], &["alice"]]);
        let err = processor(
            MockGateway::new(Platform::GitHub),
            MockGateway::new(Platform::Gitee),
        )
        .process(&mut t, &BatchOptions::new(2, 2))
        .await
        .unwrap_err();

        assert!(matches!(err, TableError::MissingColumn(ref c) if c == "repository"));
        assert_eq!(t.len(), 2);
        assert_eq!(t.header(), ["name"]);
    }
}
