//! Batch command: annotates a CSV or Excel roster of repositories.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::analysis::{ComplianceAnalyzer, Language};
use crate::batch::{BatchOptions, BatchProcessor, ColumnNames};
use crate::platform::Platform;
use crate::utils::{describe_token, Settings};

/// Batch command options.
#[derive(Parser)]
pub struct BatchCommand {
    /// CSV or Excel (.xlsx, .xls) file with a header row and one repository
    /// per row.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// First row to process; row 1 is the header.
    #[arg(value_name = "START_ROW")]
    pub start_row: usize,

    /// Last row to process, inclusive.
    #[arg(value_name = "END_ROW")]
    pub end_row: usize,

    /// GitHub token (falls back to GITHUB_TOKEN).
    #[arg(long)]
    pub github_token: Option<String>,

    /// Gitee token (falls back to GITEE_TOKEN).
    #[arg(long)]
    pub gitee_token: Option<String>,

    /// Deadline in RFC 3339 form.
    #[arg(long)]
    pub deadline: Option<String>,

    /// Language of written labels and default column names: en or zh.
    #[arg(long, default_value = "en")]
    pub lang: Language,

    /// Header of the repository column.
    #[arg(long)]
    pub repo_column: Option<String>,

    /// Header of the name column.
    #[arg(long)]
    pub name_column: Option<String>,

    /// Header of the accessibility result column.
    #[arg(long)]
    pub access_column: Option<String>,

    /// Header of the submission status result column.
    #[arg(long)]
    pub status_column: Option<String>,
}

impl BatchCommand {
    /// Executes the batch command.
    pub async fn execute(self) -> Result<()> {
        if self.start_row < 2 {
            bail!(
                "START_ROW must be at least 2 (row 1 is the header), got {}",
                self.start_row
            );
        }
        if self.end_row < self.start_row {
            bail!(
                "END_ROW ({}) must not be less than START_ROW ({})",
                self.end_row,
                self.start_row
            );
        }

        let settings = Settings::load()?;
        let options = self.options(&settings);

        println!(
            "\u{1f4c2} Processing {} rows {}-{}",
            self.file.display(),
            options.start_row,
            options.end_row
        );
        println!(
            "\u{1f511} GitHub token: {}, Gitee token: {}",
            describe_token(options.github_token.as_deref()),
            describe_token(options.gitee_token.as_deref())
        );
        if let Some(deadline) = &options.deadline {
            println!("\u{23f0} Deadline: {deadline}");
        }

        let processor = BatchProcessor::new(
            super::gateway_set(&settings),
            ComplianceAnalyzer::new().with_language(self.lang),
        );
        let (output, summary) = processor.process_file(&self.file, &options).await?;

        println!("\n\u{2705} Wrote {}", output.display());
        println!("\u{1f4ca} {summary}");
        Ok(())
    }

    fn options(&self, settings: &Settings) -> BatchOptions {
        let defaults = ColumnNames::for_language(self.lang);
        let pick = |value: &Option<String>, default: String| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or(default, String::from)
        };

        BatchOptions {
            start_row: self.start_row,
            end_row: self.end_row,
            deadline: self.deadline.clone().filter(|d| !d.trim().is_empty()),
            github_token: settings.resolve_token(Platform::GitHub, self.github_token.clone()),
            gitee_token: settings.resolve_token(Platform::Gitee, self.gitee_token.clone()),
            language: self.lang,
            columns: ColumnNames {
                repository: pick(&self.repo_column, defaults.repository),
                name: pick(&self.name_column, defaults.name),
                accessibility: pick(&self.access_column, defaults.accessibility),
                status: pick(&self.status_column, defaults.status),
            },
        }
    }
}
