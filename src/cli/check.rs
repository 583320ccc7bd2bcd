//! Check command: analyses a single repository.

use anyhow::{Context, Result};
use clap::Parser;

use crate::analysis::{ComplianceAnalyzer, Language};
use crate::data::analysis::AnalysisRequest;
use crate::output::{self, OutputFormat};
use crate::platform::{classify, Platform, RepositoryReference};
use crate::utils::{describe_token, Settings};

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Repository URL (https, ssh or bare host form) or `owner/repo`.
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    /// Platform used when REPOSITORY is a bare `owner/repo`.
    #[arg(long, default_value = "github")]
    pub platform: Platform,

    /// Access token (falls back to GITHUB_TOKEN / GITEE_TOKEN).
    #[arg(long)]
    pub token: Option<String>,

    /// Deadline in RFC 3339 form, e.g. 2024-03-15T18:00:00+08:00.
    #[arg(long)]
    pub deadline: Option<String>,

    /// Output format: table (default) or json.
    #[arg(long, default_value = "table")]
    pub output: OutputFormat,

    /// Language of the time difference: en (default) or zh.
    #[arg(long, default_value = "en")]
    pub lang: Language,
}

impl CheckCommand {
    /// Executes the check command.
    pub async fn execute(self) -> Result<()> {
        let reference = self.reference()?;
        let settings = Settings::load()?;
        let token = settings.resolve_token(reference.platform, self.token.clone());

        if self.output == OutputFormat::Table {
            println!(
                "\u{1f50d} Checking {} (token: {})",
                reference.canonical_url(),
                describe_token(token.as_deref())
            );
        }

        let gateways = super::gateway_set(&settings);
        let analyzer = ComplianceAnalyzer::new().with_language(self.lang);
        let request = AnalysisRequest::new(&reference)
            .with_token(token)
            .with_deadline(self.deadline.clone());

        let analysis = analyzer
            .analyze(gateways.get(reference.platform), &request)
            .await;

        let rendered = output::render(&analysis.to_result(), self.output)
            .context("Failed to render analysis result")?;
        print!("{rendered}");
        if self.output == OutputFormat::Json {
            println!();
        }
        Ok(())
    }

    /// Resolves the positional argument to a repository reference.
    fn reference(&self) -> Result<RepositoryReference> {
        classify(&self.repository)
            .or_else(|| RepositoryReference::from_full_name(self.platform, &self.repository))
            .with_context(|| {
                format!(
                    "Unrecognised repository '{}': expected a GitHub or Gitee URL, or owner/repo",
                    self.repository
                )
            })
    }
}
