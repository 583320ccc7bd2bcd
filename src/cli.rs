//! CLI interface for git-event-monitor.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod batch;
pub mod check;

use crate::platform::{GatewaySet, GiteeGateway, GitHubGateway, Platform};
use crate::utils::Settings;

/// git-event-monitor: checks repositories for pushes before a deadline.
#[derive(Parser)]
#[command(name = "git-event-monitor")]
#[command(
    about = "Checks GitHub and Gitee repositories for code submissions before a deadline",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Checks a single repository.
    Check(check::CheckCommand),
    /// Checks every repository listed in a CSV or Excel file.
    Batch(batch::BatchCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check(check_cmd) => check_cmd.execute().await,
            Commands::Batch(batch_cmd) => batch_cmd.execute().await,
        }
    }
}

/// Builds the production gateways, honouring base URL overrides.
pub(crate) fn gateway_set(settings: &Settings) -> GatewaySet {
    GatewaySet::new(
        Box::new(GitHubGateway::with_base_url(
            settings.api_base_url(Platform::GitHub),
        )),
        Box::new(GiteeGateway::with_base_url(
            settings.api_base_url(Platform::Gitee),
        )),
    )
}
