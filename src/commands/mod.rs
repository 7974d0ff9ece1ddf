//! CLI command definitions and dispatch.

pub mod dismiss;
pub mod dismissals;
pub mod feed;
pub mod requests;
pub mod unread;

use clap::{Parser, Subcommand};

use gigboard_core::config::AppConfig;
use gigboard_core::error::AppError;

use crate::context::Context;
use crate::output::OutputFormat;

/// Gigboard — notification lifecycle engine
#[derive(Debug, Parser)]
#[command(name = "gigboard", version, about, long_about = None)]
pub struct Cli {
    /// User or device identity
    #[arg(short, long, default_value = "local")]
    pub user: String,

    /// JSON file with `notifications` and `requests` to serve as the platform
    #[arg(short, long)]
    pub data: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the grouped notification feed
    Feed(feed::FeedArgs),
    /// Show the unread count, optionally marking records read
    Unread(unread::UnreadArgs),
    /// Pending follow requests and bulk accept/decline
    Requests(requests::RequestsArgs),
    /// Close a status banner
    Dismiss(dismiss::DismissArgs),
    /// Inspect or clear dismissed warnings
    Dismissals(dismissals::DismissalsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let ctx = Context::build(config, &self.user, self.data.as_deref()).await?;

        match &self.command {
            Commands::Feed(args) => feed::execute(args, &ctx, self.format).await,
            Commands::Unread(args) => unread::execute(args, &ctx, self.format).await,
            Commands::Requests(args) => requests::execute(args, &ctx, self.format).await,
            Commands::Dismiss(args) => dismiss::execute(args, &ctx).await,
            Commands::Dismissals(args) => dismissals::execute(args, &ctx, self.format).await,
        }
    }
}
