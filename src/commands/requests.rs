//! Follow request commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use gigboard_core::error::AppError;
use gigboard_core::types::RequesterId;
use gigboard_notify::bulk::{BulkActionResult, BulkSummary};

use crate::context::Context;
use crate::output::{self, OutputFormat};

/// Arguments for request commands
#[derive(Debug, Args)]
pub struct RequestsArgs {
    /// Request subcommand
    #[command(subcommand)]
    pub command: RequestsCommand,
}

/// Request subcommands
#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List pending follow requests
    List,
    /// Accept requests one at a time
    Accept {
        /// Requester IDs; all pending requests if omitted
        ids: Vec<String>,
    },
    /// Decline requests one at a time
    Decline {
        /// Requester IDs; all pending requests if omitted
        ids: Vec<String>,
    },
}

/// Pending request display row
#[derive(Debug, Serialize, Tabled)]
struct RequestRow {
    /// Requester ID
    requester: String,
    /// Display name
    name: String,
    /// Sent at (ms)
    created_at: i64,
}

/// Bulk result display row
#[derive(Debug, Serialize, Tabled)]
struct ResultRow {
    /// Requester ID
    requester: String,
    /// Outcome
    outcome: String,
    /// Error detail
    error: String,
}

impl From<&BulkActionResult<RequesterId>> for ResultRow {
    fn from(result: &BulkActionResult<RequesterId>) -> Self {
        Self {
            requester: result.request_id.to_string(),
            outcome: if result.is_success() { "ok" } else { "failed" }.to_string(),
            error: result.error().map(|e| e.message.clone()).unwrap_or_default(),
        }
    }
}

/// Execute a request command
pub async fn execute(args: &RequestsArgs, ctx: &Context, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        RequestsCommand::List => {
            let rows: Vec<RequestRow> = ctx
                .feed
                .pending_requests()
                .await?
                .into_iter()
                .map(|r| RequestRow {
                    requester: r.requester_id.into_inner(),
                    name: r.requester_name,
                    created_at: r.created_at,
                })
                .collect();
            output::print_rows(&rows, format, "No pending follow requests")?;
        }
        RequestsCommand::Accept { ids } => {
            ctx.feed.selection().select_all(resolve_ids(ctx, ids).await?)?;
            let summary = ctx.feed.accept_selected().await?;
            report(&summary, format)?;
            let followers = ctx.platform.followers(ctx.feed.user_id()).await;
            tracing::info!(followers = followers.len(), "Follower count after accept");
        }
        RequestsCommand::Decline { ids } => {
            ctx.feed.selection().select_all(resolve_ids(ctx, ids).await?)?;
            let summary = ctx.feed.decline_selected().await?;
            report(&summary, format)?;
        }
    }
    Ok(())
}

/// The given ids, or every pending requester if none were given
async fn resolve_ids(ctx: &Context, ids: &[String]) -> Result<Vec<RequesterId>, AppError> {
    if !ids.is_empty() {
        return Ok(ids.iter().map(|id| RequesterId::from(id.as_str())).collect());
    }
    Ok(ctx
        .feed
        .pending_requests()
        .await?
        .into_iter()
        .map(|r| r.requester_id)
        .collect())
}

fn report(summary: &BulkSummary<RequesterId>, format: OutputFormat) -> Result<(), AppError> {
    if format == OutputFormat::Json {
        return output::print_json(summary);
    }

    let rows: Vec<ResultRow> = summary.results.iter().map(ResultRow::from).collect();
    output::print_rows(&rows, format, "No requests selected")?;
    if summary.failed > 0 {
        output::print_notice(&format!(
            "{} succeeded, {} failed and stay pending",
            summary.succeeded, summary.failed
        ));
    } else {
        output::print_status(&format!("{} succeeded", summary.succeeded));
    }
    Ok(())
}
