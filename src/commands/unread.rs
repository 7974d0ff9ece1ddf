//! Unread count and mark-as-read command.

use clap::Args;
use serde::Serialize;

use gigboard_core::error::AppError;
use gigboard_core::types::NotificationId;

use crate::context::Context;
use crate::output::{self, OutputFormat};

/// Arguments for the unread command
#[derive(Debug, Args)]
pub struct UnreadArgs {
    /// Mark these records read first
    #[arg(short, long = "mark", value_name = "ID")]
    pub mark: Vec<String>,

    /// Mark every record read first
    #[arg(long, conflicts_with = "mark")]
    pub all: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnreadReport {
    unread_count: usize,
    version: u64,
}

/// Execute the unread command
pub async fn execute(args: &UnreadArgs, ctx: &Context, format: OutputFormat) -> Result<(), AppError> {
    if args.all {
        ctx.feed.request_mark_all_read().await?;
    }
    for id in &args.mark {
        ctx.feed.request_mark_read(&NotificationId::from(id.as_str())).await?;
    }

    let rx = ctx.feed.subscribe();
    let snapshot = rx.borrow().clone();
    match format {
        OutputFormat::Json => output::print_json(&UnreadReport {
            unread_count: snapshot.unread_count,
            version: snapshot.version,
        }),
        OutputFormat::Table => {
            println!("{}", snapshot.unread_count);
            Ok(())
        }
    }
}
