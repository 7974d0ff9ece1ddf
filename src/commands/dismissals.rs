//! Dismissed warning inspection command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use gigboard_core::error::AppError;

use crate::context::Context;
use crate::output::{self, OutputFormat};

/// Arguments for the dismissals command
#[derive(Debug, Args)]
pub struct DismissalsArgs {
    /// Remove every dismissal
    #[arg(long)]
    pub clear: bool,
}

/// Dismissal display row
#[derive(Debug, Serialize, Tabled)]
struct DismissalRow {
    /// Dismissal key
    key: String,
}

/// Execute the dismissals command
pub async fn execute(args: &DismissalsArgs, ctx: &Context, format: OutputFormat) -> Result<(), AppError> {
    if args.clear {
        let dropped = ctx.dismissals.len();
        ctx.dismissals.clear().await?;
        output::print_status(&format!("Cleared {dropped} dismissal(s)"));
        return Ok(());
    }

    let rows: Vec<DismissalRow> = ctx
        .dismissals
        .keys()
        .into_iter()
        .map(|key| DismissalRow {
            key: key.into_inner(),
        })
        .collect();
    output::print_rows(&rows, format, "No warnings dismissed")
}
