//! Status banner close command.

use clap::Args;

use gigboard_core::error::AppError;
use gigboard_core::types::TimestampMs;
use gigboard_entity::status::{AccountStatus, StatusSeverity};
use gigboard_notify::dismissal::DismissalKey;

use crate::context::Context;
use crate::output;

/// Arguments for the dismiss command
#[derive(Debug, Args)]
pub struct DismissArgs {
    /// Reason text of the status
    #[arg(short, long)]
    pub reason: String,

    /// Creation time of the status, in milliseconds
    #[arg(short, long)]
    pub created_at: TimestampMs,

    /// Status severity
    #[arg(short, long, default_value = "warning")]
    pub severity: String,
}

/// Execute the dismiss command
pub async fn execute(args: &DismissArgs, ctx: &Context) -> Result<(), AppError> {
    let severity: StatusSeverity = args.severity.parse()?;
    let status = AccountStatus::new(severity, args.reason.clone(), args.created_at);

    ctx.feed.dismiss_warning(&status).await?;

    if severity.is_dismissible() {
        output::print_status(&format!(
            "Dismissed {}",
            DismissalKey::for_status(&status)
        ));
    } else {
        output::print_notice(&format!(
            "{severity} banners cannot be dismissed; hidden for this run only"
        ));
    }
    Ok(())
}
