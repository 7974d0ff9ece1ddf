//! Feed display command.

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use gigboard_core::error::AppError;
use gigboard_core::types::timestamp::to_datetime;
use gigboard_entity::notification::NotificationType;
use gigboard_notify::feed::FeedFilter;
use gigboard_notify::grouping::DisplayItem;

use crate::context::Context;
use crate::output::{self, OutputFormat};

/// Which records to include
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Every record
    All,
    /// Unread records only
    Unread,
}

/// Arguments for the feed command
#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Read-state filter
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Only records of this type (e.g. profile_view); overrides --filter
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
}

/// Feed display row
#[derive(Debug, Serialize, Tabled)]
struct FeedRow {
    /// Entry ID
    id: String,
    /// Notification type
    #[tabled(rename = "type")]
    kind: String,
    /// Records in the entry
    count: usize,
    /// Read
    read: bool,
    /// Latest record time
    latest: String,
    /// Text
    text: String,
}

impl From<&DisplayItem> for FeedRow {
    fn from(item: &DisplayItem) -> Self {
        let text = match item {
            DisplayItem::Record(record) => record.title.clone(),
            DisplayItem::Group(group) => group.description.clone(),
        };
        Self {
            id: item.id().to_string(),
            kind: item.source_type().to_string(),
            count: item.count(),
            read: item.is_read(),
            latest: to_datetime(item.timestamp())
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| item.timestamp().to_string()),
            text,
        }
    }
}

/// Execute the feed command
pub async fn execute(args: &FeedArgs, ctx: &Context, format: OutputFormat) -> Result<(), AppError> {
    let filter = match (&args.kind, args.filter) {
        (Some(kind), _) => FeedFilter::ByType(kind.parse::<NotificationType>()?),
        (None, FilterArg::Unread) => FeedFilter::Unread,
        (None, FilterArg::All) => FeedFilter::All,
    };

    let items = ctx.feed.get_display_feed(filter);
    match format {
        OutputFormat::Json => output::print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<FeedRow> = items.iter().map(FeedRow::from).collect();
            output::print_rows(&rows, format, "No notifications")
        }
    }
}
