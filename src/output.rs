//! Rendering of command results for the terminal.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use gigboard_core::result::AppResult;

/// How command results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty JSON
    Json,
}

/// Render rows as a table, or as a JSON array. An empty table renders as
/// `empty` instead of a bare header.
pub fn render_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat, empty: &str) -> AppResult<String> {
    match format {
        OutputFormat::Table if rows.is_empty() => Ok(empty.to_string()),
        OutputFormat::Table => Ok(Table::new(rows).with(Style::rounded()).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Print rows to stdout.
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat, empty: &str) -> AppResult<()> {
    println!("{}", render_rows(rows, format, empty)?);
    Ok(())
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Outcome line after a state change.
pub fn print_status(msg: &str) {
    println!("✓ {msg}");
}

/// A request that ran but did not do what was asked.
pub fn print_notice(msg: &str) {
    eprintln!("⚠ {msg}");
}
