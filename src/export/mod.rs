//! Report exporters.
//!
//! All exporters read an [`AnalysisReport`] and lay each archetype out with
//! the same columns: the player fields, the raw and adjusted rating under the
//! archetype's labels, then the percentile.

mod html;
mod json;
mod xlsx;

pub use html::{render_html, write_html};
pub use json::{report_to_json, write_json};
pub use xlsx::{sheet_name, write_xlsx};

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::{ArchetypeRecord, ArchetypeResult};

/// Errors writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

const PLAYER_COLUMNS: [&str; 7] = [
    "UID",
    "Name",
    "Position",
    "Club",
    "Division",
    "Signability",
    "Transfer Value",
];

const PERCENTILE_COLUMN: &str = "Percentile";

/// One exported cell.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportValue<'a> {
    Text(&'a str),
    Rating(f64),
    Percentile(f64),
}

/// Column headers for an archetype table.
fn headers(result: &ArchetypeResult) -> Vec<String> {
    PLAYER_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain([
            result.label.clone(),
            result.adjusted_label(),
            PERCENTILE_COLUMN.to_string(),
        ])
        .collect()
}

/// Cells for one record, in [`headers`] order.
fn cells(record: &ArchetypeRecord) -> [ExportValue<'_>; 10] {
    [
        ExportValue::Text(&record.uid),
        ExportValue::Text(&record.name),
        ExportValue::Text(&record.position),
        ExportValue::Text(&record.club),
        ExportValue::Text(&record.division),
        ExportValue::Text(&record.signability),
        ExportValue::Text(&record.transfer_value),
        ExportValue::Rating(record.rating),
        ExportValue::Rating(record.adjusted_rating),
        ExportValue::Percentile(record.percentile),
    ]
}

/// Ratings are shown to two decimals.
pub fn format_rating(value: f64) -> String {
    format!("{:.2}", value)
}

/// Percentiles are shown as whole percentages.
pub fn format_percentile(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
