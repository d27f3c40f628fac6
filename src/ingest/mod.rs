//! Row ingestion.
//!
//! Turns an exported player table (HTML or CSV) into a [`RowSet`] tagged
//! with its [`Signability`]. The first row is the header. Division names are
//! canonicalized and UIDs normalized on the way in.

mod delimited;
mod html;

pub use delimited::extract_csv_rows;
pub use html::extract_table_rows;

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::leagues::LeagueNameFixes;
use crate::models::{columns, normalize_uid, Cell, Row, RowSet, Signability};

/// Structural problems with a source table. These fail the whole run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No <table> element found in HTML source")]
    NoTable,

    #[error("Source table has no header row")]
    MissingHeader,

    #[error("Source table header has no column names")]
    EmptyHeader,

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Table encoding of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Html,
    Csv,
}

impl SourceFormat {
    /// Pick a format from the file extension, falling back to sniffing the
    /// content: markup starts with `<`, anything else is read as CSV.
    pub fn detect(path: Option<&Path>, text: &str) -> Self {
        let ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("html") | Some("htm") => SourceFormat::Html,
            Some("csv") => SourceFormat::Csv,
            _ => {
                if text.trim_start_matches('\u{feff}').trim_start().starts_with('<') {
                    SourceFormat::Html
                } else {
                    SourceFormat::Csv
                }
            }
        }
    }
}

/// Ingest one optional source.
///
/// `None` or whitespace-only text yields an empty row-set with no columns.
pub fn ingest_source(
    text: Option<&str>,
    format: SourceFormat,
    signability: Signability,
    fixes: &LeagueNameFixes,
) -> Result<RowSet, IngestError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        debug!("No input for '{}', using an empty table", signability);
        return Ok(RowSet::empty());
    };

    let raw_rows = match format {
        SourceFormat::Html => extract_table_rows(text)?,
        SourceFormat::Csv => extract_csv_rows(text)?,
    };

    let rows = build_row_set(raw_rows, signability, fixes)?;
    info!("Ingested {} rows from '{}'", rows.len(), signability);
    Ok(rows)
}

/// Build a row-set from raw cell text, first row as header.
pub fn build_row_set(
    raw_rows: Vec<Vec<String>>,
    signability: Signability,
    fixes: &LeagueNameFixes,
) -> Result<RowSet, IngestError> {
    let mut raw_rows = raw_rows.into_iter();
    let header = raw_rows
        .next()
        .filter(|h| !h.is_empty())
        .ok_or(IngestError::MissingHeader)?;

    let slots = header_slots(&header);
    if slots.iter().all(Option::is_none) {
        return Err(IngestError::EmptyHeader);
    }

    let mut schema: Vec<String> = slots.iter().flatten().cloned().collect();
    if schema.iter().any(|c| c == columns::SIGNABILITY) {
        warn!(
            "Source already has a '{}' column, overriding it with '{}'",
            columns::SIGNABILITY,
            signability
        );
    } else {
        schema.push(columns::SIGNABILITY.to_string());
    }

    let mut rows = Vec::new();
    for (line, cells) in raw_rows.enumerate() {
        if cells.is_empty() {
            continue;
        }
        if cells.len() > slots.len() {
            debug!(
                "Row {} has {} cells for {} columns, ignoring the extras",
                line + 1,
                cells.len(),
                slots.len()
            );
        }

        let mut row = Row::new();
        for (slot, value) in slots.iter().zip(cells) {
            if let Some(column) = slot {
                row.set(column.as_str(), normalize_field(column, value, fixes));
            }
        }
        row.set(columns::SIGNABILITY, signability.label());
        rows.push(row);
    }

    Ok(RowSet::new(schema, rows))
}

/// Map header positions to column names. Blank names and repeated names
/// (after the first) map to `None` and their cells are discarded.
fn header_slots(header: &[String]) -> Vec<Option<String>> {
    let mut seen = HashSet::new();
    header
        .iter()
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            if !seen.insert(name.to_string()) {
                warn!("Duplicate column '{}' in header, keeping the first", name);
                return None;
            }
            Some(name.to_string())
        })
        .collect()
}

fn normalize_field(column: &str, value: String, fixes: &LeagueNameFixes) -> Cell {
    match column {
        columns::DIVISION => Cell::Text(fixes.canonicalize(&value).to_string()),
        columns::UID => Cell::Text(normalize_uid(&value)),
        _ => Cell::Text(value),
    }
}
