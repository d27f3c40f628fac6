//! League power ratings and the derived league multiplier.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use thiserror::Error;
use tracing::{debug, warn};

use super::LeagueNameFixes;
use crate::models::cell::parse_number;

/// Key used for divisions missing from the table.
pub const FALLBACK_LEAGUE: &str = "Others";

/// Power rating injected when a table has no `"Others"` entry.
pub const DEFAULT_FALLBACK_POWER: f64 = 5.0;

const LEAGUE_HEADER: &str = "League";
const POWER_HEADER: &str = "Power Rating";

/// Errors loading a league power sheet.
#[derive(Debug, Error)]
pub enum LeagueTableError {
    #[error("League power sheet is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("League power sheet is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("League power workbook could not be read: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("League power workbook has no worksheets")]
    NoWorksheet,
}

/// File encoding of a league power sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSheetFormat {
    Csv,
    Workbook,
}

impl PowerSheetFormat {
    /// Pick a format from the file extension, falling back to the zip and
    /// OLE signatures spreadsheet files start with.
    pub fn detect(path: Option<&Path>, bytes: &[u8]) -> Self {
        let ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => PowerSheetFormat::Workbook,
            Some("csv") => PowerSheetFormat::Csv,
            _ if bytes.starts_with(b"PK\x03\x04")
                || bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) =>
            {
                PowerSheetFormat::Workbook
            }
            _ => PowerSheetFormat::Csv,
        }
    }
}

/// Division name → power rating on a 0–100 scale.
///
/// Always contains [`FALLBACK_LEAGUE`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeaguePowerTable {
    ratings: HashMap<String, f64>,
}

impl Default for LeaguePowerTable {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_POWER)
    }
}

impl LeaguePowerTable {
    /// A table holding only the fallback entry.
    pub fn new(fallback_power: f64) -> Self {
        let mut ratings = HashMap::new();
        ratings.insert(FALLBACK_LEAGUE.to_string(), fallback_power);
        Self { ratings }
    }

    /// Build from `(league, power)` pairs.
    ///
    /// League names are canonicalized with `fixes`. If the pairs do not
    /// include `"Others"`, `fallback_power` is injected for it.
    pub fn from_entries<I, K>(entries: I, fallback_power: f64, fixes: &LeagueNameFixes) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut table = Self::new(fallback_power);
        for (league, power) in entries {
            table.insert(fixes.canonicalize(league.as_ref()), power);
        }
        table
    }

    /// Load from a CSV sheet with `League` and `Power Rating` columns.
    pub fn from_csv_reader<R: Read>(
        rdr: R,
        fallback_power: f64,
        fixes: &LeagueNameFixes,
    ) -> Result<Self, LeagueTableError> {
        let entries = read_power_sheet(rdr)?;
        Ok(Self::from_entries(entries, fallback_power, fixes))
    }

    pub fn insert(&mut self, league: impl Into<String>, power: f64) {
        self.ratings.insert(league.into(), power);
    }

    pub fn fallback_power(&self) -> f64 {
        self.ratings
            .get(FALLBACK_LEAGUE)
            .copied()
            .unwrap_or(DEFAULT_FALLBACK_POWER)
    }

    /// Power rating for a division, falling back to `"Others"`.
    pub fn power(&self, division: Option<&str>) -> f64 {
        division
            .and_then(|d| self.ratings.get(d))
            .copied()
            .unwrap_or_else(|| self.fallback_power())
    }

    /// League multiplier: power rating / 100.
    pub fn multiplier(&self, division: Option<&str>) -> f64 {
        self.power(division) / 100.0
    }

    /// Entries sorted by power (descending), then name.
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .ratings
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Read `(league, power)` pairs from a CSV sheet with `League` and
/// `Power Rating` columns.
///
/// Rows with a blank league or a non-numeric rating are skipped.
pub fn read_power_sheet<R: Read>(rdr: R) -> Result<Vec<(String, f64)>, LeagueTableError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let (league_idx, power_idx) = header_indices(&headers)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        push_entry(
            &mut entries,
            record.get(league_idx).unwrap_or_default(),
            record.get(power_idx).and_then(parse_number),
        );
    }

    debug!("Read {} league power ratings", entries.len());
    Ok(entries)
}

/// Read `(league, power)` pairs from the first worksheet of a spreadsheet
/// (xlsx, xls, xlsb or ods). The first row holds the headers.
pub fn read_power_workbook(bytes: &[u8]) -> Result<Vec<(String, f64)>, LeagueTableError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LeagueTableError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    let (league_idx, power_idx) = header_indices(&headers)?;

    let mut entries = Vec::new();
    for row in rows {
        let league = row.get(league_idx).map(cell_text).unwrap_or_default();
        let power = row.get(power_idx).and_then(cell_number);
        push_entry(&mut entries, &league, power);
    }

    debug!("Read {} league power ratings from workbook", entries.len());
    Ok(entries)
}

/// Read a sheet in either format.
pub fn read_power_entries(
    bytes: &[u8],
    format: PowerSheetFormat,
) -> Result<Vec<(String, f64)>, LeagueTableError> {
    match format {
        PowerSheetFormat::Csv => read_power_sheet(bytes),
        PowerSheetFormat::Workbook => read_power_workbook(bytes),
    }
}

fn header_indices(headers: &[String]) -> Result<(usize, usize), LeagueTableError> {
    let find = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LeagueTableError::MissingColumn(name))
    };
    Ok((find(LEAGUE_HEADER)?, find(POWER_HEADER)?))
}

fn push_entry(entries: &mut Vec<(String, f64)>, league: &str, power: Option<f64>) {
    let league = league.trim();
    if league.is_empty() {
        return;
    }
    match power {
        Some(power) => entries.push((league.to_string(), power)),
        None => warn!("Skipping league '{}': power rating is not a number", league),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(n) => Some(*n).filter(|n| n.is_finite()),
        Data::Int(n) => Some(*n as f64),
        Data::String(s) => parse_number(s),
        _ => None,
    }
}
