//! Excel workbook export, one worksheet per archetype.

use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use super::{cells, ensure_parent, headers, ExportError, ExportValue};
use crate::models::{AnalysisReport, ArchetypeResult};

const MAX_SHEET_NAME: usize = 31;
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Write a workbook with one sheet per scored archetype, in report order.
pub fn write_xlsx(report: &AnalysisReport, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let percent_format = Format::new().set_num_format("0%");
    let rating_format = Format::new().set_num_format("0.00");

    let mut used_names = HashSet::new();
    for result in &report.archetypes {
        let name = unique_sheet_name(&result.archetype, &mut used_names);
        let sheet = workbook.add_worksheet();
        sheet.set_name(&name)?;
        write_archetype(sheet, result, &header_format, &rating_format, &percent_format)?;
        debug!("Wrote sheet '{}' ({} rows)", name, result.records.len());
    }

    workbook.save(path)?;

    info!(
        "Wrote {} archetype sheets to {}",
        report.archetypes.len(),
        path.display()
    );
    Ok(())
}

fn write_archetype(
    sheet: &mut Worksheet,
    result: &ArchetypeResult,
    header_format: &Format,
    rating_format: &Format,
    percent_format: &Format,
) -> Result<(), ExportError> {
    for (col_idx, header) in headers(result).iter().enumerate() {
        sheet.write_string_with_format(0, col_idx as u16, header, header_format)?;
    }

    for (row_idx, record) in result.records.iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, value) in cells(record).into_iter().enumerate() {
            let col = col_idx as u16;
            match value {
                ExportValue::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                ExportValue::Rating(n) => {
                    sheet.write_number_with_format(row, col, n, rating_format)?;
                }
                ExportValue::Percentile(n) => {
                    sheet.write_number_with_format(row, col, n, percent_format)?;
                }
            }
        }
    }

    Ok(())
}

/// Excel sheet names: at most 31 characters, none of `[]:*?/\`, not blank.
pub fn sheet_name(archetype: &str) -> String {
    let cleaned: String = archetype
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();

    if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    }
}

/// Sheet names are compared case-insensitively by Excel.
fn unique_sheet_name(archetype: &str, used: &mut HashSet<String>) -> String {
    let base = sheet_name(archetype);
    let mut candidate = base.clone();
    let mut n = 2;
    while !used.insert(candidate.to_lowercase()) {
        let suffix = format!(" ({})", n);
        let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
        candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support;
    use tempfile::TempDir;

    #[test]
    fn test_sheet_name_sanitized() {
        assert_eq!(sheet_name("Sweeper Keeper"), "Sweeper Keeper");
        assert_eq!(sheet_name("Box/Box [Mid]"), "Box_Box _Mid_");
        assert_eq!(sheet_name(&"x".repeat(40)).chars().count(), 31);
        assert_eq!(sheet_name("  "), "Sheet");
    }

    #[test]
    fn test_unique_sheet_names() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("Poacher", &mut used), "Poacher");
        assert_eq!(unique_sheet_name("poacher", &mut used), "poacher (2)");

        let long = "y".repeat(40);
        let first = unique_sheet_name(&long, &mut used);
        let second = unique_sheet_name(&long, &mut used);
        assert_eq!(first.chars().count(), 31);
        assert!(second.ends_with(" (2)"));
        assert_eq!(second.chars().count(), 31);
    }

    #[test]
    fn test_write_xlsx() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.xlsx");

        write_xlsx(&test_support::report(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }
}
