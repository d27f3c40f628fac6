//! CSV (delimited text) table extraction.

use super::IngestError;

/// Read every record of a CSV document as trimmed strings.
///
/// The first record is returned like any other; header handling happens in
/// the caller. Records may have differing lengths.
pub fn extract_csv_rows(text: &str) -> Result<Vec<Vec<String>>, IngestError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
