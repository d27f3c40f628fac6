//! JSON export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::info;

use super::{cells, ensure_parent, headers, ExportError, ExportValue};
use crate::models::{AnalysisReport, ArchetypeResult};

/// Build the JSON document for a report.
///
/// Each archetype's rows are objects keyed by the exported column headers,
/// so rating fields carry the archetype's own labels.
pub fn report_to_json(report: &AnalysisReport) -> Value {
    let archetypes: Vec<Value> = report.archetypes.iter().map(archetype_json).collect();

    json!({
        "generated_at": report.generated_at,
        "summary": report.summary,
        "archetypes": archetypes,
    })
}

fn archetype_json(result: &ArchetypeResult) -> Value {
    let headers = headers(result);
    let rows: Vec<Value> = result
        .records
        .iter()
        .map(|record| {
            let object: Map<String, Value> = headers
                .iter()
                .cloned()
                .zip(cells(record).into_iter().map(value_json))
                .collect();
            Value::Object(object)
        })
        .collect();

    json!({
        "archetype": result.archetype,
        "label": result.label,
        "adjusted_label": result.adjusted_label(),
        "rows": rows,
    })
}

fn value_json(value: ExportValue<'_>) -> Value {
    match value {
        ExportValue::Text(s) => Value::String(s.to_string()),
        ExportValue::Rating(n) | ExportValue::Percentile(n) => json!(n),
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json(report: &AnalysisReport, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report_to_json(report))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "Wrote {} archetypes to {}",
        report.archetypes.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support;
    use tempfile::TempDir;

    #[test]
    fn test_rows_keyed_by_labels() {
        let value = report_to_json(&test_support::report());
        let first = &value["archetypes"][0]["rows"][0];

        assert_eq!(first["UID"], "1");
        assert_eq!(first["Name"], "Alisson <GK>");
        assert_eq!(first["SK Rating"], 0.8);
        assert_eq!(first["Adjusted SK Rating"], 0.4);
        assert_eq!(first["Percentile"], 1.0);
        assert_eq!(value["archetypes"][0]["adjusted_label"], "Adjusted SK Rating");
    }

    #[test]
    fn test_summary_included() {
        let value = report_to_json(&test_support::report());
        assert_eq!(value["summary"]["rows_scored"], 2);
        assert_eq!(value["generated_at"], "2024-07-01T12:00:00Z");
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("report.json");

        write_json(&test_support::report(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["archetypes"].as_array().unwrap().len(), 1);
    }
}
