//! Merging source tables and removing duplicate players.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{columns, Row, RowSet};

/// Result of a merge, with the number of rows discarded as duplicates.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub rows: RowSet,
    pub duplicates_removed: usize,
}

/// Concatenate row-sets in order and keep the first row seen for each UID.
///
/// The schema is the union of the inputs' columns in first-observed order.
/// Rows without a UID (missing, null or empty) cannot be matched against
/// each other and are all kept.
pub fn merge_sources(sources: Vec<RowSet>) -> MergeOutcome {
    let mut schema: Vec<String> = Vec::new();
    let mut seen_columns: HashSet<String> = HashSet::new();
    let mut seen_uids: HashSet<String> = HashSet::new();
    let mut rows: Vec<Row> = Vec::new();
    let mut duplicates_removed = 0;

    for source in sources {
        let (source_columns, source_rows) = source.into_parts();
        for column in source_columns {
            if seen_columns.insert(column.clone()) {
                schema.push(column);
            }
        }

        for row in source_rows {
            let duplicate = uid_key(&row).is_some_and(|uid| !seen_uids.insert(uid.to_string()));
            if duplicate {
                debug!("Dropping duplicate UID {}", row.display(columns::UID));
                duplicates_removed += 1;
                continue;
            }
            rows.push(row);
        }
    }

    info!(
        "Merged {} rows ({} duplicates removed)",
        rows.len(),
        duplicates_removed
    );

    MergeOutcome {
        rows: RowSet::new(schema, rows),
        duplicates_removed,
    }
}

fn uid_key(row: &Row) -> Option<&str> {
    row.text(columns::UID).filter(|uid| !uid.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source(label: &str, uids: &[&str]) -> RowSet {
        let rows = uids
            .iter()
            .map(|uid| Row::new().with("UID", *uid).with("Signability", label))
            .collect();
        RowSet::new(vec!["UID".to_string(), "Signability".to_string()], rows)
    }

    fn labels(set: &RowSet) -> Vec<(String, String)> {
        set.iter()
            .map(|r| (r.display("UID"), r.display("Signability")))
            .collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let outcome = merge_sources(vec![
            source("A", &["7"]),
            source("B", &["7"]),
            source("C", &["9"]),
        ]);

        assert_eq!(
            labels(&outcome.rows),
            vec![
                ("7".to_string(), "A".to_string()),
                ("9".to_string(), "C".to_string()),
            ]
        );
        assert_eq!(outcome.duplicates_removed, 1);
    }

    #[test]
    fn test_duplicates_within_one_source() {
        let outcome = merge_sources(vec![source("A", &["1", "2", "1"])]);
        assert_eq!(outcome.rows.len(), 2);
    }

    #[test]
    fn test_no_sources() {
        let outcome = merge_sources(vec![]);
        assert!(outcome.rows.is_empty());
        assert!(outcome.rows.columns().is_empty());
    }

    #[test]
    fn test_empty_sources_contribute_nothing() {
        let outcome = merge_sources(vec![RowSet::empty(), source("B", &["3"]), RowSet::empty()]);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows.columns().len(), 2);
    }

    #[test]
    fn test_rows_without_uid_are_kept() {
        let rows = vec![
            Row::new().with("Name", "No id"),
            Row::new().with("Name", "Also no id"),
            Row::new().with("UID", "").with("Name", "Blank id"),
        ];
        let set = RowSet::new(vec!["UID".to_string(), "Name".to_string()], rows);
        let outcome = merge_sources(vec![set]);
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(outcome.duplicates_removed, 0);
    }

    #[test]
    fn test_schema_union_in_order() {
        let a = RowSet::new(vec!["UID".to_string(), "Name".to_string()], vec![]);
        let b = RowSet::new(vec!["UID".to_string(), "Club".to_string()], vec![]);
        let outcome = merge_sources(vec![a, b]);
        assert_eq!(
            outcome.rows.columns(),
            &["UID".to_string(), "Name".to_string(), "Club".to_string()]
        );
    }
}
