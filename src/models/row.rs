//! Rows and row-sets with a file-driven column schema.

use std::collections::HashMap;

use serde::Serialize;

use super::Cell;

/// A single player-season: column name → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Cell>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Text value of a column, if present and textual.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Cell::as_text)
    }

    /// Numeric value of a column, if present and numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Cell::as_number)
    }

    /// Numeric value with nulls and missing columns read as zero.
    /// Used by scoring formulas only; coercion never defaults to zero.
    pub fn stat(&self, column: &str) -> f64 {
        self.number(column).unwrap_or(0.0)
    }

    /// Percentage column read as a fraction (37 → 0.37).
    pub fn ratio(&self, column: &str) -> f64 {
        self.stat(column) / 100.0
    }

    /// Display string for a column; missing and null render as empty.
    pub fn display(&self, column: &str) -> String {
        self.get(column).map(Cell::display_string).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered collection of rows plus their column schema.
///
/// The schema is the union of column names in first-observed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    /// An empty row-set with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Add a column to the schema if it is not already present.
    pub fn add_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Keep rows matching the predicate; the schema is unchanged.
    pub fn filter(self, mut keep: impl FnMut(&Row) -> bool) -> Self {
        let rows = self.rows.into_iter().filter(|r| keep(r)).collect();
        Self {
            columns: self.columns,
            rows,
        }
    }

    /// Rewrite one column in every row. Rows missing the column are left alone.
    pub fn map_column(mut self, column: &str, mut f: impl FnMut(&Cell) -> Cell) -> Self {
        for row in &mut self.rows {
            if let Some(cell) = row.get(column) {
                let updated = f(cell);
                row.set(column, updated);
            }
        }
        self
    }

    /// Add a derived column computed from each whole row.
    pub fn derive(mut self, column: &str, mut f: impl FnMut(&Row) -> Cell) -> Self {
        for row in &mut self.rows {
            let value = f(row);
            row.set(column, value);
        }
        self.add_column(column);
        self
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowSet {
        RowSet::new(
            vec!["UID".to_string(), "Mins".to_string()],
            vec![
                Row::new().with("UID", "1").with("Mins", "900"),
                Row::new().with("UID", "2").with("Mins", "10"),
            ],
        )
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::new()
            .with("Name", "A. Keeper")
            .with("xGP/90", 0.4)
            .with("Sv %", 75.0)
            .with("Cln/90", Cell::Null);

        assert_eq!(row.text("Name"), Some("A. Keeper"));
        assert_eq!(row.number("Name"), None);
        assert_eq!(row.number("xGP/90"), Some(0.4));
        assert_eq!(row.stat("Cln/90"), 0.0);
        assert_eq!(row.stat("Missing"), 0.0);
        assert!((row.ratio("Sv %") - 0.75).abs() < 1e-12);
        assert_eq!(row.display("Cln/90"), "");
    }

    #[test]
    fn test_filter_keeps_schema() {
        let set = sample().filter(|r| r.text("UID") == Some("1"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.columns(), &["UID".to_string(), "Mins".to_string()]);
    }

    #[test]
    fn test_map_column() {
        let set = sample().map_column("Mins", |_| Cell::Number(1.0));
        assert!(set.iter().all(|r| r.number("Mins") == Some(1.0)));
    }

    #[test]
    fn test_derive_adds_column_once() {
        let set = sample()
            .derive("Flag", |_| Cell::Number(1.0))
            .derive("Flag", |_| Cell::Number(2.0));
        assert_eq!(set.columns().iter().filter(|c| *c == "Flag").count(), 1);
        assert!(set.iter().all(|r| r.number("Flag") == Some(2.0)));
    }
}
