//! Field coercion pass.
//!
//! Runs in a fixed order:
//! 1. minutes filter (drops insignificant player-seasons before any scoring)
//! 2. percentage columns (`"37%"` → 37)
//! 3. distance per 90 (`"11.4km"` → 11.4)
//! 4. league multiplier from the division's power rating
//! 5. generic numeric pass over every remaining non-text column
//!
//! Percentage and distance columns get their custom parsing before the
//! generic pass, which would otherwise null them. Text columns are never
//! touched.

use regex::Regex;
use tracing::info;

use crate::leagues::LeaguePowerTable;
use crate::models::cell::parse_number;
use crate::models::{columns, Cell, RowSet};

/// Default minimum minutes for a row to be scored.
pub const DEFAULT_MIN_MINUTES: f64 = 900.0;

/// Coerced rows plus the number of rows dropped by the minutes filter.
#[derive(Debug, Clone)]
pub struct CoercionOutcome {
    pub rows: RowSet,
    pub below_minutes: usize,
}

/// Run the full coercion pass.
pub fn clean_and_convert(
    rows: RowSet,
    power: &LeaguePowerTable,
    min_minutes: f64,
) -> CoercionOutcome {
    let before = rows.len();
    let rows = filter_minutes(rows, min_minutes);
    let below_minutes = before - rows.len();
    if below_minutes > 0 {
        info!(
            "Dropped {} rows under {} minutes",
            below_minutes, min_minutes
        );
    }

    let rows = convert_percentages(rows);
    let rows = convert_distance(rows);
    let rows = annotate_league_multiplier(rows, power);
    let rows = convert_numeric(rows);

    CoercionOutcome {
        rows,
        below_minutes,
    }
}

/// Keep rows whose `Mins` parses to at least `min_minutes`.
/// Without a `Mins` column every row is kept.
pub fn filter_minutes(rows: RowSet, min_minutes: f64) -> RowSet {
    if !rows.has_column(columns::MINUTES) {
        return rows;
    }
    rows.filter(|row| {
        row.get(columns::MINUTES)
            .and_then(cell_number)
            .is_some_and(|mins| mins >= min_minutes)
    })
}

/// Parse every percentage column that is present.
pub fn convert_percentages(mut rows: RowSet) -> RowSet {
    for column in columns::PERCENTAGE_COLUMNS {
        if rows.has_column(column) {
            rows = rows.map_column(column, |cell| match cell {
                Cell::Text(s) => parse_percentage(s).into(),
                other => other.clone(),
            });
        }
    }
    rows
}

/// Strip `%` and `-` literals, then parse.
///
/// The minus sign is removed rather than honoured, so `"-12%"` reads as 12.
/// A bare `"-"` (the game's "no data" marker) becomes `None`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '%' && *c != '-').collect();
    parse_number(&cleaned)
}

/// Pull the first number out of the `Dist/90` column.
pub fn convert_distance(rows: RowSet) -> RowSet {
    if !rows.has_column(columns::DISTANCE_PER_90) {
        return rows;
    }
    let number = Regex::new(r"\d+(?:\.\d+)?").expect("static regex");
    rows.map_column(columns::DISTANCE_PER_90, |cell| match cell {
        Cell::Text(s) => extract_first_number(&number, s).into(),
        other => other.clone(),
    })
}

fn extract_first_number(pattern: &Regex, raw: &str) -> Option<f64> {
    pattern
        .find(raw)
        .and_then(|m| parse_number(m.as_str()))
}

/// Add `League Multiplier` (power / 100) when a `Division` column exists.
pub fn annotate_league_multiplier(rows: RowSet, power: &LeaguePowerTable) -> RowSet {
    if !rows.has_column(columns::DIVISION) {
        return rows;
    }
    rows.derive(columns::LEAGUE_MULTIPLIER, |row| {
        Cell::Number(power.multiplier(row.text(columns::DIVISION)))
    })
}

/// Parse every column that is not text, provenance or percentage.
/// Cells that are already numbers are kept; anything unparseable is null.
pub fn convert_numeric(mut rows: RowSet) -> RowSet {
    let targets: Vec<String> = rows
        .columns()
        .iter()
        .filter(|c| is_numeric_column(c))
        .cloned()
        .collect();

    for column in &targets {
        rows = rows.map_column(column, |cell| cell_number(cell).into());
    }
    rows
}

fn is_numeric_column(column: &str) -> bool {
    !columns::is_text_column(column)
        && column != columns::SIGNABILITY
        && !columns::is_percentage_column(column)
}

fn cell_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => parse_number(s),
        Cell::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leagues::LeagueNameFixes;
    use crate::models::Row;

    fn set(columns: &[&str], rows: Vec<Row>) -> RowSet {
        RowSet::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn test_percentage_parsing() {
        assert_eq!(parse_percentage("37%"), Some(37.0));
        assert_eq!(parse_percentage("-12%"), Some(12.0));
        assert_eq!(parse_percentage("-"), None);
        assert_eq!(parse_percentage(""), None);
        assert_eq!(parse_percentage("n/a"), None);
    }

    #[test]
    fn test_minutes_filter() {
        let rows = set(
            &["UID", "Mins"],
            vec![
                Row::new().with("UID", "1").with("Mins", "899"),
                Row::new().with("UID", "2").with("Mins", "900"),
                Row::new().with("UID", "3").with("Mins", "abc"),
                Row::new().with("UID", "4"),
            ],
        );
        let kept = filter_minutes(rows, DEFAULT_MIN_MINUTES);
        let uids: Vec<String> = kept.iter().map(|r| r.display("UID")).collect();
        assert_eq!(uids, vec!["2"]);
    }

    #[test]
    fn test_no_minutes_column_keeps_all() {
        let rows = set(&["UID"], vec![Row::new().with("UID", "1")]);
        assert_eq!(filter_minutes(rows, DEFAULT_MIN_MINUTES).len(), 1);
    }

    #[test]
    fn test_distance_extraction() {
        let rows = set(
            &["Dist/90"],
            vec![
                Row::new().with("Dist/90", "11.4km"),
                Row::new().with("Dist/90", "12 km"),
                Row::new().with("Dist/90", "-"),
            ],
        );
        let rows = convert_distance(rows);
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.number("Dist/90")).collect();
        assert_eq!(values, vec![Some(11.4), Some(12.0), None]);
        assert!(rows.rows()[2].get("Dist/90").unwrap().is_null());
    }

    #[test]
    fn test_league_multiplier_with_fallback() {
        let power = LeaguePowerTable::from_entries(
            [("Premier League", 90.0), ("Others", 5.0)],
            5.0,
            &LeagueNameFixes::new(),
        );
        let rows = set(
            &["Division"],
            vec![
                Row::new().with("Division", "Premier League"),
                Row::new().with("Division", "Championship"),
            ],
        );
        let rows = annotate_league_multiplier(rows, &power);
        assert!(rows.has_column("League Multiplier"));
        let m: Vec<f64> = rows
            .iter()
            .map(|r| r.number("League Multiplier").unwrap())
            .collect();
        assert!((m[0] - 0.90).abs() < 1e-12);
        assert!((m[1] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_pass_respects_text_columns() {
        let rows = set(
            &["UID", "Name", "Transfer Value", "Signability", "xG/90", "Tck/90"],
            vec![Row::new()
                .with("UID", "12")
                .with("Name", "1234")
                .with("Transfer Value", "£1.2M")
                .with("Signability", "Available on Loan")
                .with("xG/90", "0.35")
                .with("Tck/90", "-")],
        );
        let rows = convert_numeric(rows);
        let row = &rows.rows()[0];
        assert_eq!(row.text("UID"), Some("12"));
        assert_eq!(row.text("Name"), Some("1234"));
        assert_eq!(row.text("Transfer Value"), Some("£1.2M"));
        assert_eq!(row.text("Signability"), Some("Available on Loan"));
        assert_eq!(row.number("xG/90"), Some(0.35));
        assert!(row.get("Tck/90").unwrap().is_null());
    }

    #[test]
    fn test_empty_numeric_is_null_not_zero() {
        let rows = set(&["Gls/90"], vec![Row::new().with("Gls/90", "")]);
        let rows = convert_numeric(rows);
        assert!(rows.rows()[0].get("Gls/90").unwrap().is_null());
    }

    #[test]
    fn test_full_pass_order() {
        let power = LeaguePowerTable::from_entries(
            [("Premier League", 80.0)],
            5.0,
            &LeagueNameFixes::new(),
        );
        let rows = set(
            &["UID", "Mins", "Division", "Pas %", "Dist/90", "K Ps/90", "Signability"],
            vec![
                Row::new()
                    .with("UID", "1")
                    .with("Mins", "2500")
                    .with("Division", "Premier League")
                    .with("Pas %", "88%")
                    .with("Dist/90", "10.9km")
                    .with("K Ps/90", "1.7")
                    .with("Signability", "Available for Transfer"),
                Row::new().with("UID", "2").with("Mins", "100"),
            ],
        );

        let outcome = clean_and_convert(rows, &power, DEFAULT_MIN_MINUTES);
        assert_eq!(outcome.below_minutes, 1);
        assert_eq!(outcome.rows.len(), 1);

        let row = &outcome.rows.rows()[0];
        assert_eq!(row.number("Mins"), Some(2500.0));
        assert_eq!(row.number("Pas %"), Some(88.0));
        assert_eq!(row.number("Dist/90"), Some(10.9));
        assert_eq!(row.number("K Ps/90"), Some(1.7));
        assert!((row.number("League Multiplier").unwrap() - 0.8).abs() < 1e-12);
        assert_eq!(row.text("Division"), Some("Premier League"));
    }
}
