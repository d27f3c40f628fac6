//! Archetype scoring engine.
//!
//! For each archetype:
//! - filter rows by the eligibility rule (no eligible rows → no result)
//! - raw rating from the formula, adjusted by the row's league multiplier
//! - min-max percentile of the adjusted rating within the eligible set
//! - stable sort, best adjusted rating first

pub mod archetypes;

pub use archetypes::{Archetype, ARCHETYPES};

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::models::{columns, ArchetypeRecord, ArchetypeResult, Row, RowSet};

/// Percentile given to every row when all adjusted ratings are equal
/// (including a single eligible row).
pub const DEFAULT_DEGENERATE_PERCENTILE: f64 = 0.5;

/// Score every archetype with at least one eligible row, in the given order.
///
/// `fallback_multiplier` applies to rows without a `League Multiplier`
/// (sources with no `Division` column).
pub fn score_archetypes(
    rows: &RowSet,
    archetypes: &[Archetype],
    fallback_multiplier: f64,
    degenerate_percentile: f64,
) -> Vec<ArchetypeResult> {
    let results: Vec<ArchetypeResult> = archetypes
        .iter()
        .filter_map(|a| score_archetype(rows, a, fallback_multiplier, degenerate_percentile))
        .collect();

    info!(
        "Scored {} of {} archetypes",
        results.len(),
        archetypes.len()
    );
    results
}

/// Score one archetype. Returns `None` when no row is eligible.
pub fn score_archetype(
    rows: &RowSet,
    archetype: &Archetype,
    fallback_multiplier: f64,
    degenerate_percentile: f64,
) -> Option<ArchetypeResult> {
    let mut records: Vec<ArchetypeRecord> = rows
        .iter()
        .filter(|row| archetype.is_eligible(row))
        .map(|row| {
            let rating = archetype.rating(row);
            let multiplier = row
                .number(columns::LEAGUE_MULTIPLIER)
                .unwrap_or(fallback_multiplier);
            project(row, rating, rating * multiplier)
        })
        .collect();

    if records.is_empty() {
        debug!("No eligible players for {}", archetype.name);
        return None;
    }

    let adjusted: Vec<f64> = records.iter().map(|r| r.adjusted_rating).collect();
    for (record, pct) in records
        .iter_mut()
        .zip(min_max_percentiles(&adjusted, degenerate_percentile))
    {
        record.percentile = pct;
    }

    // Vec::sort_by is stable: equal ratings keep input order.
    records.sort_by(|a, b| {
        b.adjusted_rating
            .partial_cmp(&a.adjusted_rating)
            .unwrap_or(Ordering::Equal)
    });

    debug!("{}: {} eligible players", archetype.name, records.len());

    Some(ArchetypeResult {
        archetype: archetype.name.to_string(),
        label: archetype.label.to_string(),
        records,
    })
}

/// Min-max normalize values into [0, 1].
///
/// When every value is equal the spread is zero and every entry gets
/// `degenerate` instead of NaN.
pub fn min_max_percentiles(values: &[f64], degenerate: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;

    if !spread.is_finite() || spread <= 0.0 {
        return vec![degenerate; values.len()];
    }
    values.iter().map(|v| (v - min) / spread).collect()
}

fn project(row: &Row, rating: f64, adjusted_rating: f64) -> ArchetypeRecord {
    ArchetypeRecord {
        uid: row.display(columns::UID),
        name: row.display(columns::NAME),
        position: row.display(columns::POSITION),
        club: row.display(columns::CLUB),
        division: row.display(columns::DIVISION),
        signability: row.display(columns::SIGNABILITY),
        transfer_value: row.display(columns::TRANSFER_VALUE),
        rating,
        adjusted_rating,
        percentile: 0.0,
    }
}
