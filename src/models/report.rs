//! Scoring output models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One projected, scored player in an archetype table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeRecord {
    pub uid: String,
    pub name: String,
    pub position: String,
    pub club: String,
    pub division: String,
    pub signability: String,
    pub transfer_value: String,

    /// Formula score before league weighting
    pub rating: f64,

    /// Rating × league multiplier
    pub adjusted_rating: f64,

    /// Min-max position of `adjusted_rating` within this archetype (0.0 to 1.0)
    pub percentile: f64,
}

/// Ranked players for one archetype, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeResult {
    pub archetype: String,

    /// Column label for the raw rating (e.g. "SK Rating")
    pub label: String,

    pub records: Vec<ArchetypeRecord>,
}

impl ArchetypeResult {
    /// Column label for the league-weighted rating.
    pub fn adjusted_label(&self) -> String {
        format!("Adjusted {}", self.label)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Row counts at each pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Rows ingested per source label, in merge order
    pub rows_per_source: Vec<(String, usize)>,

    pub rows_merged: usize,
    pub duplicates_removed: usize,
    pub rows_below_minutes: usize,
    pub rows_scored: usize,
    pub archetypes_scored: usize,
}

/// Output of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub archetypes: Vec<ArchetypeResult>,
}

impl AnalysisReport {
    /// Look up an archetype's result by name.
    pub fn get(&self, archetype: &str) -> Option<&ArchetypeResult> {
        self.archetypes.iter().find(|r| r.archetype == archetype)
    }

    pub fn archetype_names(&self) -> Vec<&str> {
        self.archetypes.iter().map(|r| r.archetype.as_str()).collect()
    }
}
