//! Well-known column names in the game's player exports.

pub const UID: &str = "UID";
pub const NAME: &str = "Name";
pub const POSITION: &str = "Position";
pub const CLUB: &str = "Club";
pub const DIVISION: &str = "Division";
pub const TRANSFER_VALUE: &str = "Transfer Value";
pub const MINUTES: &str = "Mins";
pub const DISTANCE_PER_90: &str = "Dist/90";

/// Provenance column added to every ingested row.
pub const SIGNABILITY: &str = "Signability";

/// Derived column holding the division's power rating / 100.
pub const LEAGUE_MULTIPLIER: &str = "League Multiplier";

/// Columns that are never numerically coerced.
pub const TEXT_COLUMNS: &[&str] = &[
    "UID",
    "Name",
    "Rec",
    "EU National",
    "Position",
    "Pros",
    "Preferred Foot",
    "Inf",
    "Transfer Value",
    "Nat",
    "Division",
    "Club",
    "Personality",
];

/// Columns exported as percentages (`"37%"`), parsed by the percentage rule.
pub const PERCENTAGE_COLUMNS: &[&str] = &[
    "Sv %",
    "OP-Cr %",
    "Hdr %",
    "Conv %",
    "Pas %",
    "Cr C/A",
    "Tck R",
    "Pens Saved Ratio",
    "Pen/R",
    "Shot %",
];

pub fn is_text_column(name: &str) -> bool {
    TEXT_COLUMNS.contains(&name)
}

pub fn is_percentage_column(name: &str) -> bool {
    PERCENTAGE_COLUMNS.contains(&name)
}
