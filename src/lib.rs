//! # Scout Archetypes
//!
//! Ranks players from a football-management game's exported shortlists by
//! playing-style archetype, weighted by the strength of each player's league.
//!
//! ## Architecture
//!
//! - **models**: Cells, rows, row-sets, signability and report types
//! - **leagues**: Division name fixes and league power ratings
//! - **ingest**: HTML/CSV table parsing into tagged row-sets
//! - **merge**: Concatenation and first-UID-wins deduplication
//! - **coerce**: Minutes filter and field conversion
//! - **calculate**: Archetype registry and percentile scoring
//! - **pipeline**: End-to-end run over input files
//! - **export**: JSON, XLSX and HTML reports
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod coerce;
pub mod config;
pub mod export;
pub mod ingest;
pub mod leagues;
pub mod merge;
pub mod models;
pub mod pipeline;

pub use models::*;
