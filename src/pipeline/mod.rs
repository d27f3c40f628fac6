//! Analysis pipeline.
//!
//! Coordinates one run:
//! 1. Read the optional source tables and league power sheet concurrently
//! 2. Ingest each table with its signability label
//! 3. Merge and deduplicate
//! 4. Coerce fields and annotate league multipliers
//! 5. Score every configured archetype

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::{score_archetypes, Archetype};
use crate::coerce::clean_and_convert;
use crate::config::AppConfig;
use crate::ingest::{ingest_source, IngestError, SourceFormat};
use crate::leagues::{
    read_power_entries, LeagueNameFixes, LeaguePowerTable, LeagueTableError, PowerSheetFormat,
};
use crate::merge::merge_sources;
use crate::models::{AnalysisReport, RowSet, RunSummary, Signability};

/// Errors that stop a run. No partial report is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to ingest '{signability}' table: {source}")]
    Ingest {
        signability: Signability,
        #[source]
        source: IngestError,
    },

    #[error("League power sheet error: {0}")]
    LeagueTable(#[from] LeagueTableError),
}

/// Input files for a run. Every path is optional.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInputs {
    pub transfer: Option<PathBuf>,
    pub loan: Option<PathBuf>,
    pub untransferable: Option<PathBuf>,

    /// CSV or spreadsheet with `League` and `Power Rating` columns
    pub multipliers: Option<PathBuf>,
}

impl AnalysisInputs {
    fn table_path(&self, signability: Signability) -> Option<&Path> {
        match signability {
            Signability::Transfer => self.transfer.as_deref(),
            Signability::Loan => self.loan.as_deref(),
            Signability::Untransferable => self.untransferable.as_deref(),
        }
    }
}

/// Runs the analysis pipeline with a fixed configuration.
pub struct Analyzer {
    config: AppConfig,
    fixes: LeagueNameFixes,
    archetypes: Vec<Archetype>,
}

impl Analyzer {
    pub fn new(config: AppConfig) -> Self {
        let fixes = config.name_fixes();
        let archetypes = config.selected_archetypes();
        Self {
            config,
            fixes,
            archetypes,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Read, ingest and score the given inputs.
    pub async fn run(&self, inputs: &AnalysisInputs) -> Result<AnalysisReport, PipelineError> {
        let (transfer, loan, untransferable, multipliers) = tokio::try_join!(
            read_optional(inputs.transfer.as_deref()),
            read_optional(inputs.loan.as_deref()),
            read_optional(inputs.untransferable.as_deref()),
            read_optional(inputs.multipliers.as_deref()),
        )?;

        let power = self.power_table(multipliers.as_deref(), inputs.multipliers.as_deref())?;

        let contents = [transfer, loan, untransferable];
        let mut sources = Vec::with_capacity(contents.len());
        for (signability, bytes) in Signability::ALL.into_iter().zip(contents) {
            let path = inputs.table_path(signability);
            let text = bytes.map(|bytes| decode_text(path, bytes));
            let rows = self.ingest(text.as_deref(), path, signability)?;
            sources.push((signability, rows));
        }

        Ok(self.analyze(sources, &power))
    }

    /// Ingest one source's text, picking the format from its path or content.
    pub fn ingest(
        &self,
        text: Option<&str>,
        path: Option<&Path>,
        signability: Signability,
    ) -> Result<RowSet, PipelineError> {
        let format = SourceFormat::detect(path, text.unwrap_or_default());
        ingest_source(text, format, signability, &self.fixes)
            .map_err(|source| PipelineError::Ingest {
                signability,
                source,
            })
    }

    /// Build the league power table from config entries and an optional
    /// sheet (CSV or spreadsheet, chosen from `path` or the content).
    /// Sheet entries override config entries for the same league.
    pub fn power_table(
        &self,
        sheet: Option<&[u8]>,
        path: Option<&Path>,
    ) -> Result<LeaguePowerTable, PipelineError> {
        let mut entries: Vec<(String, f64)> = self
            .config
            .leagues
            .power
            .iter()
            .map(|(league, power)| (league.clone(), *power))
            .collect();

        if let Some(sheet) = sheet.filter(|s| !s.iter().all(u8::is_ascii_whitespace)) {
            let from_sheet = match PowerSheetFormat::detect(path, sheet) {
                PowerSheetFormat::Workbook => {
                    read_power_entries(sheet, PowerSheetFormat::Workbook)?
                }
                PowerSheetFormat::Csv => {
                    let text = decode_text(path, sheet.to_vec());
                    read_power_entries(text.as_bytes(), PowerSheetFormat::Csv)?
                }
            };
            debug!("Loaded {} leagues from power sheet", from_sheet.len());
            entries.extend(from_sheet);
        }

        Ok(LeaguePowerTable::from_entries(
            entries,
            self.config.leagues.fallback_power,
            &self.fixes,
        ))
    }

    /// Merge, coerce and score already-ingested sources, in the given order.
    pub fn analyze(
        &self,
        sources: Vec<(Signability, RowSet)>,
        power: &LeaguePowerTable,
    ) -> AnalysisReport {
        let rows_per_source = sources
            .iter()
            .map(|(signability, rows)| (signability.label().to_string(), rows.len()))
            .collect();

        let merged = merge_sources(sources.into_iter().map(|(_, rows)| rows).collect());
        let rows_merged = merged.rows.len();

        let coerced = clean_and_convert(merged.rows, power, self.config.pipeline.min_minutes);

        let archetypes = score_archetypes(
            &coerced.rows,
            &self.archetypes,
            power.multiplier(None),
            self.config.pipeline.degenerate_percentile,
        );

        let summary = RunSummary {
            rows_per_source,
            rows_merged,
            duplicates_removed: merged.duplicates_removed,
            rows_below_minutes: coerced.below_minutes,
            rows_scored: coerced.rows.len(),
            archetypes_scored: archetypes.len(),
        };

        info!(
            "Analysis complete: {} rows scored across {} archetypes",
            summary.rows_scored, summary.archetypes_scored
        );

        AnalysisReport {
            generated_at: Utc::now(),
            summary,
            archetypes,
        }
    }
}

async fn read_optional(path: Option<&Path>) -> Result<Option<Vec<u8>>, PipelineError> {
    let Some(path) = path else {
        return Ok(None);
    };

    tokio::fs::read(path)
        .await
        .map(Some)
        .map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode file contents as UTF-8, replacing undecodable bytes rather than
/// failing the run.
fn decode_text(path: Option<&Path>, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "{} is not valid UTF-8, undecodable bytes were replaced",
                path.map_or_else(|| "Input".to_string(), |p| p.display().to_string())
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
