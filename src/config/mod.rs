//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::calculate::{archetypes, Archetype, ARCHETYPES, DEFAULT_DEGENERATE_PERCENTILE};
use crate::coerce::DEFAULT_MIN_MINUTES;
use crate::leagues::{LeagueNameFixes, DEFAULT_FALLBACK_POWER};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Row filtering and scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Rows with fewer minutes played are dropped before scoring
    #[serde(default = "default_min_minutes")]
    pub min_minutes: f64,

    /// Percentile used when every eligible adjusted rating is equal
    #[serde(default = "default_degenerate_percentile")]
    pub degenerate_percentile: f64,

    /// Archetypes to score, by name. Empty means all built-ins.
    #[serde(default)]
    pub archetypes: Vec<String>,
}

fn default_min_minutes() -> f64 {
    DEFAULT_MIN_MINUTES
}

fn default_degenerate_percentile() -> f64 {
    DEFAULT_DEGENERATE_PERCENTILE
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_minutes: default_min_minutes(),
            degenerate_percentile: default_degenerate_percentile(),
            archetypes: Vec::new(),
        }
    }
}

/// League naming and power settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaguesConfig {
    /// Power rating for divisions missing from the power table
    #[serde(default = "default_fallback_power")]
    pub fallback_power: f64,

    /// Extra raw → canonical division name fixes
    #[serde(default)]
    pub name_fixes: BTreeMap<String, String>,

    /// Power ratings used when no sheet is given; a sheet overrides these
    #[serde(default)]
    pub power: BTreeMap<String, f64>,
}

fn default_fallback_power() -> f64 {
    DEFAULT_FALLBACK_POWER
}

impl Default for LeaguesConfig {
    fn default() -> Self {
        Self {
            fallback_power: default_fallback_power(),
            name_fixes: BTreeMap::new(),
            power: BTreeMap::new(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub leagues: LeaguesConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pipeline.min_minutes.is_finite() || self.pipeline.min_minutes < 0.0 {
            return Err(ConfigError::ValidationError(
                "min_minutes must be a non-negative number".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.pipeline.degenerate_percentile) {
            return Err(ConfigError::ValidationError(
                "degenerate_percentile must be between 0 and 1".to_string(),
            ));
        }

        if !self.leagues.fallback_power.is_finite() || self.leagues.fallback_power < 0.0 {
            return Err(ConfigError::ValidationError(
                "fallback_power must be a non-negative number".to_string(),
            ));
        }

        if let Some((league, _)) = self
            .leagues
            .power
            .iter()
            .find(|(_, power)| !power.is_finite())
        {
            return Err(ConfigError::ValidationError(format!(
                "power rating for '{}' must be a finite number",
                league
            )));
        }

        if let Some(unknown) = self
            .pipeline
            .archetypes
            .iter()
            .find(|name| archetypes::find(name).is_none())
        {
            return Err(ConfigError::ValidationError(format!(
                "unknown archetype '{}'",
                unknown
            )));
        }

        Ok(())
    }

    /// The archetypes this configuration scores, in registry order.
    pub fn selected_archetypes(&self) -> Vec<Archetype> {
        ARCHETYPES
            .iter()
            .filter(|a| {
                self.pipeline.archetypes.is_empty()
                    || self.pipeline.archetypes.iter().any(|n| n == a.name)
            })
            .copied()
            .collect()
    }

    /// Built-in division name fixes extended with the configured ones.
    pub fn name_fixes(&self) -> LeagueNameFixes {
        let mut fixes = LeagueNameFixes::builtin();
        fixes.extend(self.leagues.name_fixes.clone());
        fixes
    }
}
