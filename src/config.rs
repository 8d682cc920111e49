use crate::academic::{ReferenceData, local_date_today};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Server settings, read from an optional TOML file and overridden by CLI flags.
///
/// ```toml
/// today = "2024-11-15"
/// reference_data = "semester.toml"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed "today"; the local date when unset
    pub today: Option<NaiveDate>,
    /// Reference data document replacing the built-in data set
    pub reference_data: Option<PathBuf>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(local_date_today)
    }

    pub fn reference_data(&self) -> Result<ReferenceData> {
        match &self.reference_data {
            Some(path) => ReferenceData::from_path(path),
            None => Ok(ReferenceData::builtin()?),
        }
    }
}
