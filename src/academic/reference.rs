use super::curriculum::CurriculumCategory;
use super::event::AcademicEvent;
use super::timetable::{Course, Day, PERIODS_PER_DAY, TimeTable};
use crate::error::ReferenceDataError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/academic.toml"));

/// Static data the views are built from: courses, timetable, calendar and curriculum.
///
/// Loaded once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceData {
    pub courses: Vec<Course>,
    pub timetable: TimeTable,
    #[serde(default)]
    pub events: Vec<AcademicEvent>,
    #[serde(default)]
    pub curriculum: Vec<CurriculumCategory>,
}

impl ReferenceData {
    /// The data set compiled into the binary
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Self::from_toml_str(BUILTIN)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference data {}", path.display()))?;
        let data = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid reference data {}", path.display()))?;
        Ok(data)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        let data: ReferenceData = toml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), ReferenceDataError> {
        if let Some(event) = self.events.iter().find(|e| e.end_date < e.start_date) {
            return Err(ReferenceDataError::EventRange {
                id: event.id.clone(),
                start: event.start_date,
                end: event.end_date,
            });
        }

        if self.timetable.time_slots.len() != PERIODS_PER_DAY {
            return Err(ReferenceDataError::PeriodCount {
                expected: PERIODS_PER_DAY,
                found: self.timetable.time_slots.len(),
            });
        }

        let days: HashSet<Day> = self.timetable.schedule.iter().map(|row| row.day).collect();
        if days.len() != Day::ALL.len() || self.timetable.schedule.len() != Day::ALL.len() {
            return Err(ReferenceDataError::Days);
        }

        if let Some(row) = self
            .timetable
            .schedule
            .iter()
            .find(|row| row.slots.len() != PERIODS_PER_DAY)
        {
            return Err(ReferenceDataError::DayLength {
                day: row.day.to_string(),
                expected: PERIODS_PER_DAY,
                found: row.slots.len(),
            });
        }

        let mut seen = HashSet::new();
        for category in &self.curriculum {
            if !seen.insert(category.sl_no) {
                return Err(ReferenceDataError::DuplicateCategory(category.sl_no));
            }
        }

        Ok(())
    }
}
