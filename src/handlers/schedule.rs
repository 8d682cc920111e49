//! Schedule and course list handlers

use super::invalid_params;
use crate::AcadflowServerHandler;
use crate::academic::{Day, week_dates};
use crate::formatting;
use mcp_attr::Result as McpResult;

impl AcadflowServerHandler {
    /// Weekly grid, or the classes of one day when `day` is given.
    pub async fn handle_schedule(&self, day: Option<String>) -> McpResult<String> {
        let week = week_dates(self.today);
        let timetable = &self.reference.timetable;
        let courses = &self.reference.courses;

        match day.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(day_str) => {
                let day: Day = day_str.parse().map_err(invalid_params)?;
                Ok(formatting::format_day(
                    timetable,
                    courses,
                    day,
                    week[day.index()],
                ))
            }
            None => Ok(formatting::format_week(timetable, courses, &week)),
        }
    }

    pub async fn handle_courses(&self) -> McpResult<String> {
        Ok(formatting::format_courses(&self.reference.courses))
    }
}
