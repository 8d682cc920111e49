//! Curriculum progress handlers

use super::invalid_params;
use crate::AcadflowServerHandler;
use crate::academic::curriculum::{find_category, find_course};
use crate::academic::Grade;
use crate::error::CurriculumError;
use crate::formatting;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl AcadflowServerHandler {
    pub async fn handle_curriculum(&self) -> McpResult<String> {
        let state = self.lock_state()?;
        Ok(formatting::format_curriculum(
            &self.reference.curriculum,
            &state.tracker,
        ))
    }

    /// Marks a course complete, or un-marks it if it already is.
    ///
    /// Removal goes by course code alone. Adding takes the category from
    /// `category_id`, else from the first category listing the course.
    pub async fn handle_toggle_course(
        &self,
        course_code: String,
        category_id: Option<u32>,
    ) -> McpResult<String> {
        let code = course_code.trim();
        if code.is_empty() {
            bail_public!(_, "No course code provided.");
        }

        let curriculum = &self.reference.curriculum;
        let mut state = self.lock_state()?;

        if let Some(removed) = state.tracker.remove(code) {
            self.persist_tracker(&state.tracker);
            let used = state.tracker.category_completed_credits(removed.category_id);
            drop(state);

            info!(course = code, category = removed.category_id, "course removed");
            return Ok(match find_category(curriculum, removed.category_id) {
                Some(category) => format!(
                    "Course {} removed from completed courses ({} / {} credits in {})",
                    code, used, category.credits, category.category
                ),
                None => format!("Course {} removed from completed courses", code),
            });
        }

        let (category, course) = match category_id {
            Some(id) => {
                let category = find_category(curriculum, id)
                    .ok_or(CurriculumError::UnknownCategory(id))
                    .map_err(invalid_params)?;
                let course = category
                    .find_course(code)
                    .ok_or_else(|| CurriculumError::CourseNotInCategory {
                        course: code.to_string(),
                        category: id,
                    })
                    .map_err(invalid_params)?;
                (category, course)
            }
            None => find_course(curriculum, code)
                .ok_or_else(|| CurriculumError::UnknownCourse(code.to_string()))
                .map_err(invalid_params)?,
        };

        if let Err(e) = state.tracker.toggle_course(course, category) {
            info!(course = code, category = category.sl_no, "toggle rejected: {}", e);
            drop(state);
            bail_public!(_, "{}", e);
        }

        self.persist_tracker(&state.tracker);
        let used = state.tracker.category_completed_credits(category.sl_no);
        drop(state);

        info!(course = code, category = category.sl_no, "course completed");
        Ok(format!(
            "Course {} marked as completed ({} / {} credits in {})",
            code, used, category.credits, category.category
        ))
    }

    /// Sets the grade of a completed course; an empty or missing grade clears it.
    pub async fn handle_set_grade(
        &self,
        course_code: String,
        grade: Option<String>,
    ) -> McpResult<String> {
        let code = course_code.trim();
        let grade: Option<Grade> = match grade.as_deref().map(str::trim).filter(|g| !g.is_empty())
        {
            Some(grade_str) => Some(grade_str.parse().map_err(invalid_params)?),
            None => None,
        };

        let mut state = self.lock_state()?;
        state
            .tracker
            .set_grade(code, grade)
            .map_err(invalid_params)?;
        self.persist_tracker(&state.tracker);

        let cgpa = state.tracker.cgpa();
        drop(state);

        Ok(match grade {
            Some(grade) => format!("Grade {} recorded for {} (CGPA: {:.2})", grade, code, cgpa),
            None => format!("Grade cleared for {} (CGPA: {:.2})", code, cgpa),
        })
    }
}
