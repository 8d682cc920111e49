//! Curriculum progress tracking
//!
//! The tracker holds the courses a student has marked complete. Additions are
//! gated by the credit cap of the course's category; removals are always allowed.

use crate::error::{CurriculumError, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Letter grade with its grade point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub const ALL: [Grade; 7] = [
        Grade::S,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::E,
        Grade::F,
    ];

    pub fn points(self) -> u32 {
        match self {
            Grade::S => 10,
            Grade::A => 9,
            Grade::B => 8,
            Grade::C => 7,
            Grade::D => 6,
            Grade::E => 5,
            Grade::F => 0,
        }
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letter = s.trim().to_uppercase();
        Grade::ALL
            .into_iter()
            .find(|grade| grade.to_string() == letter)
            .ok_or_else(|| ValidationError::Grade(s.to_string()))
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A course listed in a curriculum category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub sl_no: u32,
    pub course_code: String,
    pub course_title: String,
    pub course_type: String,
    pub version: String,
    #[serde(default)]
    pub l: u32,
    #[serde(default)]
    pub t: u32,
    #[serde(default)]
    pub p: u32,
    #[serde(default)]
    pub j: u32,
    pub credits: u32,
}

/// A group of courses with a credit cap (e.g. "Programme Core")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumCategory {
    /// Category id
    pub sl_no: u32,
    pub category: String,
    /// Credit cap
    pub credits: u32,
    #[serde(default)]
    pub courses: Vec<CourseDetails>,
}

impl CurriculumCategory {
    pub fn find_course(&self, course_code: &str) -> Option<&CourseDetails> {
        self.courses.iter().find(|c| c.course_code == course_code)
    }
}

/// Look up a category by id
pub fn find_category(curriculum: &[CurriculumCategory], id: u32) -> Option<&CurriculumCategory> {
    curriculum.iter().find(|category| category.sl_no == id)
}

/// First category, in curriculum order, that lists `course_code`
pub fn find_course<'a>(
    curriculum: &'a [CurriculumCategory],
    course_code: &str,
) -> Option<(&'a CurriculumCategory, &'a CourseDetails)> {
    curriculum.iter().find_map(|category| {
        category
            .find_course(course_code)
            .map(|course| (category, course))
    })
}

/// Sum of all category caps
pub fn total_credits(curriculum: &[CurriculumCategory]) -> u32 {
    curriculum.iter().map(|category| category.credits).sum()
}

/// A course the student has completed, with an optional grade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCourse {
    pub category_id: u32,
    pub course_code: String,
    pub course_title: String,
    pub credits: u32,
    /// Unrecognised grades in stored snapshots load as `None`
    #[serde(default, deserialize_with = "lenient_grade")]
    pub grade: Option<Grade>,
}

fn lenient_grade<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Credit totals against the whole curriculum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed_credits: u32,
    pub total_credits: u32,
    pub percentage: f64,
}

/// Credit-weighted grade point average over graded courses, rounded to two decimals.
///
/// Courses without a grade are left out entirely. Returns 0 when nothing is graded.
pub fn compute_cgpa(courses: &[CompletedCourse]) -> f64 {
    let (weighted, credits) = courses
        .iter()
        .filter_map(|course| course.grade.map(|grade| (course.credits, grade.points())))
        .fold((0u32, 0u32), |(weighted, credits), (c, points)| {
            (weighted + c * points, credits + c)
        });

    if credits == 0 {
        return 0.0;
    }
    let cgpa = f64::from(weighted) / f64::from(credits);
    (cgpa * 100.0).round() / 100.0
}

/// The set of completed courses, in the order they were completed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurriculumTracker {
    completed: Vec<CompletedCourse>,
}

impl CurriculumTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_completed(completed: Vec<CompletedCourse>) -> Self {
        Self { completed }
    }

    pub fn completed(&self) -> &[CompletedCourse] {
        &self.completed
    }

    pub fn is_completed(&self, course_code: &str) -> bool {
        self.completed.iter().any(|c| c.course_code == course_code)
    }

    pub fn get(&self, course_code: &str) -> Option<&CompletedCourse> {
        self.completed.iter().find(|c| c.course_code == course_code)
    }

    /// Credits already completed in category `category_id`
    pub fn category_completed_credits(&self, category_id: u32) -> u32 {
        self.completed
            .iter()
            .filter(|c| c.category_id == category_id)
            .map(|c| c.credits)
            .sum()
    }

    pub fn completed_credits(&self) -> u32 {
        self.completed.iter().map(|c| c.credits).sum()
    }

    /// Mark `course` complete under `category`, or un-mark it if it already is.
    ///
    /// Removal never checks the cap. Adding fails with
    /// [`CurriculumError::CapacityExceeded`] when the category's completed credits plus
    /// the course credits would exceed the cap; the tracker is unchanged in that case.
    pub fn toggle_course(
        &mut self,
        course: &CourseDetails,
        category: &CurriculumCategory,
    ) -> Result<Toggle, CurriculumError> {
        if self.remove(&course.course_code).is_some() {
            return Ok(Toggle::Removed);
        }

        let used = self.category_completed_credits(category.sl_no);
        if used + course.credits > category.credits {
            return Err(CurriculumError::CapacityExceeded {
                cap: category.credits,
            });
        }

        self.completed.push(CompletedCourse {
            category_id: category.sl_no,
            course_code: course.course_code.clone(),
            course_title: course.course_title.clone(),
            credits: course.credits,
            grade: None,
        });
        Ok(Toggle::Added)
    }

    /// Un-mark a completed course. Needs no curriculum lookup, so records whose
    /// category is no longer in the reference data can still be removed.
    pub fn remove(&mut self, course_code: &str) -> Option<CompletedCourse> {
        let index = self
            .completed
            .iter()
            .position(|c| c.course_code == course_code)?;
        Some(self.completed.remove(index))
    }

    /// Set or clear the grade of a completed course
    pub fn set_grade(
        &mut self,
        course_code: &str,
        grade: Option<Grade>,
    ) -> Result<(), CurriculumError> {
        match self
            .completed
            .iter_mut()
            .find(|c| c.course_code == course_code)
        {
            Some(course) => {
                course.grade = grade;
                Ok(())
            }
            None => Err(CurriculumError::NotCompleted(course_code.to_string())),
        }
    }

    pub fn has_grades(&self) -> bool {
        self.completed.iter().any(|c| c.grade.is_some())
    }

    pub fn cgpa(&self) -> f64 {
        compute_cgpa(&self.completed)
    }

    pub fn progress(&self, curriculum: &[CurriculumCategory]) -> Progress {
        let completed_credits = self.completed_credits();
        let total_credits = total_credits(curriculum);
        let percentage = if total_credits == 0 {
            0.0
        } else {
            f64::from(completed_credits) * 100.0 / f64::from(total_credits)
        };
        Progress {
            completed_credits,
            total_credits,
            percentage,
        }
    }
}
