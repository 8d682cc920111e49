//! Error types for the academic schedule server
//!
//! Every runtime error here is recoverable: a rejected user input or a no-op.
//! Only [`ReferenceDataError`] can stop the process, and only at startup.

use thiserror::Error;

/// Rejected curriculum mutations. The tracker is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurriculumError {
    #[error("cannot add course: category cap of {cap} credits reached")]
    CapacityExceeded { cap: u32 },

    #[error("Course '{0}' is not part of the curriculum")]
    UnknownCourse(String),

    #[error("Category {0} does not exist")]
    UnknownCategory(u32),

    #[error("Course '{course}' is not listed under category {category}")]
    CourseNotInCategory { course: String, category: u32 },

    #[error("Course '{0}' has not been marked as completed")]
    NotCompleted(String),
}

/// User input that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    FieldsRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Registration number must follow the pattern: YY-BBB-NNNNN")]
    RegistrationFormat,

    #[error(
        "Invalid year in registration number. Year should be between last 4 years and current year."
    )]
    RegistrationYear,

    #[error("Invalid email address '{0}'")]
    Email(String),

    #[error("Password is too weak. Missing: {}", .0.join(", "))]
    WeakPassword(Vec<&'static str>),

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD (e.g., '2024-11-15')")]
    Date(String),

    #[error("Invalid month '{0}'. Use YYYY-MM (e.g., '2024-11')")]
    Month(String),

    #[error("Invalid day '{0}'. Valid days: MON, TUE, WED, THU, FRI")]
    Day(String),

    #[error("Invalid grade '{0}'. Valid grades: S, A, B, C, D, E, F")]
    Grade(String),
}

/// Problems in the reference data document, detected when it is loaded.
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Event '{id}' ends ({end}) before it starts ({start})")]
    EventRange {
        id: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Timetable must have {expected} periods, found {found}")]
    PeriodCount { expected: usize, found: usize },

    #[error("Timetable day {day} has {found} slots, expected {expected}")]
    DayLength {
        day: String,
        expected: usize,
        found: usize,
    },

    #[error("Timetable must list each weekday MON-FRI exactly once")]
    Days,

    #[error("Duplicate curriculum category id {0}")]
    DuplicateCategory(u32),
}
