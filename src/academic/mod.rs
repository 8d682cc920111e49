//! Academic domain models and business logic
//!
//! This module contains the core data structures and the pure computations the views
//! are built from. It is split into submodules:
//! - `event`: academic calendar entries and their colour tones
//! - `calendar`: month grid and multi-day event stacking
//! - `timetable`: courses, the weekly slot grid and slot lookup
//! - `curriculum`: credit-capped progress tracking and CGPA
//! - `student`: profile, session and registration number decoding
//! - `reference`: loading and validating the static data set

pub mod calendar;
pub mod curriculum;
pub mod event;
pub mod reference;
pub mod student;
pub mod timetable;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub use calendar::{
    CalendarMonth, DayLayout, EventSegment, events_for_day, layout_month, month_agenda,
};
pub use curriculum::{
    CompletedCourse, CourseDetails, CurriculumCategory, CurriculumTracker, Grade, Progress,
    Toggle, compute_cgpa,
};
pub use event::{AcademicEvent, EventTone, EventType};
pub use reference::ReferenceData;
pub use student::{RegistrationInfo, Session, Student, parse_registration_number};
pub use timetable::{Course, Day, TimeTable, find_course_by_slot, week_dates};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Everything a user can change, owned by the server handler.
///
/// Persisted as two snapshots: the session and the completed-course list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub session: Session,
    pub tracker: CurriculumTracker,
}
