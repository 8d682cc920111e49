//! Academic Schedule MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a single student's
//! academic life: the weekly class timetable, the academic calendar of holidays, exams
//! and deadlines, the registered course list and curriculum progress with CGPA.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `AcadflowServerHandler` - exposes each view as an MCP tool
//! - **Domain Layer**: `academic` module - pure calendar, timetable and curriculum logic
//! - **Persistence Layer**: `storage` module - key-value JSON snapshots of user state
//!
//! # Example
//!
//! ```no_run
//! use acadflow_mcp::{AcadflowServerHandler, Config};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = AcadflowServerHandler::new("acadflow-data", &Config::default())?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod academic;
pub mod config;
pub mod error;
pub mod formatting;
mod handlers;
pub mod storage;
pub mod validation;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

// Re-export commonly used types
pub use academic::{AppState, CurriculumTracker, ReferenceData, Session, Student};
pub use config::Config;
pub use storage::{KeyValueStore, MemoryStore, Storage};

use storage::{COMPLETED_COURSES_KEY, SESSION_KEY, load_snapshot, save_snapshot};
use validation::SignupForm;

/// MCP Server handler for the academic schedule
///
/// Owns the only mutable state of the application. Every mutation is saved as a
/// snapshot through the key-value store before the tool returns.
pub struct AcadflowServerHandler {
    pub(crate) state: Mutex<AppState>,
    pub(crate) store: Box<dyn KeyValueStore>,
    pub(crate) reference: ReferenceData,
    pub(crate) today: NaiveDate,
}

impl AcadflowServerHandler {
    /// Create a handler storing user state under `data_dir`
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding the JSON snapshots (created on first save)
    /// * `config` - Settings providing "today" and the reference data
    ///
    /// # Returns
    /// Result containing the handler, or an error if the reference data is invalid
    pub fn new(data_dir: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let reference = config.reference_data()?;
        Ok(Self::with_store(
            Box::new(Storage::new(data_dir)),
            reference,
            config.today(),
        ))
    }

    /// Create a handler on top of any key-value store
    ///
    /// Previously saved state is loaded from the store; missing or malformed
    /// snapshots start empty.
    pub fn with_store(
        store: Box<dyn KeyValueStore>,
        reference: ReferenceData,
        today: NaiveDate,
    ) -> Self {
        let session: Session = load_snapshot(store.as_ref(), SESSION_KEY).unwrap_or_default();
        let tracker: CurriculumTracker =
            load_snapshot(store.as_ref(), COMPLETED_COURSES_KEY).unwrap_or_default();

        info!(
            %today,
            completed = tracker.completed().len(),
            signed_in = session.current().is_some(),
            "state loaded"
        );

        Self {
            state: Mutex::new(AppState { session, tracker }),
            store,
            reference,
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Copy of the current user state
    pub fn snapshot(&self) -> AppState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn current_year(&self) -> i32 {
        self.today.year()
    }

    pub(crate) fn lock_state(&self) -> McpResult<MutexGuard<'_, AppState>> {
        match self.state.lock() {
            Ok(state) => Ok(state),
            Err(_) => bail_public!(_, "Application state is unavailable after an earlier failure"),
        }
    }

    /// Save the completed-course snapshot; a failed write is logged and ignored
    pub(crate) fn persist_tracker(&self, tracker: &CurriculumTracker) {
        if let Err(e) = save_snapshot(self.store.as_ref(), COMPLETED_COURSES_KEY, tracker) {
            warn!(error = %e, "failed to save completed courses");
        }
    }

    /// Save the session snapshot; a failed write is logged and ignored
    pub(crate) fn persist_session(&self, session: &Session) {
        if let Err(e) = save_snapshot(self.store.as_ref(), SESSION_KEY, session) {
            warn!(error = %e, "failed to save session");
        }
    }
}

/// Academic schedule viewer for a single student.
///
/// Views:
/// - **schedule**: weekly timetable (periods × MON-FRI) or one day's classes
/// - **calendar**: month grid of holidays, exams, deadlines and other events
/// - **courses**: registered courses with slots, faculty and credits
/// - **curriculum**: credit progress per category, completed courses and CGPA
/// - **profile**: the signed-in student
///
/// Slot codes look like "B12"; a course occupies every code in its slot string
/// (e.g. "B11+B12+B13"). Dates use YYYY-MM-DD and months YYYY-MM.
#[mcp_server]
impl McpServer for AcadflowServerHandler {
    /// **Schedule**: Weekly class timetable. Give a day (MON-FRI) to list that day's classes with times and faculty.
    #[tool]
    async fn schedule(
        &self,
        /// Day: MON/TUE/WED/THU/FRI (optional, default: whole week)
        day: Option<String>,
    ) -> McpResult<String> {
        self.handle_schedule(day).await
    }

    /// **Calendar**: Academic calendar for a month. Shows each day's events stacked longest-first, then the month's agenda.
    #[tool]
    async fn calendar(
        &self,
        /// Month: YYYY-MM (optional, default: current month)
        month: Option<String>,
    ) -> McpResult<String> {
        self.handle_calendar(month).await
    }

    /// **Courses**: Registered courses with code, slot, faculty, credits and meeting links.
    #[tool]
    async fn courses(&self) -> McpResult<String> {
        self.handle_courses().await
    }

    /// **Curriculum**: Credit progress per category, completed courses and CGPA.
    #[tool]
    async fn curriculum(&self) -> McpResult<String> {
        self.handle_curriculum().await
    }

    /// **Toggle course**: Mark a curriculum course as completed, or un-mark it if already completed.
    /// Adding is refused when it would exceed the category's credit cap.
    #[tool]
    async fn toggle_course(
        &self,
        /// Course code (e.g., "CSE3003")
        course_code: String,
        /// Category number (optional, default: the category listing the course)
        category_id: Option<u32>,
    ) -> McpResult<String> {
        self.handle_toggle_course(course_code, category_id).await
    }

    /// **Set grade**: Record the letter grade (S/A/B/C/D/E/F) of a completed course. Empty grade clears it.
    #[tool]
    async fn set_grade(
        &self,
        /// Course code of a completed course
        course_code: String,
        /// Grade: S/A/B/C/D/E/F, ""=clear (optional)
        grade: Option<String>,
    ) -> McpResult<String> {
        self.handle_set_grade(course_code, grade).await
    }

    /// **Sign up**: Create the student profile and sign in. All fields are required.
    #[tool]
    async fn signup(
        &self,
        /// Full name
        name: String,
        /// Email address
        email: String,
        /// Registration number, YYBBBNNNNN (e.g., "23BCE12345")
        registration_number: String,
        /// Password: 8+ chars with upper, lower, digit and special character
        password: String,
        /// Password again
        confirm_password: String,
    ) -> McpResult<String> {
        self.handle_signup(SignupForm {
            name,
            email,
            registration_number,
            password,
            confirm_password,
        })
        .await
    }

    /// **Login**: Sign in with a registration number and password.
    #[tool]
    async fn login(
        &self,
        /// Registration number, YYBBBNNNNN
        registration_number: String,
        /// Password
        password: String,
    ) -> McpResult<String> {
        self.handle_login(registration_number, password).await
    }

    /// **Logout**: Sign out of the current session.
    #[tool]
    async fn logout(&self) -> McpResult<String> {
        self.handle_logout().await
    }

    /// **Profile**: The signed-in student's details and year of study.
    #[tool]
    async fn profile(&self) -> McpResult<String> {
        self.handle_profile().await
    }

    /// **Password strength**: Score a candidate password and list which rules it meets.
    #[tool]
    async fn password_strength(
        &self,
        /// Password to check
        password: String,
    ) -> McpResult<String> {
        self.handle_password_strength(password).await
    }
}
