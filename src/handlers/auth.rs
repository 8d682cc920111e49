//! Sign-up, login and profile handlers
//!
//! Authentication is local to the data directory: credentials are checked for shape
//! only and passwords are never stored.

use super::invalid_params;
use crate::AcadflowServerHandler;
use crate::academic::Student;
use crate::academic::student::{UNKNOWN_BRANCH, parse_registration_number};
use crate::formatting;
use crate::validation::{self, LoginForm, SignupForm};
use mcp_attr::Result as McpResult;
use tracing::info;

impl AcadflowServerHandler {
    fn program_for(&self, registration_number: &str) -> String {
        parse_registration_number(registration_number, self.current_year())
            .map(|info| info.branch)
            .unwrap_or(UNKNOWN_BRANCH)
            .to_string()
    }

    pub async fn handle_signup(&self, form: SignupForm) -> McpResult<String> {
        form.validate(self.current_year()).map_err(invalid_params)?;

        let registration_number = form.registration_number.trim().to_string();
        let student = Student {
            id: registration_number.clone(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            program: self.program_for(&registration_number),
            registration_number,
        };

        let mut state = self.lock_state()?;
        state.session.sign_in(student);
        self.persist_session(&state.session);
        drop(state);

        info!(registration_number = %form.registration_number.trim(), "account created");
        Ok(format!(
            "Welcome, {}! Your account has been created.",
            form.name.trim()
        ))
    }

    /// Signs in the stored profile when the registration number matches it,
    /// otherwise starts a fresh profile for that registration number.
    pub async fn handle_login(
        &self,
        registration_number: String,
        password: String,
    ) -> McpResult<String> {
        let form = LoginForm {
            registration_number,
            password,
        };
        form.validate(self.current_year()).map_err(invalid_params)?;
        let registration_number = form.registration_number.trim();

        let mut state = self.lock_state()?;
        let student = match state
            .session
            .student
            .as_ref()
            .filter(|s| s.registration_number == registration_number)
        {
            Some(existing) => existing.clone(),
            None => Student {
                id: registration_number.to_string(),
                name: registration_number.to_string(),
                email: String::new(),
                program: self.program_for(registration_number),
                registration_number: registration_number.to_string(),
            },
        };
        let name = student.name.clone();
        state.session.sign_in(student);
        self.persist_session(&state.session);
        drop(state);

        info!(registration_number, "signed in");
        Ok(format!("Welcome back, {}!", name))
    }

    pub async fn handle_logout(&self) -> McpResult<String> {
        let mut state = self.lock_state()?;
        if state.session.current().is_none() {
            return Ok("Not signed in".to_string());
        }
        state.session.sign_out();
        self.persist_session(&state.session);
        drop(state);

        info!("signed out");
        Ok("Signed out".to_string())
    }

    pub async fn handle_profile(&self) -> McpResult<String> {
        let state = self.lock_state()?;
        match state.session.current() {
            Some(student) => Ok(formatting::format_profile(student, self.current_year())),
            None => Ok("Not signed in. Use login or signup first.".to_string()),
        }
    }

    pub async fn handle_password_strength(&self, password: String) -> McpResult<String> {
        let strength = validation::password_strength(&password);
        Ok(formatting::format_password_strength(&strength))
    }
}
