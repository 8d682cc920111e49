//! Validation helper functions for the academic schedule server
//!
//! This module contains validation logic for the sign-up and login forms,
//! the password policy, registration numbers and date parsing.

use crate::error::ValidationError;
use chrono::NaiveDate;

/// Parse a date parameter in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::Date(date_str.to_string()))
}

/// Check a registration number of the form `YYBBBNNNNN`
///
/// # Arguments
/// * `reg_no` - Registration number, e.g. "23BCE12345"
/// * `current_year` - Calendar year used for the year window (e.g. 2024)
///
/// # Description
/// `YY` is the joining year, `BBB` three upper-case letters, `NNNNN` five digits.
/// The joining year must lie between four years ago and the current year.
pub fn validate_registration_number(
    reg_no: &str,
    current_year: i32,
) -> Result<(), ValidationError> {
    let well_formed = reg_no.is_ascii()
        && reg_no.len() == 10
        && reg_no[..2].bytes().all(|b| b.is_ascii_digit())
        && reg_no[2..5].bytes().all(|b| b.is_ascii_uppercase())
        && reg_no[5..].bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(ValidationError::RegistrationFormat);
    }

    let year: i32 = reg_no[..2]
        .parse()
        .map_err(|_| ValidationError::RegistrationFormat)?;
    let current = current_year % 100;
    if year > current || year < current - 4 {
        return Err(ValidationError::RegistrationYear);
    }
    Ok(())
}

/// A single password rule and whether it is satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub met: bool,
    pub text: &'static str,
}

/// Score (0-100) and per-rule breakdown of a password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u32,
    pub requirements: Vec<Requirement>,
}

impl PasswordStrength {
    /// "Weak", "Moderate" or "Strong"; empty for a zero score
    pub fn label(&self) -> &'static str {
        match self.score {
            0 => "",
            1..=39 => "Weak",
            40..=74 => "Moderate",
            _ => "Strong",
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.requirements
            .iter()
            .filter(|r| !r.met)
            .map(|r| r.text)
            .collect()
    }
}

/// Evaluate `password` against the five password rules.
///
/// Each rule is worth 20 points; lengths above 12 and above 16 characters add 10 each,
/// capped at 100.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let requirements = vec![
        Requirement {
            met: length >= 8,
            text: "At least 8 characters",
        },
        Requirement {
            met: password.chars().any(|c| c.is_ascii_uppercase()),
            text: "At least one uppercase letter",
        },
        Requirement {
            met: password.chars().any(|c| c.is_ascii_lowercase()),
            text: "At least one lowercase letter",
        },
        Requirement {
            met: password.chars().any(|c| c.is_ascii_digit()),
            text: "At least one number",
        },
        Requirement {
            met: password.chars().any(|c| !c.is_ascii_alphanumeric()),
            text: "At least one special character",
        },
    ];

    let met = requirements.iter().filter(|r| r.met).count() as u32;
    let mut score = met * 100 / requirements.len() as u32;
    if length > 12 {
        score = (score + 10).min(100);
    }
    if length > 16 {
        score = (score + 10).min(100);
    }

    PasswordStrength {
        score,
        requirements,
    }
}

/// Reject passwords that miss any of the five rules
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let missing = password_strength(password).missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword(missing))
    }
}

/// Minimal shape check: something@domain.tld
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::Email(email.to_string()))
    }
}

/// Fields submitted when creating an account
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub registration_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Check the form in the order the user sees the messages: required fields,
    /// password confirmation, email, registration number, password policy.
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        let fields = [
            &self.name,
            &self.email,
            &self.registration_number,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::FieldsRequired);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        validate_email(self.email.trim())?;
        validate_registration_number(self.registration_number.trim(), current_year)?;
        validate_password(&self.password)
    }
}

/// Fields submitted when signing in
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub registration_number: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        if self.registration_number.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::FieldsRequired);
        }
        validate_registration_number(self.registration_number.trim(), current_year)
    }
}
