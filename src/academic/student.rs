use serde::{Deserialize, Serialize};

/// Branch codes used in registration numbers
const BRANCH_CODES: &[(&str, &str)] = &[
    ("BCE", "B.Tech Computer Engineering"),
    ("BCS", "B.Tech Computer Science"),
    ("BEC", "B.Tech Electronics and Communication"),
    ("BEE", "B.Tech Electrical and Electronics"),
    ("BME", "B.Tech Mechanical Engineering"),
    ("BCV", "B.Tech Civil Engineering"),
    ("BAI", "B.Tech Artificial Intelligence"),
    ("BIT", "B.Tech Information Technology"),
];

pub const UNKNOWN_BRANCH: &str = "Unknown Branch";

/// Signed-in student profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub program: String,
    pub registration_number: String,
}

/// Authentication state, persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub is_authenticated: bool,
    pub student: Option<Student>,
}

impl Session {
    /// The profile of the signed-in student, if any
    pub fn current(&self) -> Option<&Student> {
        if self.is_authenticated {
            self.student.as_ref()
        } else {
            None
        }
    }

    pub fn sign_in(&mut self, student: Student) {
        self.is_authenticated = true;
        self.student = Some(student);
    }

    /// Sign out, keeping the last profile so a later login can restore it
    pub fn sign_out(&mut self) {
        self.is_authenticated = false;
    }
}

/// Fields decoded from a registration number such as "23BCE12345"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    pub joining_year: i32,
    pub branch: &'static str,
    pub unique_id: String,
    /// Year of study, clamped to 1..=4
    pub academic_year: u32,
}

/// Decode `YY` + `B??` branch + 5 digits. Returns `None` for anything else.
pub fn parse_registration_number(reg_no: &str, current_year: i32) -> Option<RegistrationInfo> {
    if !reg_no.is_ascii() || reg_no.len() != 10 {
        return None;
    }
    let (year, rest) = reg_no.split_at(2);
    let (branch, unique_id) = rest.split_at(3);

    if !year.bytes().all(|b| b.is_ascii_digit())
        || !branch.starts_with('B')
        || !branch.bytes().all(|b| b.is_ascii_uppercase())
        || !unique_id.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let joining_year = 2000 + year.parse::<i32>().ok()?;
    let academic_year = (current_year - joining_year + 1).clamp(1, 4) as u32;

    Some(RegistrationInfo {
        joining_year,
        branch: branch_name(branch),
        unique_id: unique_id.to_string(),
        academic_year,
    })
}

/// Full programme name for a branch code
pub fn branch_name(code: &str) -> &'static str {
    BRANCH_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_BRANCH)
}

/// "1st Year", "2nd Year", ... for a year of study
pub fn academic_year_label(year: u32) -> String {
    let suffix = match year {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{} Year", year, suffix)
}
