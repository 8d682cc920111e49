use crate::error::ValidationError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of teaching periods per day
pub const PERIODS_PER_DAY: usize = 7;

/// Colour used when a course code is unknown
pub const FALLBACK_COLOR: &str = "#F3F4F6";

/// Teaching day of the week.
///
/// Uses upper-case naming to match the reference data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
        }
    }

    /// Offset from Monday
    pub fn index(self) -> usize {
        match self {
            Day::Mon => 0,
            Day::Tue => 1,
            Day::Wed => 2,
            Day::Thu => 3,
            Day::Fri => 4,
        }
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MON" | "MONDAY" => Ok(Day::Mon),
            "TUE" | "TUESDAY" => Ok(Day::Tue),
            "WED" | "WEDNESDAY" => Ok(Day::Wed),
            "THU" | "THURSDAY" => Ok(Day::Thu),
            "FRI" | "FRIDAY" => Ok(Day::Fri),
            _ => Err(ValidationError::Day(s.to_string())),
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered course as shown on the schedule and course list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: Option<String>,
    pub title: String,
    pub credit: f64,
    pub class_no: Option<String>,
    /// Composite slot string, e.g. "B11+B12+B13"
    pub slot: Option<String>,
    pub faculty: String,
    pub color: String,
    pub meet_link: Option<String>,
}

impl Course {
    /// Whether `slot` is one of the '+'-separated tokens of this course's slot string
    pub fn occupies(&self, slot: &str) -> bool {
        self.slot
            .as_deref()
            .is_some_and(|slots| slots.split('+').any(|token| token.trim() == slot))
    }
}

/// One row of the weekly grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Day,
    pub slots: Vec<String>,
}

/// Weekly timetable: period times plus the slot code of every (day, period) cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTable {
    pub time_slots: Vec<String>,
    pub schedule: Vec<DaySchedule>,
}

impl TimeTable {
    pub fn day(&self, day: Day) -> Option<&DaySchedule> {
        self.schedule.iter().find(|row| row.day == day)
    }

    /// Slot code at (`day`, `period`); empty cells yield `None`
    pub fn slot_at(&self, day: Day, period: usize) -> Option<&str> {
        self.day(day)
            .and_then(|row| row.slots.get(period))
            .map(String::as_str)
            .filter(|slot| !slot.is_empty())
    }
}

/// First course, in list order, that occupies `slot`
pub fn find_course_by_slot<'a>(courses: &'a [Course], slot: &str) -> Option<&'a Course> {
    courses.iter().find(|course| course.occupies(slot))
}

/// Display colour of the course with `code`
pub fn course_color<'a>(courses: &'a [Course], code: &str) -> &'a str {
    courses
        .iter()
        .find(|course| course.code.as_deref() == Some(code))
        .map(|course| course.color.as_str())
        .unwrap_or(FALLBACK_COLOR)
}

/// Monday to Friday of the week containing `today`. Sunday counts as the end of the
/// previous week.
pub fn week_dates(today: NaiveDate) -> [NaiveDate; 5] {
    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    Day::ALL.map(|day| monday + Days::new(day.index() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, slot: Option<&str>) -> Course {
        Course {
            code: Some(code.to_string()),
            title: format!("{} title", code),
            credit: 4.0,
            class_no: None,
            slot: slot.map(str::to_string),
            faculty: "Faculty".to_string(),
            color: format!("#{}", code),
            meet_link: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_find_course_by_slot_matches_tokens() {
        let courses = vec![
            course("CSE3003", Some("B11+B12+B13")),
            course("CSE3006", Some("C14+E11+E12")),
            course("NPTEL", None),
        ];

        assert_eq!(
            find_course_by_slot(&courses, "B12").unwrap().code.as_deref(),
            Some("CSE3003")
        );
        assert_eq!(
            find_course_by_slot(&courses, "E11").unwrap().code.as_deref(),
            Some("CSE3006")
        );
        // Substrings of a token do not match
        assert!(find_course_by_slot(&courses, "B1").is_none());
        assert!(find_course_by_slot(&courses, "A11").is_none());
    }

    #[test]
    fn test_find_course_by_slot_first_match_wins() {
        let courses = vec![course("FIRST", Some("D11")), course("SECOND", Some("D11+D12"))];
        assert_eq!(
            find_course_by_slot(&courses, "D11").unwrap().code.as_deref(),
            Some("FIRST")
        );
    }

    #[test]
    fn test_course_color_fallback() {
        let courses = vec![course("MAT2003", Some("C11+C13"))];
        assert_eq!(course_color(&courses, "MAT2003"), "#MAT2003");
        assert_eq!(course_color(&courses, "XYZ"), FALLBACK_COLOR);
    }

    #[test]
    fn test_day_parse() {
        assert_eq!("mon".parse::<Day>().unwrap(), Day::Mon);
        assert_eq!("Friday".parse::<Day>().unwrap(), Day::Fri);
        assert!("SAT".parse::<Day>().is_err());
    }

    #[test]
    fn test_slot_at() {
        let table = TimeTable {
            time_slots: vec!["08:30 - 10:00".to_string(), "10:05 - 11:35".to_string()],
            schedule: vec![DaySchedule {
                day: Day::Mon,
                slots: vec!["A11".to_string(), String::new()],
            }],
        };
        assert_eq!(table.slot_at(Day::Mon, 0), Some("A11"));
        assert_eq!(table.slot_at(Day::Mon, 1), None);
        assert_eq!(table.slot_at(Day::Mon, 5), None);
        assert_eq!(table.slot_at(Day::Tue, 0), None);
    }

    #[test]
    fn test_week_dates() {
        // Friday 2024-11-15
        let week = week_dates(date(2024, 11, 15));
        assert_eq!(week[0], date(2024, 11, 11));
        assert_eq!(week[4], date(2024, 11, 15));

        // Sunday belongs to the week that just ended
        let week = week_dates(date(2024, 11, 17));
        assert_eq!(week[0], date(2024, 11, 11));

        // Monday starts a new week
        let week = week_dates(date(2024, 11, 18));
        assert_eq!(week[0], date(2024, 11, 18));
    }
}
