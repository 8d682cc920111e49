//! Formatting helper functions for the academic schedule server
//!
//! This module renders each view as plain text for the tool responses.

use crate::academic::AcademicEvent;
use crate::academic::calendar::{CalendarMonth, DayLayout};
use crate::academic::curriculum::{CurriculumCategory, CurriculumTracker};
use crate::academic::student::{Student, academic_year_label, parse_registration_number};
use crate::academic::timetable::{Course, Day, TimeTable, course_color, find_course_by_slot};
use crate::validation::PasswordStrength;
use chrono::NaiveDate;

/// Whole-week grid: one line per period, one column per day
pub fn format_week(timetable: &TimeTable, courses: &[Course], week: &[NaiveDate; 5]) -> String {
    let mut result = String::from("Weekly schedule\n\n");
    result.push_str(&format!("{:<15}", "Time"));
    for day in Day::ALL {
        result.push_str(&format!(
            " | {:<9}",
            format!("{} {}", day, week[day.index()].format("%d"))
        ));
    }
    result.push('\n');

    for (period, time) in timetable.time_slots.iter().enumerate() {
        result.push_str(&format!("{:<15}", time));
        for day in Day::ALL {
            let cell = match timetable.slot_at(day, period) {
                Some(slot) if find_course_by_slot(courses, slot).is_some() => format!("{}*", slot),
                Some(slot) => slot.to_string(),
                None => "-".to_string(),
            };
            result.push_str(&format!(" | {:<9}", cell));
        }
        result.push('\n');
    }

    result.push_str("\n* slot has a registered course\n");
    result
}

/// Periods of a single day with the course occupying each slot
pub fn format_day(timetable: &TimeTable, courses: &[Course], day: Day, date: NaiveDate) -> String {
    let mut result = format!("Schedule for {} {}\n\n", day, date.format("%Y-%m-%d"));
    let mut classes = 0;

    for (period, time) in timetable.time_slots.iter().enumerate() {
        let Some(slot) = timetable.slot_at(day, period) else {
            continue;
        };
        match find_course_by_slot(courses, slot) {
            Some(course) => {
                classes += 1;
                result.push_str(&format!(
                    "- {} [{}] {} - {}\n",
                    time,
                    slot,
                    course.code.as_deref().unwrap_or("-"),
                    course.title
                ));
                result.push_str(&format!("  Faculty: {}\n", course.faculty));
                if let Some(code) = course.code.as_deref() {
                    result.push_str(&format!("  Colour: {}\n", course_color(courses, code)));
                }
            }
            None => result.push_str(&format!("- {} [{}] free\n", time, slot)),
        }
    }

    if classes == 0 {
        result.push_str("No classes scheduled\n");
    }
    result
}

/// Month grid (days with events) followed by the month agenda
pub fn format_calendar(
    month: CalendarMonth,
    layout: &[DayLayout<'_>],
    agenda: &[&AcademicEvent],
    today: NaiveDate,
) -> String {
    let mut result = format!("{}\n\n", month);

    let busy: Vec<&DayLayout<'_>> = layout.iter().filter(|d| !d.segments.is_empty()).collect();
    if busy.is_empty() {
        result.push_str("No events in the visible weeks\n");
    }
    for day in busy {
        let mut marker = String::new();
        if day.is_today {
            marker.push_str(" (today)");
        }
        if !day.in_month {
            marker.push_str(" (other month)");
        }
        result.push_str(&format!("{}{}\n", day.date.format("%a %Y-%m-%d"), marker));

        for segment in &day.segments {
            let edge = match (segment.is_start, segment.is_end) {
                (true, true) => "",
                (true, false) => ", starts",
                (false, true) => ", ends",
                (false, false) => ", continues",
            };
            result.push_str(&format!(
                "  [{}] {} ({}{}, {} day(s))\n",
                segment.position,
                segment.event.display_title(),
                segment.event.kind,
                edge,
                segment.duration
            ));
        }
    }

    result.push_str(&format!("\nEvents starting in {}:\n", month));
    if agenda.is_empty() {
        result.push_str("  none\n");
    }
    for event in agenda {
        let dates = if event.start_date == event.end_date {
            event.start_date.format("%d %b").to_string()
        } else {
            format!(
                "{} - {}",
                event.start_date.format("%d %b"),
                event.end_date.format("%d %b")
            )
        };
        let past = if event.is_past(today) { " (past)" } else { "" };
        result.push_str(&format!(
            "- {} {}: {}{}\n",
            dates,
            event.tone().accent_color(),
            event.title,
            past
        ));
        if !event.description.is_empty() {
            result.push_str(&format!("  {}\n", event.description));
        }
    }

    result
}

pub fn format_courses(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses registered".to_string();
    }

    let total: f64 = courses.iter().map(|c| c.credit).sum();
    let mut result = format!(
        "Found {} course(s), {:.1} credits:\n\n",
        courses.len(),
        total
    );
    for course in courses {
        result.push_str(&format!(
            "- [{}] {} ({:.1} credits)\n",
            course.code.as_deref().unwrap_or("-"),
            course.title,
            course.credit
        ));
        if let Some(ref slot) = course.slot {
            result.push_str(&format!("  Slot: {}\n", slot));
        }
        if let Some(ref class_no) = course.class_no {
            result.push_str(&format!("  Class: {}\n", class_no));
        }
        result.push_str(&format!("  Faculty: {}\n", course.faculty));
        if let Some(ref link) = course.meet_link {
            result.push_str(&format!("  Link: {}\n", link));
        }
    }
    result
}

fn format_cgpa_line(tracker: &CurriculumTracker) -> String {
    let cgpa = tracker.cgpa();
    format!("CGPA: {:.2} ({:.1}%)\n", cgpa, cgpa * 10.0)
}

/// Progress header, per-category breakdown and the completed-course list
pub fn format_curriculum(curriculum: &[CurriculumCategory], tracker: &CurriculumTracker) -> String {
    let progress = tracker.progress(curriculum);
    let mut result = format!(
        "Completed: {} / {} credits ({:.1}%)\n",
        progress.completed_credits, progress.total_credits, progress.percentage
    );
    if tracker.has_grades() {
        result.push_str(&format_cgpa_line(tracker));
    }

    for category in curriculum {
        result.push_str(&format!(
            "\n{}. {} ({} / {} credits)\n",
            category.sl_no,
            category.category,
            tracker.category_completed_credits(category.sl_no),
            category.credits
        ));
        for course in &category.courses {
            let mark = if tracker.is_completed(&course.course_code) {
                "x"
            } else {
                " "
            };
            result.push_str(&format!(
                "  [{}] {} {} ({} credits, L-T-P-J {}-{}-{}-{})\n",
                mark,
                course.course_code,
                course.course_title,
                course.credits,
                course.l,
                course.t,
                course.p,
                course.j
            ));
        }
    }

    if !tracker.completed().is_empty() {
        result.push_str("\nCompleted courses:\n");
        for course in tracker.completed() {
            result.push_str(&format!(
                "- {} {} ({} credits) grade: {}\n",
                course.course_code,
                course.course_title,
                course.credits,
                course
                    .grade
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ));
        }
    }
    result
}

pub fn format_profile(student: &Student, current_year: i32) -> String {
    let mut result = format!("{}\n", student.name);
    result.push_str(&format!(
        "  Registration number: {}\n",
        student.registration_number
    ));
    if !student.email.is_empty() {
        result.push_str(&format!("  Email: {}\n", student.email));
    }
    result.push_str(&format!("  Program: {}\n", student.program));

    if let Some(info) = parse_registration_number(&student.registration_number, current_year) {
        result.push_str(&format!("  Joined: {}\n", info.joining_year));
        result.push_str(&format!(
            "  Year of study: {}\n",
            academic_year_label(info.academic_year)
        ));
    }
    result
}

pub fn format_password_strength(strength: &PasswordStrength) -> String {
    let label = strength.label();
    let mut result = if label.is_empty() {
        format!("Score: {}\n", strength.score)
    } else {
        format!("Score: {} ({})\n", strength.score, label)
    };
    for requirement in &strength.requirements {
        result.push_str(&format!(
            "  [{}] {}\n",
            if requirement.met { "x" } else { " " },
            requirement.text
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academic::{CalendarMonth, ReferenceData, layout_month, month_agenda};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_day_lists_courses() {
        let data = ReferenceData::builtin().unwrap();
        let text = format_day(&data.timetable, &data.courses, Day::Mon, date(2024, 11, 11));
        assert!(text.contains("Schedule for MON 2024-11-11"));
        assert!(text.contains("[A11] CSE3009 - Parallel and Distributed Computing"));
        assert!(text.contains("[B11] CSE3003 - Operating System"));
        assert!(text.contains("[A21] free"));
    }

    #[test]
    fn test_format_week_has_all_periods() {
        let data = ReferenceData::builtin().unwrap();
        let week = crate::academic::week_dates(date(2024, 11, 15));
        let text = format_week(&data.timetable, &data.courses, &week);
        assert!(text.contains("08:30 - 10:00"));
        assert!(text.contains("18:00 - 19:30"));
        assert!(text.contains("B11*"));
    }

    #[test]
    fn test_format_calendar_marks_positions() {
        let data = ReferenceData::builtin().unwrap();
        let month: CalendarMonth = "2024-11".parse().unwrap();
        let today = date(2024, 11, 15);
        let layout = layout_month(month, &data.events, today);
        let agenda = month_agenda(month, &data.events);

        let text = format_calendar(month, &layout, &agenda, today);
        assert!(text.starts_with("November 2024"));
        assert!(text.contains("Fri 2024-11-15 (today)"));
        // The six-day exam block sits above the one-day holiday
        assert!(text.contains("[0] CAT-2 Examinations (exam, continues, 6 day(s))"));
        assert!(text.contains("[1] Guru Nanak Jayanti (holiday, 1 day(s))"));
        assert!(text.contains("Events starting in November 2024:"));
        assert!(!text.contains("CAT-2 Examinations (past)"));
    }

    #[test]
    fn test_format_courses_totals() {
        let data = ReferenceData::builtin().unwrap();
        let text = format_courses(&data.courses);
        assert!(text.starts_with("Found 9 course(s), 28.0 credits"));
        assert!(text.contains("Link: https://onlinecourses.nptel.ac.in"));
        assert_eq!(format_courses(&[]), "No courses registered");
    }

    #[test]
    fn test_format_profile_clamps_year_of_study() {
        let student = Student {
            id: "23BCE12345".to_string(),
            name: "Asha Rao".to_string(),
            email: String::new(),
            program: "B.Tech Computer Engineering".to_string(),
            registration_number: "23BCE12345".to_string(),
        };
        assert!(format_profile(&student, 2024).contains("Year of study: 2nd Year"));
        assert!(format_profile(&student, 2031).contains("Year of study: 4th Year"));
        assert!(format_profile(&student, 2020).contains("Year of study: 1st Year"));
        assert!(!format_profile(&student, 2024).contains("Email"));
    }

    #[test]
    fn test_format_password_strength() {
        let text = format_password_strength(&crate::validation::password_strength("abcdefgh"));
        assert!(text.starts_with("Score: 40 (Moderate)"));
        assert!(text.contains("[x] At least 8 characters"));
        assert!(text.contains("[ ] At least one number"));
    }
}
