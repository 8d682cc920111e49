//! Month grid layout for the academic calendar
//!
//! A month is always shown as six full weeks (42 days) starting on the Sunday
//! on or before the first of the month. For every visible day the engine picks the
//! events covering it and stacks them so that longer events take the top rows.

use super::event::AcademicEvent;
use crate::error::ValidationError;
use chrono::{Datelike, Days, Months, NaiveDate};
use std::str::FromStr;

/// Number of day cells in a month grid
pub const GRID_DAYS: u64 = 42;

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn next(&self) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
    }

    pub fn prev(&self) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// First cell of the grid: the Sunday on or before the first of the month
    pub fn grid_start(&self) -> NaiveDate {
        let offset = self.first.weekday().num_days_from_sunday();
        self.first - Days::new(u64::from(offset))
    }

    /// The 42 consecutive days shown for this month
    pub fn visible_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.grid_start().iter_days().take(GRID_DAYS as usize)
    }
}

impl FromStr for CalendarMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .map(|first| Self { first })
            .map_err(|_| ValidationError::Month(s.to_string()))
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

/// One event as drawn inside one day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSegment<'a> {
    pub event: &'a AcademicEvent,
    /// The day is the first day of the event
    pub is_start: bool,
    /// The day is the last day of the event
    pub is_end: bool,
    pub duration: i64,
    /// Stacking row inside the cell, 0 is the top
    pub position: usize,
}

/// A day cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub segments: Vec<EventSegment<'a>>,
}

/// Events covering `date`, longest first.
///
/// The sort is stable, so events of equal length keep their order in `events`.
pub fn events_for_day(date: NaiveDate, events: &[AcademicEvent]) -> Vec<EventSegment<'_>> {
    let mut segments: Vec<EventSegment<'_>> = events
        .iter()
        .filter(|event| event.contains(date))
        .map(|event| EventSegment {
            event,
            is_start: date == event.start_date,
            is_end: date == event.end_date,
            duration: event.duration(),
            position: 0,
        })
        .collect();

    segments.sort_by(|a, b| b.duration.cmp(&a.duration));
    for (index, segment) in segments.iter_mut().enumerate() {
        segment.position = index;
    }
    segments
}

/// Lay out all 42 day cells of `month`
pub fn layout_month(
    month: CalendarMonth,
    events: &[AcademicEvent],
    today: NaiveDate,
) -> Vec<DayLayout<'_>> {
    month
        .visible_days()
        .map(|date| DayLayout {
            date,
            in_month: month.contains(date),
            is_today: date == today,
            segments: events_for_day(date, events),
        })
        .collect()
}

/// Events starting in `month`, in reference order (the agenda list)
pub fn month_agenda(month: CalendarMonth, events: &[AcademicEvent]) -> Vec<&AcademicEvent> {
    events
        .iter()
        .filter(|event| month.contains(event.start_date))
        .collect()
}
