use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of an academic calendar entry.
///
/// Uses lowercase naming to match the reference data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Holiday,
    Exam,
    Deadline,
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventType::Holiday => "holiday",
            EventType::Exam => "exam",
            EventType::Deadline => "deadline",
            EventType::Other => "other",
        };
        f.write_str(name)
    }
}

/// Visual category used to colour an event.
///
/// Holidays are split further by title so that breaks stand out from single-day holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTone {
    SemesterBreak,
    Break,
    Holiday,
    Exam,
    Deadline,
    Other,
}

impl EventTone {
    /// Accent colour (hex) for the tone
    pub fn accent_color(self) -> &'static str {
        match self {
            EventTone::SemesterBreak => "#0D9488",
            EventTone::Break => "#4F46E5",
            EventTone::Holiday => "#DC2626",
            EventTone::Exam => "#7E22CE",
            EventTone::Deadline => "#CA8A04",
            EventTone::Other => "#2563EB",
        }
    }
}

/// An entry of the academic calendar. Both dates are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicEvent {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventType,
    #[serde(default)]
    pub description: String,
}

impl AcademicEvent {
    /// Number of days covered by the event, counting both ends
    pub fn duration(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether `date` falls inside `[start_date, end_date]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the event is entirely over by `today`
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }

    pub fn tone(&self) -> EventTone {
        match self.kind {
            EventType::Holiday => {
                let title = self.title.to_lowercase();
                if title.contains("semester break") {
                    EventTone::SemesterBreak
                } else if title.contains("break") {
                    EventTone::Break
                } else {
                    EventTone::Holiday
                }
            }
            EventType::Exam => EventTone::Exam,
            EventType::Deadline => EventTone::Deadline,
            EventType::Other => EventTone::Other,
        }
    }

    /// Title with the words "begin"/"end" removed, as shown inside day cells
    pub fn display_title(&self) -> String {
        let words: Vec<&str> = self
            .title
            .split_whitespace()
            .filter(|word| {
                let word = word.to_lowercase();
                !matches!(word.as_str(), "begin" | "begins" | "end" | "ends")
            })
            .collect();
        if words.is_empty() {
            self.title.trim().to_string()
        } else {
            words.join(" ")
        }
    }
}

#[cfg(test)]
pub(crate) fn test_event(
    id: &str,
    title: &str,
    start: NaiveDate,
    end: NaiveDate,
    kind: EventType,
) -> AcademicEvent {
    AcademicEvent {
        id: id.to_string(),
        title: title.to_string(),
        start_date: start,
        end_date: end,
        kind,
        description: String::new(),
    }
}
