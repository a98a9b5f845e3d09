//! Display formatting for dates, notes and activity history.
//!
//! # Invariants
//! - `log_message_parts` of a structured entry equals the parts re-parsed
//!   from its rendered text, multi-line notes included; legacy strings
//!   rely on that re-parse.

use crate::model::activity::ActivityEntry;
use crate::model::job::JobApplication;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

pub use crate::model::activity::format_activity_timestamp;

static STATUS_ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^Status updated to (.+) at (.+)$").expect("valid status entry regex"));
static NOTES_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)^Notes updated to "(.*)" at (.+)$"#).expect("valid notes entry regex")
});

const STATUS_PREFIX: &str = "Status updated to ";
const NOTES_PREFIX: &str = "Notes updated to \"";
const MISSING_DATE: &str = "-";
const NO_NOTES: &str = "No notes.";
const NOTES_PREVIEW_LINES: usize = 2;

const INDONESIAN_MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Formats an applied date like `05 Januari 2025`; `-` when absent.
pub fn format_applied_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{:02} {} {}",
            date.day(),
            INDONESIAN_MONTHS[date.month0() as usize],
            date.year()
        ),
        None => MISSING_DATE.to_string(),
    }
}

/// Parses date form input: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// First two lines of the notes for list cards.
pub fn notes_preview(notes: Option<&str>) -> String {
    match notes.filter(|text| !text.is_empty()) {
        Some(text) => text
            .split('\n')
            .take(NOTES_PREVIEW_LINES)
            .collect::<Vec<_>>()
            .join("\n"),
        None => NO_NOTES.to_string(),
    }
}

/// Log line split for display with the changed value highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessageParts {
    pub prefix: String,
    pub highlight: String,
    pub suffix: String,
}

impl LogMessageParts {
    fn plain(text: &str) -> Self {
        Self {
            prefix: String::new(),
            highlight: text.to_string(),
            suffix: String::new(),
        }
    }
}

/// Splits one entry into display parts, timestamps shown in `tz`.
pub fn log_message_parts<Tz>(entry: &ActivityEntry, tz: &Tz) -> LogMessageParts
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match entry {
        ActivityEntry::StatusChange { status, at } => LogMessageParts {
            prefix: STATUS_PREFIX.to_string(),
            highlight: status.to_string(),
            suffix: format!(
                " at {}",
                format_activity_timestamp(&at.with_timezone(tz))
            ),
        },
        ActivityEntry::NotesChange { text, at } => LogMessageParts {
            prefix: NOTES_PREFIX.to_string(),
            highlight: text.clone(),
            suffix: format!(
                "\" at {}",
                format_activity_timestamp(&at.with_timezone(tz))
            ),
        },
        ActivityEntry::Legacy(text) => parse_log_message(text),
    }
}

/// Re-parses rendered template text; unrecognized text is all highlight.
pub fn parse_log_message(text: &str) -> LogMessageParts {
    if let Some(caps) = STATUS_ENTRY_RE.captures(text) {
        return LogMessageParts {
            prefix: STATUS_PREFIX.to_string(),
            highlight: caps[1].to_string(),
            suffix: format!(" at {}", &caps[2]),
        };
    }
    if let Some(caps) = NOTES_ENTRY_RE.captures(text) {
        return LogMessageParts {
            prefix: NOTES_PREFIX.to_string(),
            highlight: caps[1].to_string(),
            suffix: format!("\" at {}", &caps[2]),
        };
    }
    LogMessageParts::plain(text)
}

/// One row of the activity timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    /// Position in the stored, chronological history.
    pub index: usize,
    pub is_latest: bool,
    pub parts: LogMessageParts,
}

/// Activity history newest-first for the detail view.
pub fn activity_timeline<Tz>(job: &JobApplication, tz: &Tz) -> Vec<TimelineItem>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let total = job.log_activity.len();
    job.log_activity
        .iter()
        .enumerate()
        .rev()
        .map(|(index, entry)| TimelineItem {
            index,
            is_latest: index + 1 == total,
            parts: log_message_parts(entry, tz),
        })
        .collect()
}
