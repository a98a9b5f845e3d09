//! Job application activity log entries.
//!
//! # Responsibility
//! - Represent status and notes changes as structured entries.
//! - Render entries into the human-readable log templates.
//! - Keep history written as plain template strings readable.
//!
//! # Invariants
//! - Notes text stored in an entry is already sanitized: trimmed, `"`
//!   replaced with `'`, blank collapsed to `(empty)`.
//! - Rendered text always matches one of the two templates:
//!   `Status updated to <STATUS> at <TIME>` or
//!   `Notes updated to "<TEXT>" at <TIME>`.

use crate::model::job::JobStatus;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Marker used when notes are cleared.
pub const EMPTY_NOTES_MARKER: &str = "(empty)";

const ACTIVITY_TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// One append-only history entry of a job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ActivityEntryRepr", into = "ActivityEntryRepr")]
pub enum ActivityEntry {
    StatusChange {
        status: JobStatus,
        at: DateTime<Utc>,
    },
    NotesChange {
        text: String,
        at: DateTime<Utc>,
    },
    /// Pre-rendered template text stored by older versions of the tracker.
    Legacy(String),
}

impl ActivityEntry {
    pub fn status_change(status: JobStatus, at: DateTime<Utc>) -> Self {
        Self::StatusChange { status, at }
    }

    /// Builds a notes entry, sanitizing `notes` for embedding in the template.
    pub fn notes_change(notes: Option<&str>, at: DateTime<Utc>) -> Self {
        Self::NotesChange {
            text: sanitize_notes(notes.unwrap_or_default()),
            at,
        }
    }

    /// Instant of the change, when known.
    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::StatusChange { at, .. } | Self::NotesChange { at, .. } => Some(*at),
            Self::Legacy(_) => None,
        }
    }

    /// Renders the template text with timestamps shown in `tz`.
    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Self::StatusChange { status, at } => format!(
                "Status updated to {status} at {}",
                format_activity_timestamp(&at.with_timezone(tz))
            ),
            Self::NotesChange { text, at } => format!(
                "Notes updated to \"{text}\" at {}",
                format_activity_timestamp(&at.with_timezone(tz))
            ),
            Self::Legacy(text) => text.clone(),
        }
    }
}

impl Display for ActivityEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_in(&Local))
    }
}

/// Formats an activity instant like `Jan 5, 2025, 02:30 PM`.
pub fn format_activity_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(ACTIVITY_TIMESTAMP_FORMAT).to_string()
}

/// Sanitizes notes text for embedding between template quotes.
pub fn sanitize_notes(notes: &str) -> String {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        EMPTY_NOTES_MARKER.to_string()
    } else {
        trimmed.replace('"', "'")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ActivityEntryRepr {
    Structured(StructuredEntry),
    Text(String),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StructuredEntry {
    StatusChange { status: JobStatus, at: DateTime<Utc> },
    NotesChange { text: String, at: DateTime<Utc> },
}

impl From<ActivityEntryRepr> for ActivityEntry {
    fn from(value: ActivityEntryRepr) -> Self {
        match value {
            ActivityEntryRepr::Structured(StructuredEntry::StatusChange { status, at }) => {
                Self::StatusChange { status, at }
            }
            ActivityEntryRepr::Structured(StructuredEntry::NotesChange { text, at }) => {
                Self::NotesChange { text, at }
            }
            ActivityEntryRepr::Text(text) => Self::Legacy(text),
        }
    }
}

impl From<ActivityEntry> for ActivityEntryRepr {
    fn from(value: ActivityEntry) -> Self {
        match value {
            ActivityEntry::StatusChange { status, at } => {
                Self::Structured(StructuredEntry::StatusChange { status, at })
            }
            ActivityEntry::NotesChange { text, at } => {
                Self::Structured(StructuredEntry::NotesChange { text, at })
            }
            ActivityEntry::Legacy(text) => Self::Text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_notes, ActivityEntry, EMPTY_NOTES_MARKER};
    use crate::model::job::JobStatus;
    use chrono::{TimeZone, Utc};

    fn at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn status_entry_renders_template() {
        let entry = ActivityEntry::status_change(JobStatus::HrInterview, at());
        assert_eq!(
            entry.render_in(&Utc),
            "Status updated to HR Interview at Jan 5, 2025, 02:30 PM"
        );
    }

    #[test]
    fn notes_entry_replaces_double_quotes() {
        let entry = ActivityEntry::notes_change(Some(r#"  said "hi" twice "#), at());
        let rendered = entry.render_in(&Utc);
        assert_eq!(
            rendered,
            "Notes updated to \"said 'hi' twice\" at Jan 5, 2025, 02:30 PM"
        );
        assert_eq!(rendered.matches('"').count(), 2);
    }

    #[test]
    fn blank_notes_collapse_to_marker() {
        assert_eq!(sanitize_notes(" \n\t "), EMPTY_NOTES_MARKER);
        let entry = ActivityEntry::notes_change(None, at());
        assert!(entry.render_in(&Utc).contains("\"(empty)\""));
    }

    #[test]
    fn structured_entries_serialize_with_kind_tag() {
        let entry = ActivityEntry::status_change(JobStatus::Applied, at());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "status_change");
        assert_eq!(json["status"], "Applied");
    }

    #[test]
    fn plain_string_entries_decode_as_legacy() {
        let text = "Status updated to Applied at Jan 5, 2025, 02:30 PM";
        let entry: ActivityEntry = serde_json::from_str(&format!("\"{text}\"")).unwrap();
        assert_eq!(entry, ActivityEntry::Legacy(text.to_string()));
        assert_eq!(entry.render_in(&Utc), text);
        assert!(entry.at().is_none());
    }
}
