//! Job application domain model.
//!
//! # Responsibility
//! - Define the persisted job application record and its status set.
//! - Own the status priority table used by the tracking board.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `log_activity` holds at least one entry for records created here and
//!   only ever grows.
//! - Unknown status strings from storage are preserved, not rejected.

use crate::model::activity::ActivityEntry;
use crate::model::id::RecordId;
use crate::model::validation::{require_non_blank, ValidationError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Pipeline status of an application.
///
/// Serialized as its display label (`"HR Interview"`), the format stored
/// values have always used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    #[default]
    Draft,
    Applied,
    HrInterview,
    UserInterview,
    HeadInterview,
    TechnicalTest,
    Ghosting,
    Failed,
    Rejected,
    Offering,
    /// Label not known to this version.
    Unknown(String),
}

impl JobStatus {
    /// Known statuses in form/dropdown order.
    pub const ALL: [JobStatus; 10] = [
        Self::Draft,
        Self::Applied,
        Self::HrInterview,
        Self::UserInterview,
        Self::HeadInterview,
        Self::TechnicalTest,
        Self::Ghosting,
        Self::Failed,
        Self::Rejected,
        Self::Offering,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Applied => "Applied",
            Self::HrInterview => "HR Interview",
            Self::UserInterview => "User Interview",
            Self::HeadInterview => "Head Interview",
            Self::TechnicalTest => "Technical Test",
            Self::Ghosting => "Ghosting",
            Self::Failed => "Failed",
            Self::Rejected => "Rejected",
            Self::Offering => "Offering",
            Self::Unknown(label) => label.as_str(),
        }
    }

    /// Board ordering weight; higher sorts first, unknown is `-1`.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Offering => 9,
            Self::Draft => 8,
            Self::HeadInterview => 7,
            Self::UserInterview => 6,
            Self::TechnicalTest => 5,
            Self::HrInterview => 4,
            Self::Applied => 3,
            Self::Ghosting => 2,
            Self::Rejected => 1,
            Self::Failed => 0,
            Self::Unknown(_) => -1,
        }
    }

    /// Whether the status is one of the interview stages.
    pub fn is_interviewing(&self) -> bool {
        matches!(
            self,
            Self::HrInterview | Self::UserInterview | Self::HeadInterview | Self::TechnicalTest
        )
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for JobStatus {
    fn from(value: &str) -> Self {
        Self::ALL
            .iter()
            .find(|status| status.as_str() == value)
            .cloned()
            .unwrap_or_else(|| Self::Unknown(value.to_string()))
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<JobStatus> for String {
    fn from(value: JobStatus) -> Self {
        match value {
            JobStatus::Unknown(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Persisted job application record, stored under `job:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: RecordId,
    pub company_name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    /// Older versions could store an empty string once the date was cleared.
    #[serde(
        default,
        deserialize_with = "deserialize_applied_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub applied_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Missing on some records written by older versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub log_activity: Vec<ActivityEntry>,
}

impl JobApplication {
    /// Checks required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("companyName", &self.company_name)?;
        require_non_blank("position", &self.position)
    }

    /// Sets a new status and records the transition.
    pub fn record_status(&mut self, status: JobStatus, at: DateTime<Utc>) {
        self.log_activity
            .push(ActivityEntry::status_change(status.clone(), at));
        self.status = status;
    }

    /// Replaces notes and records the change.
    ///
    /// Blank notes are stored as absent.
    pub fn record_notes(&mut self, notes: Option<String>, at: DateTime<Utc>) {
        let notes = notes.filter(|text| !text.trim().is_empty());
        self.log_activity
            .push(ActivityEntry::notes_change(notes.as_deref(), at));
        self.notes = notes;
    }

    /// Instant used as the board's secondary sort key.
    ///
    /// Falls back to midnight UTC of `applied_date` for records without
    /// `created_at`; `None` when neither is known.
    pub fn recency_key(&self) -> Option<DateTime<Utc>> {
        self.created_at.or_else(|| {
            self.applied_date
                .map(|date| date.and_time(NaiveTime::default()).and_utc())
        })
    }
}

fn deserialize_applied_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Input for creating or fully editing a job application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobApplicationDraft {
    pub company_name: String,
    pub position: String,
    pub level: Option<String>,
    pub job_link: Option<String>,
    /// Defaults to `Draft`.
    pub status: Option<JobStatus>,
    /// Defaults to the creation date.
    pub applied_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl JobApplicationDraft {
    pub fn new(company_name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_applied_date(mut self, date: NaiveDate) -> Self {
        self.applied_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks required fields before anything is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("companyName", &self.company_name)?;
        require_non_blank("position", &self.position)
    }
}
