use chrono::{Duration, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::Cell;
use trackbook_core::query::format::format_applied_date;
use trackbook_core::store::{DeleteReceipt, KeyListing, StoredValue};
use trackbook_core::{
    ActivityEntry, Clock, FixedClock, JobApplicationDraft, JobFilter, JobService, JobStatus,
    KeyValueStore, KvJobRepository, MemoryStore, RecordId, ServiceError, StatusFilter,
    StoreError, StoreResult, ValidationError,
};

static STATUS_ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Status updated to (.+) at (.+)$").unwrap());

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap())
}

#[test]
fn create_assigns_id_defaults_and_initial_history() {
    let store = MemoryStore::new();
    let clock = clock();
    let service = JobService::with_clock(KvJobRepository::new(&store), &clock);

    let job = service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap();

    assert!(job.id.as_str().starts_with("JOB1736087400000"));
    assert_eq!(job.status, JobStatus::Draft);
    assert_eq!(job.applied_date, NaiveDate::from_ymd_opt(2025, 1, 5));
    assert_eq!(job.created_at, Some(clock.now()));
    assert_eq!(job.log_activity.len(), 1);
    assert_eq!(
        job.log_activity[0].render_in(&Utc),
        "Status updated to Draft at Jan 5, 2025, 02:30 PM"
    );

    let stored = service.get(&job.id).unwrap().unwrap();
    assert_eq!(stored, job);
}

#[test]
fn create_keeps_explicit_status_and_date() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    let applied = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();

    let job = service
        .create(
            JobApplicationDraft::new("Globex", "Analyst")
                .with_status(JobStatus::Applied)
                .with_applied_date(applied),
        )
        .unwrap();

    assert_eq!(job.status, JobStatus::Applied);
    assert_eq!(job.applied_date, Some(applied));
    assert!(matches!(
        &job.log_activity[0],
        ActivityEntry::StatusChange { status: JobStatus::Applied, .. }
    ));
}

#[test]
fn create_with_blank_company_fails_without_writing() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());

    let err = service
        .create(JobApplicationDraft::new("", "X"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingField("companyName"))
    ));
    assert!(store.is_empty());
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn update_status_appends_exactly_one_entry() {
    let store = MemoryStore::new();
    let clock = clock();
    let service = JobService::with_clock(KvJobRepository::new(&store), &clock);
    let job = service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap();

    clock.advance(Duration::hours(2));
    service
        .update_status(&job.id, JobStatus::HrInterview)
        .unwrap();

    let reloaded = service.get(&job.id).unwrap().unwrap();
    assert_eq!(reloaded.status, JobStatus::HrInterview);
    assert_eq!(reloaded.log_activity.len(), 2);
    let rendered = reloaded.log_activity[1].render_in(&Utc);
    let caps = STATUS_ENTRY_RE.captures(&rendered).unwrap();
    assert_eq!(&caps[1], "HR Interview");
    assert_eq!(&caps[2], "Jan 5, 2025, 04:30 PM");
}

#[test]
fn update_notes_sanitizes_quotes_and_marks_empty() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    let job = service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap();

    let updated = service
        .update_notes(&job.id, Some(r#"Ask about "remote" and "equity""#.to_string()))
        .unwrap();
    assert_eq!(
        updated.notes.as_deref(),
        Some(r#"Ask about "remote" and "equity""#)
    );
    let rendered = updated.log_activity.last().unwrap().render_in(&Utc);
    assert_eq!(rendered.matches('"').count(), 2);
    assert!(rendered.contains("Ask about 'remote' and 'equity'"));

    let cleared = service.update_notes(&job.id, Some("   ".to_string())).unwrap();
    assert_eq!(cleared.notes, None);
    assert!(cleared
        .log_activity
        .last()
        .unwrap()
        .render_in(&Utc)
        .starts_with("Notes updated to \"(empty)\" at "));
    assert_eq!(cleared.log_activity.len(), 3);
}

#[test]
fn notes_update_does_not_clobber_newer_status() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    let stale = service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap();

    service.update_status(&stale.id, JobStatus::Applied).unwrap();
    let updated = service
        .update_notes(&stale.id, Some("follow up friday".to_string()))
        .unwrap();

    assert_eq!(updated.status, JobStatus::Applied);
    assert_eq!(updated.log_activity.len(), 3);
}

#[test]
fn mutations_on_missing_id_report_not_found() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    let missing = RecordId::from("JOB404");

    assert!(matches!(
        service.update_status(&missing, JobStatus::Applied),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.update_notes(&missing, None),
        Err(ServiceError::NotFound(_))
    ));
    assert!(store.is_empty());
}

#[test]
fn edit_replaces_fields_and_logs_status() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    let job = service
        .create(JobApplicationDraft::new("Acme", "Engineer").with_notes("first"))
        .unwrap();

    let mut draft = JobApplicationDraft::new("Acme Corp", "Senior Engineer")
        .with_status(JobStatus::TechnicalTest);
    draft.level = Some("  ".to_string());
    draft.job_link = Some("https://acme.example/jobs/7".to_string());
    let edited = service.edit(&job.id, draft).unwrap();

    assert_eq!(edited.id, job.id);
    assert_eq!(edited.created_at, job.created_at);
    assert_eq!(edited.applied_date, job.applied_date);
    assert_eq!(edited.company_name, "Acme Corp");
    assert_eq!(edited.level, None);
    assert_eq!(edited.notes, None);
    assert_eq!(edited.status, JobStatus::TechnicalTest);
    assert_eq!(edited.log_activity.len(), 2);
    assert_eq!(edited.log_activity[0], job.log_activity[0]);
}

#[test]
fn delete_is_idempotent_and_hides_record() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    let job = service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap();

    service.delete(&job.id).unwrap();
    service.delete(&job.id).unwrap();
    assert!(service.list().unwrap().iter().all(|item| item.id != job.id));
    assert!(service.get(&job.id).unwrap().is_none());
}

#[test]
fn board_filters_and_orders_by_priority() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    for (company, position, status) in [
        ("Initech", "Engineer", JobStatus::Failed),
        ("Acme", "Engineer", JobStatus::Offering),
        ("Globex", "Analyst", JobStatus::Draft),
        ("Hooli", "Data Engineer", JobStatus::UserInterview),
    ] {
        service
            .create(JobApplicationDraft::new(company, position).with_status(status))
            .unwrap();
    }

    let all: Vec<_> = service
        .board(&JobFilter::default())
        .unwrap()
        .into_iter()
        .map(|job| job.company_name)
        .collect();
    assert_eq!(all, vec!["Acme", "Globex", "Hooli", "Initech"]);

    let engineers: Vec<_> = service
        .board(&JobFilter {
            search: "ENG".to_string(),
            status: StatusFilter::All,
        })
        .unwrap()
        .into_iter()
        .map(|job| job.company_name)
        .collect();
    assert_eq!(engineers, vec!["Acme", "Hooli", "Initech"]);

    let stats = service.stats().unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.interviewing, 1);
    assert_eq!(stats.offering, 1);
}

#[test]
fn corrupt_values_are_skipped_and_reported() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap();
    store.set("job:JOBBROKEN", "{\"id\":").unwrap();

    assert_eq!(service.list().unwrap().len(), 1);
    let scan = service.scan().unwrap();
    assert_eq!(scan.corrupt_keys, vec!["job:JOBBROKEN".to_string()]);
}

#[test]
fn job_with_cleared_applied_date_stays_on_the_board() {
    let store = MemoryStore::new();
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());
    service
        .create(JobApplicationDraft::new("Acme", "Engineer").with_status(JobStatus::Applied))
        .unwrap();
    store
        .set(
            "job:JOB1",
            r#"{"id":"JOB1","companyName":"Globex","position":"Analyst","status":"Applied","appliedDate":"","notes":"","logActivity":["Status updated to Applied at Jan 2, 2025, 09:00 AM"]}"#,
        )
        .unwrap();

    let scan = service.scan().unwrap();
    assert_eq!(scan.records.len(), 2);
    assert!(scan.corrupt_keys.is_empty());

    let board = service.board(&JobFilter::default()).unwrap();
    let companies: Vec<_> = board.iter().map(|job| job.company_name.as_str()).collect();
    assert_eq!(companies, vec!["Acme", "Globex"]);
    assert_eq!(format_applied_date(board[1].applied_date), "-");

    let updated = service
        .update_status(&RecordId::from("JOB1"), JobStatus::HrInterview)
        .unwrap();
    assert_eq!(updated.applied_date, None);
    assert_eq!(updated.log_activity.len(), 2);
}

/// Store whose writes fail, as when the browser quota is exhausted.
struct QuotaExceededStore {
    inner: MemoryStore,
    writes_attempted: Cell<usize>,
}

impl KeyValueStore for QuotaExceededStore {
    fn get(&self, key: &str) -> StoreResult<Option<StoredValue>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<StoredValue> {
        self.writes_attempted.set(self.writes_attempted.get() + 1);
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn delete(&self, key: &str) -> StoreResult<DeleteReceipt> {
        self.inner.delete(key)
    }

    fn list(&self, prefix: &str) -> StoreResult<KeyListing> {
        self.inner.list(prefix)
    }
}

#[test]
fn store_failure_surfaces_retry_message() {
    let store = QuotaExceededStore {
        inner: MemoryStore::new(),
        writes_attempted: Cell::new(0),
    };
    let service = JobService::with_clock(KvJobRepository::new(&store), clock());

    let err = service
        .create(JobApplicationDraft::new("Acme", "Engineer"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    assert_eq!(store.writes_attempted.get(), 1);
    assert!(service.list().unwrap().is_empty());
}
