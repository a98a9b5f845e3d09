use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use trackbook_core::db::schema::SCHEMA_VERSION;
use trackbook_core::db::{open_db, open_db_in_memory, DbError};
use trackbook_core::{
    FixedClock, JobApplicationDraft, JobService, JobStatus, KeyValueStore, KnowledgeDraft,
    KnowledgeService, KvJobRepository, KvKnowledgeRepository, SqliteStore, StoreError,
};

#[test]
fn open_db_installs_schema() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 99,
            ..
        }
    ));
}

#[test]
fn records_survive_reopening_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trackbook.sqlite3");
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap());

    let job_id = {
        let conn = open_db(&path).unwrap();
        let store = SqliteStore::try_new(&conn).unwrap();
        let jobs = JobService::with_clock(KvJobRepository::new(&store), &clock);
        let job = jobs
            .create(JobApplicationDraft::new("Acme", "Engineer"))
            .unwrap();
        jobs.update_status(&job.id, JobStatus::Offering).unwrap();

        let knowledge = KnowledgeService::with_clock(KvKnowledgeRepository::new(&store), &clock);
        knowledge
            .create(KnowledgeDraft::new("Offer checklist").with_url("https://example.com"))
            .unwrap();
        job.id
    };

    let conn = open_db(&path).unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    let jobs = JobService::with_clock(KvJobRepository::new(&store), &clock);
    let reloaded = jobs.get(&job_id).unwrap().unwrap();
    assert_eq!(reloaded.status, JobStatus::Offering);
    assert_eq!(reloaded.log_activity.len(), 2);

    assert_eq!(store.list("job:").unwrap().keys.len(), 1);
    assert_eq!(store.list("knowledge:").unwrap().keys.len(), 1);
}

#[test]
fn legacy_browser_export_is_readable() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    store
        .set(
            "job:JOB1736087400000ABCDEFGHI",
            r#"{"id":"JOB1736087400000ABCDEFGHI","companyName":"Acme","position":"Engineer","status":"Applied","appliedDate":"2025-01-05","createdAt":"2025-01-05T14:30:00.000Z","logActivity":["Status updated to Applied at Jan 5, 2025, 02:30 PM","Notes updated to \"call back\" at Jan 6, 2025, 09:00 AM"]}"#,
        )
        .unwrap();

    let jobs = JobService::new(KvJobRepository::new(&store));
    let listed = jobs.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].log_activity.len(), 2);

    let updated = jobs
        .update_status(&listed[0].id, JobStatus::HrInterview)
        .unwrap();
    assert_eq!(updated.log_activity.len(), 3);
}

#[test]
fn store_requires_installed_schema() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteStore::try_new(&conn),
        Err(StoreError::Db(DbError::UninitializedConnection { .. }))
    ));
}
