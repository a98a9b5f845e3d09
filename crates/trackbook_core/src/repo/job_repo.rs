//! Job application repository contracts and key/value implementation.
//!
//! # Invariants
//! - Records live under `job:<id>`.
//! - `save` calls `JobApplication::validate()` before writing.

use crate::model::id::{RecordId, RecordKind};
use crate::model::job::JobApplication;
use crate::repo::{
    load_record, remove_record, scan_records, store_record, RecordScan, RepoResult,
};
use crate::store::KeyValueStore;

/// Repository interface for job application records.
pub trait JobRepository {
    /// Scans all job keys, reporting undecodable ones.
    fn scan_jobs(&self) -> RepoResult<RecordScan<JobApplication>>;
    fn get_job(&self, id: &RecordId) -> RepoResult<Option<JobApplication>>;
    /// Writes the full record, overwriting any previous value.
    fn save_job(&self, job: &JobApplication) -> RepoResult<()>;
    /// Removes the record; absent ids are not an error.
    fn delete_job(&self, id: &RecordId) -> RepoResult<()>;

    /// Decodable records only, in store order.
    fn list_jobs(&self) -> RepoResult<Vec<JobApplication>> {
        Ok(self.scan_jobs()?.records)
    }
}

/// Job repository backed by an injected key/value store.
pub struct KvJobRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvJobRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> JobRepository for KvJobRepository<S> {
    fn scan_jobs(&self) -> RepoResult<RecordScan<JobApplication>> {
        scan_records(&self.store, RecordKind::Job)
    }

    fn get_job(&self, id: &RecordId) -> RepoResult<Option<JobApplication>> {
        load_record(&self.store, RecordKind::Job, id)
    }

    fn save_job(&self, job: &JobApplication) -> RepoResult<()> {
        job.validate()?;
        store_record(&self.store, RecordKind::Job, &job.id, job)
    }

    fn delete_job(&self, id: &RecordId) -> RepoResult<()> {
        remove_record(&self.store, RecordKind::Job, id)
    }
}
