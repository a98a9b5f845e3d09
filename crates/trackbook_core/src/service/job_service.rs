//! Job application use-case service.
//!
//! # Responsibility
//! - Create, edit and delete applications.
//! - Append activity entries for status and notes changes.
//! - Serve the filtered, priority-ordered tracking board.
//!
//! # Invariants
//! - Creation writes exactly one initial status entry.
//! - Each status update, notes update or edit appends exactly one entry.
//! - Mutations re-read the stored record before writing, so a caller's
//!   stale copy never overwrites newer history. Single writer assumed:
//!   there is no compare-and-swap between the read and the write.

use crate::clock::{Clock, SystemClock};
use crate::model::id::{RecordId, RecordKind};
use crate::model::job::{JobApplication, JobApplicationDraft, JobStatus};
use crate::model::validation::normalize_optional_text;
use crate::query::job_board::{self, JobFilter, JobStats};
use crate::repo::job_repo::JobRepository;
use crate::repo::RecordScan;
use crate::service::{log_outcome, ServiceError, ServiceResult};

/// Job application service facade over repository implementations.
pub struct JobService<R: JobRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: JobRepository> JobService<R> {
    /// Creates a service using the wall clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: JobRepository, C: Clock> JobService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// All decodable applications in store order.
    pub fn list(&self) -> ServiceResult<Vec<JobApplication>> {
        Ok(self.repo.list_jobs()?)
    }

    /// Like `list`, also reporting keys whose values could not be decoded.
    pub fn scan(&self) -> ServiceResult<RecordScan<JobApplication>> {
        Ok(self.repo.scan_jobs()?)
    }

    pub fn get(&self, id: &RecordId) -> ServiceResult<Option<JobApplication>> {
        Ok(self.repo.get_job(id)?)
    }

    /// Creates an application from form input.
    ///
    /// # Contract
    /// - Rejects blank company name or position before writing.
    /// - `status` defaults to `Draft`, `applied_date` to today (UTC).
    /// - History starts with one status entry.
    pub fn create(&self, draft: JobApplicationDraft) -> ServiceResult<JobApplication> {
        let result = self.create_inner(draft);
        log_outcome("job_create", &result);
        result
    }

    fn create_inner(&self, draft: JobApplicationDraft) -> ServiceResult<JobApplication> {
        draft.validate()?;

        let now = self.clock.now();
        let mut job = JobApplication {
            id: RecordId::generate(RecordKind::Job, now),
            company_name: draft.company_name.trim().to_string(),
            position: draft.position.trim().to_string(),
            level: normalize_optional_text(draft.level),
            job_link: normalize_optional_text(draft.job_link),
            status: JobStatus::Draft,
            applied_date: Some(draft.applied_date.unwrap_or_else(|| now.date_naive())),
            notes: draft.notes.filter(|text| !text.trim().is_empty()),
            created_at: Some(now),
            log_activity: Vec::new(),
        };
        job.record_status(draft.status.unwrap_or_default(), now);

        self.repo.save_job(&job)?;
        Ok(job)
    }

    /// Replaces the editable fields of an existing application.
    ///
    /// Appends one status entry for the submitted status, changed or not.
    /// `id`, `created_at` and earlier history are preserved.
    pub fn edit(&self, id: &RecordId, draft: JobApplicationDraft) -> ServiceResult<JobApplication> {
        let result = self.edit_inner(id, draft);
        log_outcome("job_edit", &result);
        result
    }

    fn edit_inner(&self, id: &RecordId, draft: JobApplicationDraft) -> ServiceResult<JobApplication> {
        draft.validate()?;
        let mut job = self.load_existing(id)?;

        job.company_name = draft.company_name.trim().to_string();
        job.position = draft.position.trim().to_string();
        job.level = normalize_optional_text(draft.level);
        job.job_link = normalize_optional_text(draft.job_link);
        if let Some(applied_date) = draft.applied_date {
            job.applied_date = Some(applied_date);
        }
        job.notes = draft.notes.filter(|text| !text.trim().is_empty());
        let status = draft.status.unwrap_or_else(|| job.status.clone());
        job.record_status(status, self.clock.now());

        self.repo.save_job(&job)?;
        Ok(job)
    }

    /// Sets a new status and appends a status entry.
    pub fn update_status(&self, id: &RecordId, status: JobStatus) -> ServiceResult<JobApplication> {
        let result = self.load_existing(id).and_then(|mut job| {
            job.record_status(status, self.clock.now());
            self.repo.save_job(&job)?;
            Ok(job)
        });
        log_outcome("job_update_status", &result);
        result
    }

    /// Replaces notes and appends a notes entry.
    ///
    /// Blank notes clear the field and log `(empty)`.
    pub fn update_notes(
        &self,
        id: &RecordId,
        notes: Option<String>,
    ) -> ServiceResult<JobApplication> {
        let result = self.load_existing(id).and_then(|mut job| {
            job.record_notes(notes, self.clock.now());
            self.repo.save_job(&job)?;
            Ok(job)
        });
        log_outcome("job_update_notes", &result);
        result
    }

    /// Removes an application; deleting an absent id succeeds.
    pub fn delete(&self, id: &RecordId) -> ServiceResult<()> {
        let result = self.repo.delete_job(id).map_err(ServiceError::from);
        log_outcome("job_delete", &result);
        result
    }

    /// Filtered applications in board order.
    pub fn board(&self, filter: &JobFilter) -> ServiceResult<Vec<JobApplication>> {
        Ok(job_board::board(self.list()?, filter))
    }

    /// Headline counters over every stored application.
    pub fn stats(&self) -> ServiceResult<JobStats> {
        Ok(JobStats::from_jobs(&self.list()?))
    }

    fn load_existing(&self, id: &RecordId) -> ServiceResult<JobApplication> {
        self.repo
            .get_job(id)?
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }
}
