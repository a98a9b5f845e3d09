//! Job tracking board: filtering, priority ordering and headline stats.
//!
//! # Invariants
//! - Board order is status priority descending, then recency descending.
//! - Sorting is stable, so equal keys keep store order.

use crate::model::job::{JobApplication, JobStatus};

/// Status dropdown selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &JobStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl From<&str> for StatusFilter {
    /// `"All"` selects everything; any other label is an exact status.
    fn from(value: &str) -> Self {
        if value == "All" {
            Self::All
        } else {
            Self::Only(JobStatus::from(value))
        }
    }
}

/// Board filter combining status selection and free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub status: StatusFilter,
    /// Case-insensitive substring of company name or position.
    pub search: String,
}

impl JobFilter {
    pub fn matches(&self, job: &JobApplication) -> bool {
        self.status.matches(&job.status) && matches_search(job, &self.search)
    }
}

fn matches_search(job: &JobApplication, search: &str) -> bool {
    let needle = search.to_lowercase();
    job.company_name.to_lowercase().contains(&needle)
        || job.position.to_lowercase().contains(&needle)
}

/// Keeps jobs matching `filter`, preserving input order.
pub fn filter_jobs(jobs: Vec<JobApplication>, filter: &JobFilter) -> Vec<JobApplication> {
    jobs.into_iter().filter(|job| filter.matches(job)).collect()
}

/// Orders jobs for the board in place.
pub fn sort_for_board(jobs: &mut [JobApplication]) {
    jobs.sort_by(|left, right| {
        right
            .status
            .priority()
            .cmp(&left.status.priority())
            .then_with(|| right.recency_key().cmp(&left.recency_key()))
    });
}

/// Filters then orders jobs for the board.
pub fn board(jobs: Vec<JobApplication>, filter: &JobFilter) -> Vec<JobApplication> {
    let mut visible = filter_jobs(jobs, filter);
    sort_for_board(&mut visible);
    visible
}

/// Headline counters shown above the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
    pub total: usize,
    pub applied: usize,
    /// HR, user and head interviews plus technical tests.
    pub interviewing: usize,
    pub offering: usize,
}

impl JobStats {
    /// Counts over all jobs, ignoring any board filter.
    pub fn from_jobs(jobs: &[JobApplication]) -> Self {
        jobs.iter().fold(
            Self {
                total: jobs.len(),
                ..Self::default()
            },
            |mut stats, job| {
                match &job.status {
                    JobStatus::Applied => stats.applied += 1,
                    JobStatus::Offering => stats.offering += 1,
                    status if status.is_interviewing() => stats.interviewing += 1,
                    _ => {}
                }
                stats
            },
        )
    }
}
