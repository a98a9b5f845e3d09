//! Core domain logic for Trackbook: a job-application log and a personal
//! knowledge base persisted as JSON values in a flat key/value store.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::activity::ActivityEntry;
pub use model::id::{RecordId, RecordKind};
pub use model::job::{JobApplication, JobApplicationDraft, JobStatus};
pub use model::knowledge::{Knowledge, KnowledgeCategory, KnowledgeDraft};
pub use model::validation::ValidationError;
pub use query::job_board::{JobFilter, JobStats, StatusFilter};
pub use query::knowledge_filter::{CategoryFilter, KnowledgeFilter, TagFilter};
pub use repo::job_repo::{JobRepository, KvJobRepository};
pub use repo::knowledge_repo::{KnowledgeRepository, KvKnowledgeRepository};
pub use repo::{RecordScan, RepoError, RepoResult};
pub use service::job_service::JobService;
pub use service::knowledge_service::KnowledgeService;
pub use service::{ServiceError, ServiceResult};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
