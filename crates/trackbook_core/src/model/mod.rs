//! Domain model for job applications and knowledge entries.
//!
//! # Responsibility
//! - Define the records persisted as JSON values in the key/value store.
//! - Own identifier generation and field validation rules.
//!
//! # Invariants
//! - Every record is owned by exactly one storage key derived from its id.
//! - Deletion is a hard delete; there are no tombstones.
//! - Job activity history is append-only.

pub mod activity;
pub mod id;
pub mod job;
pub mod knowledge;
pub mod validation;
