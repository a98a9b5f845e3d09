//! View-layer query helpers.
//!
//! # Responsibility
//! - Filter, sort and summarize records for list screens.
//! - Format dates, activity timestamps and log messages for display.
//!
//! # Invariants
//! - Helpers are pure: they never touch the store.

pub mod format;
pub mod job_board;
pub mod knowledge_filter;
