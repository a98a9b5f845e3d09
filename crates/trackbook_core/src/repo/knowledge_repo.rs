//! Knowledge repository contracts and key/value implementation.
//!
//! # Invariants
//! - Records live under `knowledge:<id>`.
//! - `save` calls `Knowledge::validate()` before writing.

use crate::model::id::{RecordId, RecordKind};
use crate::model::knowledge::Knowledge;
use crate::repo::{
    load_record, remove_record, scan_records, store_record, RecordScan, RepoResult,
};
use crate::store::KeyValueStore;

/// Repository interface for knowledge records.
pub trait KnowledgeRepository {
    fn scan_knowledge(&self) -> RepoResult<RecordScan<Knowledge>>;
    fn get_knowledge(&self, id: &RecordId) -> RepoResult<Option<Knowledge>>;
    fn save_knowledge(&self, knowledge: &Knowledge) -> RepoResult<()>;
    fn delete_knowledge(&self, id: &RecordId) -> RepoResult<()>;

    fn list_knowledge(&self) -> RepoResult<Vec<Knowledge>> {
        Ok(self.scan_knowledge()?.records)
    }
}

/// Knowledge repository backed by an injected key/value store.
pub struct KvKnowledgeRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvKnowledgeRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> KnowledgeRepository for KvKnowledgeRepository<S> {
    fn scan_knowledge(&self) -> RepoResult<RecordScan<Knowledge>> {
        scan_records(&self.store, RecordKind::Knowledge)
    }

    fn get_knowledge(&self, id: &RecordId) -> RepoResult<Option<Knowledge>> {
        load_record(&self.store, RecordKind::Knowledge, id)
    }

    fn save_knowledge(&self, knowledge: &Knowledge) -> RepoResult<()> {
        knowledge.validate()?;
        store_record(&self.store, RecordKind::Knowledge, &knowledge.id, knowledge)
    }

    fn delete_knowledge(&self, id: &RecordId) -> RepoResult<()> {
        remove_record(&self.store, RecordKind::Knowledge, id)
    }
}
