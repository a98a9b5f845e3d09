//! Knowledge base use-case service.
//!
//! # Invariants
//! - `update` is a full overwrite; no history is kept.
//! - URLs are validated before any write.

use crate::clock::{Clock, SystemClock};
use crate::model::id::{RecordId, RecordKind};
use crate::model::knowledge::{Knowledge, KnowledgeDraft};
use crate::query::knowledge_filter::{self, KnowledgeFilter};
use crate::repo::knowledge_repo::KnowledgeRepository;
use crate::repo::RecordScan;
use crate::service::{log_outcome, ServiceError, ServiceResult};

/// Knowledge service facade over repository implementations.
pub struct KnowledgeService<R: KnowledgeRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: KnowledgeRepository> KnowledgeService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: KnowledgeRepository, C: Clock> KnowledgeService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn list(&self) -> ServiceResult<Vec<Knowledge>> {
        Ok(self.repo.list_knowledge()?)
    }

    pub fn scan(&self) -> ServiceResult<RecordScan<Knowledge>> {
        Ok(self.repo.scan_knowledge()?)
    }

    pub fn get(&self, id: &RecordId) -> ServiceResult<Option<Knowledge>> {
        Ok(self.repo.get_knowledge(id)?)
    }

    /// Creates an entry; tags are trimmed and deduplicated.
    pub fn create(&self, draft: KnowledgeDraft) -> ServiceResult<Knowledge> {
        let id = RecordId::generate(RecordKind::Knowledge, self.clock.now());
        let knowledge = Knowledge::from_draft(id, draft);
        let result = self
            .repo
            .save_knowledge(&knowledge)
            .map(|()| knowledge)
            .map_err(ServiceError::from);
        log_outcome("knowledge_create", &result);
        result
    }

    /// Overwrites every editable field of an existing entry.
    pub fn update(&self, id: &RecordId, draft: KnowledgeDraft) -> ServiceResult<Knowledge> {
        let result = self.update_inner(id, draft);
        log_outcome("knowledge_update", &result);
        result
    }

    fn update_inner(&self, id: &RecordId, draft: KnowledgeDraft) -> ServiceResult<Knowledge> {
        if self.repo.get_knowledge(id)?.is_none() {
            return Err(ServiceError::NotFound(id.clone()));
        }
        let knowledge = Knowledge::from_draft(id.clone(), draft);
        self.repo.save_knowledge(&knowledge)?;
        Ok(knowledge)
    }

    /// Removes an entry; deleting an absent id succeeds.
    pub fn delete(&self, id: &RecordId) -> ServiceResult<()> {
        let result = self.repo.delete_knowledge(id).map_err(ServiceError::from);
        log_outcome("knowledge_delete", &result);
        result
    }

    /// Entries matching `filter`, in store order.
    pub fn search(&self, filter: &KnowledgeFilter) -> ServiceResult<Vec<Knowledge>> {
        Ok(knowledge_filter::filter_knowledge(self.list()?, filter))
    }
}
