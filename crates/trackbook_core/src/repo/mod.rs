//! Repository layer over the flat key/value store.
//!
//! # Responsibility
//! - Map records to `<prefix><id>` keys and JSON values.
//! - Keep storage key layout and codec details out of services.
//!
//! # Invariants
//! - Writes validate the record before touching the store.
//! - Every write re-serializes the whole record and overwrites its key.
//! - Undecodable values are skipped by scans and reported, never repaired.

use crate::codec::{self, CodecError};
use crate::model::id::{RecordId, RecordKind};
use crate::model::validation::ValidationError;
use crate::store::{KeyValueStore, StoreError};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod job_repo;
pub mod knowledge_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(StoreError),
    Codec(CodecError),
    NotFound(RecordId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CodecError> for RepoError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Result of a prefix scan: decodable records plus keys that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordScan<T> {
    /// Records in store iteration order.
    pub records: Vec<T>,
    /// Keys whose values failed to decode.
    pub corrupt_keys: Vec<String>,
}

impl<T> Default for RecordScan<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            corrupt_keys: Vec::new(),
        }
    }
}

fn scan_records<S, T>(store: &S, kind: RecordKind) -> RepoResult<RecordScan<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let listing = store.list(kind.key_prefix())?;
    let mut scan = RecordScan::default();
    for key in listing.keys {
        // A key removed between `list` and `get` is simply gone.
        let Some(stored) = store.get(&key)? else {
            continue;
        };
        match codec::decode::<T>(&key, &stored.value) {
            Ok(record) => scan.records.push(record),
            Err(err) => {
                warn!(
                    "event=record_decode module=repo status=error prefix={} error_code=decode_failed error={}",
                    kind.key_prefix(),
                    err
                );
                scan.corrupt_keys.push(key);
            }
        }
    }
    Ok(scan)
}

fn load_record<S, T>(store: &S, kind: RecordKind, id: &RecordId) -> RepoResult<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let key = id.storage_key(kind);
    match store.get(&key)? {
        Some(stored) => Ok(Some(codec::decode(&key, &stored.value)?)),
        None => Ok(None),
    }
}

fn store_record<S, T>(store: &S, kind: RecordKind, id: &RecordId, record: &T) -> RepoResult<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let raw = codec::encode(record)?;
    store.set(&id.storage_key(kind), &raw)?;
    Ok(())
}

fn remove_record<S: KeyValueStore>(store: &S, kind: RecordKind, id: &RecordId) -> RepoResult<()> {
    store.delete(&id.storage_key(kind))?;
    Ok(())
}
