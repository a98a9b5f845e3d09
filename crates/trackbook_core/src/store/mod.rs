//! Flat key/value storage boundary.
//!
//! # Responsibility
//! - Define the `KeyValueStore` capability that repositories are built on.
//! - Ship in-process and SQLite-backed implementations.
//!
//! # Invariants
//! - `set` overwrites unconditionally; there is no compare-and-swap.
//! - `delete` is idempotent and never fails for an absent key.
//! - `list` order is backend iteration order and carries no meaning.
//! - No multi-key atomicity: `list` followed by per-key `get` may observe
//!   concurrent changes. Callers assume a single writer.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Backend-specific failure such as an exhausted quota.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One stored value with its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub key: String,
    pub value: String,
    /// Always `false`; values are private to the local profile.
    pub shared: bool,
}

impl StoredValue {
    fn private(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            shared: false,
        }
    }
}

/// Acknowledgement returned by `delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReceipt {
    pub key: String,
    /// Always `true`, including when the key did not exist.
    pub deleted: bool,
    pub shared: bool,
}

impl DeleteReceipt {
    fn for_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            deleted: true,
            shared: false,
        }
    }
}

/// Keys matching a prefix scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyListing {
    pub keys: Vec<String>,
    pub prefix: String,
    pub shared: bool,
}

/// Capability injected into repositories.
pub trait KeyValueStore {
    /// Returns `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<StoredValue>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<StoredValue>;
    fn delete(&self, key: &str) -> StoreResult<DeleteReceipt>;
    /// Linear scan returning every key that starts with `prefix`.
    fn list(&self, prefix: &str) -> StoreResult<KeyListing>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<StoredValue>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<StoredValue> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<DeleteReceipt> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str) -> StoreResult<KeyListing> {
        (**self).list(prefix)
    }
}
