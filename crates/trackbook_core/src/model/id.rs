//! Record identifiers and storage key layout.
//!
//! Ids look like `JOB1736087400000K3J9QX2ZA`: a type tag, the creation
//! instant in epoch milliseconds, then nine random base-36 characters.
//! Uniqueness is probabilistic and is not checked against stored keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Record family; decides id tag and storage key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Job,
    Knowledge,
}

impl RecordKind {
    /// Leading tag of generated ids.
    pub fn id_tag(self) -> &'static str {
        match self {
            Self::Job => "JOB",
            Self::Knowledge => "KNOW",
        }
    }

    /// Storage key prefix, including the trailing colon.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Job => "job:",
            Self::Knowledge => "knowledge:",
        }
    }
}

/// Stable record identifier; immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh id for `kind` stamped with `now`.
    pub fn generate(kind: RecordKind, now: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{}{}",
            kind.id_tag(),
            now.timestamp_millis(),
            random_suffix()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full storage key for this id, e.g. `job:JOB...`.
    pub fn storage_key(&self, kind: RecordKind) -> String {
        format!("{}{}", kind.key_prefix(), self.0)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

fn random_suffix() -> String {
    // The low 64 bits of a v4 UUID hold 62 random bits; nine base-36 digits
    // consume about 47 of them.
    let mut bits = Uuid::new_v4().as_u128() & u128::from(u64::MAX >> 2);
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| {
            let digit = (bits % 36) as usize;
            bits /= 36;
            char::from(BASE36_UPPER[digit])
        })
        .collect()
}
