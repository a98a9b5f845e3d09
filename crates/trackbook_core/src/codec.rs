//! JSON text codec for stored records.
//!
//! Decoding is field-order independent; unknown fields are ignored so
//! values written by newer versions still load.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Stored value could not be converted to or from a record.
#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode record: {err}"),
            Self::Decode { key, source } => {
                write!(f, "failed to decode value at `{key}`: {source}")
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Serializes a record to its stored text form.
pub fn encode<T: Serialize>(record: &T) -> CodecResult<String> {
    serde_json::to_string(record).map_err(CodecError::Encode)
}

/// Parses the stored text at `key` into a record.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> CodecResult<T> {
    serde_json::from_str(raw).map_err(|source| CodecError::Decode {
        key: key.to_string(),
        source,
    })
}
