//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into tracker use-cases.
//! - Keep callers decoupled from storage layout and codec details.
//!
//! # Invariants
//! - Validation failures abort before any storage write.
//! - Storage failures are logged here and surfaced unchanged; callers
//!   show `ServiceError::user_message()`.

use crate::model::id::RecordId;
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod job_service;
pub mod knowledge_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

const RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected; nothing was written.
    Validation(ValidationError),
    /// Target record does not exist.
    NotFound(RecordId),
    /// Storage or codec failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::NotFound(_) => "This item no longer exists.".to_string(),
            Self::Repo(_) => RETRY_MESSAGE.to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
            Self::Repo(RepoError::Codec(_)) => "decode_failed",
            Self::Repo(_) => "store_failed",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Logs the outcome of one use-case without record content.
fn log_outcome<T>(event: &str, result: &ServiceResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok"),
        Err(ServiceError::Repo(err)) => error!(
            "event={event} module=service status=error error_code={} error={err}",
            result_code(result)
        ),
        Err(_) => warn!(
            "event={event} module=service status=error error_code={}",
            result_code(result)
        ),
    }
}

fn result_code<T>(result: &ServiceResult<T>) -> &'static str {
    result.as_ref().err().map_or("none", ServiceError::error_code)
}
