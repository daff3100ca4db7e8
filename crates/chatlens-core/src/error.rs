//! Error types module
//!
//! All errors surfaced by the upload lifecycle engine are unified under the
//! `LifecycleError` enum. Errors from synchronous coordinator calls propagate
//! directly to the caller; failures inside the asynchronous processing engine
//! are recorded on the upload record as a terminal `Failed` status and are
//! observable only through subsequent status/result queries.

use uuid::Uuid;

use crate::models::UploadStatus;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Bad intake parameters. Caller's fault, not retryable.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing id, wrong tenant, or already deleted. Deliberately uniform so
    /// callers can never distinguish "does not exist" from "belongs to
    /// another tenant".
    #[error("Upload not found")]
    NotFound,

    /// Id collision on insert. Should not occur in practice with v4 ids;
    /// treated as fatal to the operation.
    #[error("Duplicate upload id: {0}")]
    DuplicateId(Uuid),

    /// Attempted state-machine violation. Internal programming error,
    /// surfaced rather than hidden.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: UploadStatus,
        to: UploadStatus,
    },

    /// The pluggable analysis step failed. Recorded into the upload as
    /// Failed with the captured message.
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl From<validator::ValidationErrors> for LifecycleError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LifecycleError::Validation(errors.to_string())
    }
}
