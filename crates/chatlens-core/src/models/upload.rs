use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::{LifecycleError, LifecycleResult};

/// Supported chat-transcript file formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Json,
    Csv,
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileType::Json => write!(f, "json"),
            FileType::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for FileType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(FileType::Json),
            "csv" => Ok(FileType::Csv),
            _ => Err(anyhow::anyhow!("Unsupported file type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl UploadStatus {
    /// Whether the upload can never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Failed)
    }

    /// Forward-only state machine:
    /// Pending -> Processing, Processing -> Processing (progress self-loop),
    /// Processing -> Completed | Failed, Pending -> Failed (cancellation).
    /// Terminal states have no outgoing transitions.
    pub fn can_transition_to(&self, next: UploadStatus) -> bool {
        match (self, next) {
            (UploadStatus::Pending, UploadStatus::Processing) => true,
            (UploadStatus::Pending, UploadStatus::Failed) => true,
            (UploadStatus::Processing, UploadStatus::Processing) => true,
            (UploadStatus::Processing, UploadStatus::Completed) => true,
            (UploadStatus::Processing, UploadStatus::Failed) => true,
            _ => false,
        }
    }
}

impl Display for UploadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStatus::Pending => write!(f, "pending"),
            UploadStatus::Processing => write!(f, "processing"),
            UploadStatus::Completed => write!(f, "completed"),
            UploadStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for UploadStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UploadStatus::Pending),
            "processing" => Ok(UploadStatus::Processing),
            "completed" => Ok(UploadStatus::Completed),
            "failed" => Ok(UploadStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid upload status: {}", s)),
        }
    }
}

/// One submitted chat-transcript file and its tracked processing lifecycle.
///
/// `id`, `tenant_id`, and the file metadata are immutable after creation.
/// `status` and `progress` are mutated only through the transition helpers
/// below, which enforce the forward-only state machine and progress
/// monotonicity. The record store applies them under its per-id lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: Uuid,
    pub tenant_id: String,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub status: UploadStatus,
    /// 0-100, monotonically non-decreasing until a terminal status. Frozen
    /// at 100 on Completed, frozen at its last value on Failed.
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub processing_started_at: Option<DateTime<Utc>>,
    pub processing_completed_at: Option<DateTime<Utc>>,
    /// Present only when status is Failed.
    pub error_message: Option<String>,
}

impl UploadRecord {
    pub fn new(tenant_id: impl Into<String>, intake: &NewUpload) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.into(),
            filename: intake.filename.clone(),
            file_type: intake.file_type,
            file_size: intake.file_size,
            status: UploadStatus::Pending,
            progress: 0,
            created_at: Utc::now(),
            processing_started_at: None,
            processing_completed_at: None,
            error_message: None,
        }
    }

    fn transition(&mut self, next: UploadStatus) -> LifecycleResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Pending -> Processing, stamping the processing start time. Unlike the
    /// progress self-loop this is only valid from Pending, so a dispatch
    /// cannot restart an already-running upload.
    pub fn begin_processing(&mut self) -> LifecycleResult<()> {
        if self.status != UploadStatus::Pending {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to: UploadStatus::Processing,
            });
        }
        self.status = UploadStatus::Processing;
        self.processing_started_at = Some(Utc::now());
        Ok(())
    }

    /// Processing self-loop. Progress may only move forward, and only while
    /// the upload is actually Processing.
    pub fn advance_progress(&mut self, progress: u8) -> LifecycleResult<()> {
        if self.status != UploadStatus::Processing {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to: UploadStatus::Processing,
            });
        }
        if progress < self.progress {
            return Err(LifecycleError::InvalidTransition {
                from: UploadStatus::Processing,
                to: UploadStatus::Processing,
            });
        }
        self.progress = progress.min(100);
        Ok(())
    }

    /// Processing -> Completed, freezing progress at 100.
    pub fn complete(&mut self) -> LifecycleResult<()> {
        self.transition(UploadStatus::Completed)?;
        self.progress = 100;
        self.processing_completed_at = Some(Utc::now());
        Ok(())
    }

    /// Pending | Processing -> Failed, freezing progress at its last value.
    pub fn fail(&mut self, message: impl Into<String>) -> LifecycleResult<()> {
        self.transition(UploadStatus::Failed)?;
        self.error_message = Some(message.into());
        Ok(())
    }
}

/// Intake metadata for one file, arriving as a batch of one or more per
/// submission call. The raw payload is decoded by the transport layer; the
/// engine only ever sees the decoded message records.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUpload {
    #[validate(length(min = 1, message = "filename must not be empty"))]
    pub filename: String,
    pub file_type: FileType,
    #[validate(range(min = 1, message = "file_size must be greater than zero"))]
    pub file_size: u64,
    pub messages: Vec<crate::models::ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadListQuery {
    pub status: Option<UploadStatus>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl Default for UploadListQuery {
    fn default() -> Self {
        Self {
            status: None,
            skip: Some(0),
            limit: Some(100),
        }
    }
}

/// Read-side view returned by status queries.
#[derive(Debug, Clone, Serialize)]
pub struct UploadStatusView {
    pub upload_id: Uuid,
    pub status: UploadStatus,
    pub progress: u8,
    pub processing_started_at: Option<DateTime<Utc>>,
    pub processing_completed_at: Option<DateTime<Utc>>,
}

impl From<&UploadRecord> for UploadStatusView {
    fn from(record: &UploadRecord) -> Self {
        Self {
            upload_id: record.id,
            status: record.status,
            progress: record.progress,
            processing_started_at: record.processing_started_at,
            processing_completed_at: record.processing_completed_at,
        }
    }
}
