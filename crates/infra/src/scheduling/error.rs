//! Scheduler error types

use bookslot_domain::BookslotError;
use thiserror::Error;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// Failed to create scheduler
    #[error("Failed to create scheduler: {0}")]
    CreationFailed(String),

    /// Failed to start scheduler
    #[error("Failed to start scheduler: {0}")]
    StartFailed(String),

    /// Failed to stop scheduler
    #[error("Failed to stop scheduler: {0}")]
    StopFailed(String),

    /// Failed to register job
    #[error("Failed to register job: {0}")]
    JobRegistrationFailed(String),

    /// Operation timed out
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl From<SchedulerError> for BookslotError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::JobRegistrationFailed(_) => {
                BookslotError::ReminderSchedule(err.to_string())
            }
            _ => BookslotError::Internal(err.to_string()),
        }
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
