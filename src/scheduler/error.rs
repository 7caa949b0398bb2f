//! Error taxonomy for the scheduling engine.

use super::conflicts::ConflictReport;
use crate::db::repository::RepositoryError;
use crate::models::TimeError;

/// Result type for scheduling engine operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors returned by the mutation orchestrator.
///
/// - `Validation`: malformed or missing input; the caller must fix the
///   request, retrying as-is will never succeed
/// - `NotFound`: a referenced class/teacher/subject/entry is absent
/// - `Conflict`: semantically valid request colliding with existing state;
///   the caller resolves it by picking a different slot
/// - `Forbidden`: the caller's authorization decision denies timetable edits
/// - `StoreUnavailable`: transient infrastructure failure; safe to retry the
///   whole call since no partial writes survive a failure
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("schedule conflict: {0}")]
    Conflict(ConflictReport),

    #[error("caller is not permitted to modify the timetable")]
    Forbidden,

    #[error("schedule store unavailable: {0}")]
    StoreUnavailable(#[source] RepositoryError),

    #[error(transparent)]
    Store(RepositoryError),
}

impl From<RepositoryError> for ScheduleError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { message, .. } => ScheduleError::NotFound(message),
            RepositoryError::ValidationError { message, .. } => ScheduleError::Validation(message),
            err if err.is_retryable() => ScheduleError::StoreUnavailable(err),
            err => ScheduleError::Store(err),
        }
    }
}

impl From<TimeError> for ScheduleError {
    fn from(err: TimeError) -> Self {
        ScheduleError::Validation(err.to_string())
    }
}
