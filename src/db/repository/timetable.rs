//! Core timetable repository trait for CRUD operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ClassId, EntryFilter, EntryId, TeacherId};
use crate::models::{EntryFields, ScheduleEntry, Weekday};

/// Repository trait for timetable entry storage.
///
/// All operations are side-effecting only on success: a failed insert,
/// update or delete leaves the stored timetable exactly as it was. The
/// read-set returned by the day-scoped queries must be consistent with a
/// write that immediately follows within the caller's critical section;
/// SQL-backed implementations achieve this with a serializable transaction,
/// the in-memory backend with a single writer lock.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if unreachable but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Entry CRUD ====================

    /// Persist a new timetable entry and assign it a fresh id.
    ///
    /// # Returns
    /// * `Ok(ScheduleEntry)` - The stored entry including its assigned id
    /// * `Err(RepositoryError::NotFound)` - If the referenced class, teacher
    ///   or subject does not exist
    async fn insert_entry(&self, fields: &EntryFields) -> RepositoryResult<ScheduleEntry>;

    /// Replace the scheduling fields of an existing entry.
    ///
    /// The caller (the mutation orchestrator) merges partial updates before
    /// calling this, so the store always receives the full field set.
    ///
    /// # Returns
    /// * `Ok(ScheduleEntry)` - The updated entry
    /// * `Err(RepositoryError::NotFound)` - If `id` is absent, or a
    ///   referenced class/teacher/subject does not exist
    async fn update_entry(
        &self,
        id: EntryId,
        fields: &EntryFields,
    ) -> RepositoryResult<ScheduleEntry>;

    /// Delete an entry.
    ///
    /// Deletion is not idempotent: a second delete of the same id fails
    /// with `RepositoryError::NotFound`.
    async fn delete_entry(&self, id: EntryId) -> RepositoryResult<()>;

    /// Fetch a single entry by id.
    async fn get_entry(&self, id: EntryId) -> RepositoryResult<ScheduleEntry>;

    /// List entries matching the filter, in ascending id order.
    async fn list_entries(&self, filter: &EntryFilter) -> RepositoryResult<Vec<ScheduleEntry>>;

    // ==================== Day-scoped conflict queries ====================

    /// All entries for a teacher on a given weekday, ascending id order.
    ///
    /// `exclude` omits one entry from the result; the conflict detector uses
    /// it during updates so an entry never collides with itself.
    async fn entries_for_teacher_on_day(
        &self,
        teacher_id: TeacherId,
        day: Weekday,
        exclude: Option<EntryId>,
    ) -> RepositoryResult<Vec<ScheduleEntry>>;

    /// All entries for a class on a given weekday, ascending id order.
    async fn entries_for_class_on_day(
        &self,
        class_id: ClassId,
        day: Weekday,
        exclude: Option<EntryId>,
    ) -> RepositoryResult<Vec<ScheduleEntry>>;
}
