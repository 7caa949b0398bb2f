//! The schedule mutation orchestrator.
//!
//! [`TimetableService`] is the only entry point callers use to create,
//! update, or delete timetable entries. It owns the transaction boundary:
//! conflict check and persistence write execute as one atomic unit under a
//! write lock, so two concurrent proposals for the same slot can never both
//! observe "no conflict" and both commit.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::conflicts::ConflictDetector;
use super::error::{ScheduleError, ScheduleResult};
use crate::api::{EntryFilter, EntryId};
use crate::db::repository::FullRepository;
use crate::models::{EntryFields, EntryPatch, ScheduleEntry};

/// Authorization decision for timetable edits.
///
/// The surrounding layer (HTTP, CLI, tests) decides whether the caller may
/// mutate the schedule and passes the verdict in explicitly; the engine
/// itself holds no session or role state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditAccess {
    granted: bool,
}

impl EditAccess {
    /// The caller may mutate the timetable.
    pub fn granted() -> Self {
        Self { granted: true }
    }

    /// The caller may only read.
    pub fn denied() -> Self {
        Self { granted: false }
    }

    pub fn allows_edit(&self) -> bool {
        self.granted
    }
}

/// The transactional entry point for all timetable mutations.
pub struct TimetableService {
    repo: Arc<dyn FullRepository>,
    /// Serializes the check-then-write section of create/update/delete.
    /// A SQL-backed store would use a serializable transaction instead;
    /// for the in-process store a single writer lock gives the same
    /// guarantee: the conflict check's read-set cannot go stale before
    /// the write commits.
    write_lock: Mutex<()>,
}

impl TimetableService {
    pub fn new(repo: Arc<dyn FullRepository>) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    pub fn repository(&self) -> &Arc<dyn FullRepository> {
        &self.repo
    }

    /// Referenced class/teacher/subject must exist before the conflict
    /// check runs, so dangling references surface as `NotFound` rather
    /// than slipping through an empty conflict scan.
    async fn check_references(&self, fields: &EntryFields) -> ScheduleResult<()> {
        self.repo.get_class(fields.class_id).await?;
        self.repo.get_teacher(fields.teacher_id).await?;
        self.repo.get_subject(fields.subject_id).await?;
        Ok(())
    }

    /// Create a new timetable entry.
    ///
    /// Fails with `Forbidden` if `access` denies edits, `NotFound` if a
    /// referenced entity is absent, and `Conflict` if the proposed slot
    /// collides with an existing entry for the same teacher or class.
    pub async fn create_entry(
        &self,
        access: EditAccess,
        fields: EntryFields,
    ) -> ScheduleResult<ScheduleEntry> {
        if !access.allows_edit() {
            return Err(ScheduleError::Forbidden);
        }

        let _guard = self.write_lock.lock().await;

        self.check_references(&fields).await?;
        if let Some(report) = ConflictDetector::new(self.repo.as_ref())
            .check(&fields, None)
            .await?
        {
            debug!(conflict = %report, "rejected timetable entry");
            return Err(ScheduleError::Conflict(report));
        }

        let entry = self.repo.insert_entry(&fields).await?;
        info!(
            entry_id = entry.id.value(),
            day = %entry.slot.day(),
            "created timetable entry"
        );
        Ok(entry)
    }

    /// Update an existing entry from a partial patch.
    ///
    /// Unspecified fields retain their stored values; the conflict check
    /// runs against the fully merged entry with the entry itself excluded,
    /// so editing only the subject of a period never trips a self-conflict.
    pub async fn update_entry(
        &self,
        access: EditAccess,
        id: EntryId,
        patch: EntryPatch,
    ) -> ScheduleResult<ScheduleEntry> {
        if !access.allows_edit() {
            return Err(ScheduleError::Forbidden);
        }

        let _guard = self.write_lock.lock().await;

        let current = self.repo.get_entry(id).await?;
        let merged = patch.apply_to(&current)?;

        self.check_references(&merged).await?;
        if let Some(report) = ConflictDetector::new(self.repo.as_ref())
            .check(&merged, Some(id))
            .await?
        {
            debug!(entry_id = id.value(), conflict = %report, "rejected timetable update");
            return Err(ScheduleError::Conflict(report));
        }

        let entry = self.repo.update_entry(id, &merged).await?;
        info!(entry_id = id.value(), "updated timetable entry");
        Ok(entry)
    }

    /// Delete an entry. Removing an entry can never create a collision, so
    /// no conflict check runs; deleting an absent id is `NotFound`.
    pub async fn delete_entry(&self, access: EditAccess, id: EntryId) -> ScheduleResult<()> {
        if !access.allows_edit() {
            return Err(ScheduleError::Forbidden);
        }

        let _guard = self.write_lock.lock().await;

        self.repo.delete_entry(id).await?;
        info!(entry_id = id.value(), "deleted timetable entry");
        Ok(())
    }

    // ==================== Reads ====================

    pub async fn get_entry(&self, id: EntryId) -> ScheduleResult<ScheduleEntry> {
        Ok(self.repo.get_entry(id).await?)
    }

    pub async fn list_entries(&self, filter: &EntryFilter) -> ScheduleResult<Vec<ScheduleEntry>> {
        Ok(self.repo.list_entries(filter).await?)
    }
}
