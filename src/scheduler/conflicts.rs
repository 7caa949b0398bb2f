//! Conflict detection for proposed timetable entries.
//!
//! A proposed entry collides when any stored entry with the same teacher or
//! the same class, on the same weekday, has an overlapping `[start, end)`
//! range. The detector is a pure decision function over the store's state:
//! it reads, it never writes, and it never swallows store errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::EntryId;
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{EntryFields, TimeOfDay};

/// A detected collision between a proposed entry and a stored one.
///
/// Carries the names an operator needs to resolve the clash; `details()`
/// renders the message the API returns in 409 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ConflictReport {
    /// The teacher is already booked during the proposed range.
    Teacher {
        entry_id: EntryId,
        class_name: String,
        subject_name: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// The class is already occupied during the proposed range.
    Class {
        entry_id: EntryId,
        teacher_name: String,
        subject_name: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

impl ConflictReport {
    /// Human-readable description used in API error bodies and logs.
    pub fn details(&self) -> String {
        match self {
            ConflictReport::Teacher {
                class_name,
                subject_name,
                start,
                end,
                ..
            } => format!(
                "Teacher already assigned to {} for {} from {} to {}",
                class_name,
                subject_name,
                start.short(),
                end.short()
            ),
            ConflictReport::Class {
                teacher_name,
                subject_name,
                start,
                end,
                ..
            } => format!(
                "Class already scheduled for {} with {} from {} to {}",
                subject_name,
                teacher_name,
                start.short(),
                end.short()
            ),
        }
    }

    /// Id of the stored entry the proposal collides with.
    pub fn conflicting_entry(&self) -> EntryId {
        match self {
            ConflictReport::Teacher { entry_id, .. } | ConflictReport::Class { entry_id, .. } => {
                *entry_id
            }
        }
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details())
    }
}

/// Pure conflict decision function over a repository.
pub struct ConflictDetector<'a> {
    repo: &'a dyn FullRepository,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(repo: &'a dyn FullRepository) -> Self {
        Self { repo }
    }

    /// Check a proposed entry against the store.
    ///
    /// Teacher scope is checked first, class scope only if the teacher is
    /// clear; when both would collide, only the teacher conflict surfaces.
    /// Every stored entry in the matching scope is tested against the
    /// proposed interval before concluding "clear". Pass `exclude` when
    /// updating so the entry being edited never conflicts with itself.
    pub async fn check(
        &self,
        proposed: &EntryFields,
        exclude: Option<EntryId>,
    ) -> Result<Option<ConflictReport>, RepositoryError> {
        let day = proposed.slot.day();

        let teacher_entries = self
            .repo
            .entries_for_teacher_on_day(proposed.teacher_id, day, exclude)
            .await?;
        if let Some(existing) = teacher_entries
            .iter()
            .find(|e| e.slot.overlaps(&proposed.slot))
        {
            let class = self.repo.get_class(existing.class_id).await?;
            let subject = self.repo.get_subject(existing.subject_id).await?;
            return Ok(Some(ConflictReport::Teacher {
                entry_id: existing.id,
                class_name: class.name,
                subject_name: subject.name,
                start: existing.slot.start(),
                end: existing.slot.end(),
            }));
        }

        let class_entries = self
            .repo
            .entries_for_class_on_day(proposed.class_id, day, exclude)
            .await?;
        if let Some(existing) = class_entries
            .iter()
            .find(|e| e.slot.overlaps(&proposed.slot))
        {
            let teacher = self.repo.get_teacher(existing.teacher_id).await?;
            let subject = self.repo.get_subject(existing.subject_id).await?;
            return Ok(Some(ConflictReport::Class {
                entry_id: existing.id,
                teacher_name: teacher.name,
                subject_name: subject.name,
                start: existing.slot.start(),
                end: existing.slot.end(),
            }));
        }

        Ok(None)
    }
}
