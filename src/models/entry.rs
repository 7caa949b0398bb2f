use serde::{Deserialize, Serialize};

use super::time::{TimeError, TimeOfDay, TimeSlot, Weekday};
use crate::api::{ClassId, EntryId, SubjectId, TeacherId};

/// One recurring weekly class period.
///
/// Ties a class, a teacher and a subject to a [`TimeSlot`]. The id is
/// assigned by the store at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub class_id: ClassId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub slot: TimeSlot,
}

impl ScheduleEntry {
    /// The scheduling fields of this entry, without its identity.
    pub fn fields(&self) -> EntryFields {
        EntryFields {
            class_id: self.class_id,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            slot: self.slot,
        }
    }
}

/// The scheduling fields of an entry, without its identity.
///
/// This is the shape the orchestrator validates and the conflict detector
/// examines; the store assigns the id on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub class_id: ClassId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub slot: TimeSlot,
}

/// Partial update to a timetable entry. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub class_id: Option<ClassId>,
    pub teacher_id: Option<TeacherId>,
    pub subject_id: Option<SubjectId>,
    pub day: Option<Weekday>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.class_id.is_none()
            && self.teacher_id.is_none()
            && self.subject_id.is_none()
            && self.day.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    /// Merge this patch over an existing entry.
    ///
    /// Unspecified fields retain their stored values; the merged time range
    /// is re-validated, so a patch that moves only `start` past the stored
    /// `end` is rejected.
    pub fn apply_to(&self, current: &ScheduleEntry) -> Result<EntryFields, TimeError> {
        let day = self.day.unwrap_or_else(|| current.slot.day());
        let start = self.start.unwrap_or_else(|| current.slot.start());
        let end = self.end.unwrap_or_else(|| current.slot.end());

        Ok(EntryFields {
            class_id: self.class_id.unwrap_or(current.class_id),
            teacher_id: self.teacher_id.unwrap_or(current.teacher_id),
            subject_id: self.subject_id.unwrap_or(current.subject_id),
            slot: TimeSlot::new(day, start, end)?,
        })
    }
}
