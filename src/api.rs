//! Public API surface for the timetable backend.
//!
//! This file consolidates the identifier newtypes and directory records
//! shared by the store, the scheduling engine, and the HTTP layer.
//! All types derive Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};

use crate::models::Weekday;

/// Timetable entry identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntryId(pub i64);

/// Class (student cohort) identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClassId(pub i64);

/// Teacher identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TeacherId(pub i64);

/// Subject identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SubjectId(pub i64);

impl EntryId {
    pub fn new(value: i64) -> Self {
        EntryId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ClassId {
    pub fn new(value: i64) -> Self {
        ClassId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TeacherId {
    pub fn new(value: i64) -> Self {
        TeacherId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl SubjectId {
    pub fn new(value: i64) -> Self {
        SubjectId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A student cohort that occupies timetable periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: ClassId,
    pub name: String,
}

/// A teacher delivering timetable periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}

/// A subject taught during timetable periods.
///
/// Informational only as far as scheduling is concerned; the conflict
/// detector never examines it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

/// Filter for timetable listings. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub class_id: Option<ClassId>,
    pub teacher_id: Option<TeacherId>,
    pub day: Option<Weekday>,
}

impl EntryFilter {
    /// Filter matching every stored entry.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_class(class_id: ClassId) -> Self {
        Self {
            class_id: Some(class_id),
            ..Self::default()
        }
    }

    pub fn for_teacher(teacher_id: TeacherId) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            ..Self::default()
        }
    }

    pub fn on_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }
}
