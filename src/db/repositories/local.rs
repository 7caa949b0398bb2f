//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory behind a single `RwLock`, giving fast, deterministic, isolated
//! execution.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{
    ClassId, EntryFilter, EntryId, SchoolClass, Subject, SubjectId, Teacher, TeacherId,
};
use crate::db::repository::{
    DirectoryRepository, ErrorContext, RepositoryError, RepositoryResult, TimetableRepository,
};
use crate::models::{EntryFields, ScheduleEntry, Weekday};

/// In-memory local repository.
///
/// Entries and directory records live in `BTreeMap`s keyed by id, so every
/// listing comes back in ascending id order without extra sorting. Ids are
/// handed out by monotonic counters and never reused, even after deletes.
///
/// # Example
/// ```
/// use sts_rust::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.entry_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    entries: BTreeMap<EntryId, ScheduleEntry>,
    classes: BTreeMap<ClassId, SchoolClass>,
    teachers: BTreeMap<TeacherId, Teacher>,
    subjects: BTreeMap<SubjectId, Subject>,

    // ID counters
    next_entry_id: i64,
    next_class_id: i64,
    next_teacher_id: i64,
    next_subject_id: i64,

    // Connection health (toggled by tests to simulate outages)
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            classes: BTreeMap::new(),
            teachers: BTreeMap::new(),
            subjects: BTreeMap::new(),
            next_entry_id: 1,
            next_class_id: 1,
            next_teacher_id: 1,
            next_subject_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    /// Every operation starts here; an "unhealthy" store behaves like a
    /// database whose connections dropped.
    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "store is unavailable",
                ErrorContext::new(operation),
            ))
        }
    }

    /// Dangling references are rejected before any write happens.
    fn check_references(&self, operation: &str, fields: &EntryFields) -> RepositoryResult<()> {
        if !self.classes.contains_key(&fields.class_id) {
            return Err(RepositoryError::not_found_with_context(
                format!("class {} does not exist", fields.class_id.value()),
                ErrorContext::new(operation)
                    .with_entity("class")
                    .with_entity_id(fields.class_id.value()),
            ));
        }
        if !self.teachers.contains_key(&fields.teacher_id) {
            return Err(RepositoryError::not_found_with_context(
                format!("teacher {} does not exist", fields.teacher_id.value()),
                ErrorContext::new(operation)
                    .with_entity("teacher")
                    .with_entity_id(fields.teacher_id.value()),
            ));
        }
        if !self.subjects.contains_key(&fields.subject_id) {
            return Err(RepositoryError::not_found_with_context(
                format!("subject {} does not exist", fields.subject_id.value()),
                ErrorContext::new(operation)
                    .with_entity("subject")
                    .with_entity_id(fields.subject_id.value()),
            ));
        }
        Ok(())
    }
}

fn entry_not_found(operation: &str, id: EntryId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("timetable entry {} does not exist", id.value()),
        ErrorContext::new(operation)
            .with_entity("entry")
            .with_entity_id(id.value()),
    )
}

fn validate_name(operation: &str, name: &str) -> RepositoryResult<()> {
    if name.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            "name must not be empty",
            ErrorContext::new(operation),
        ));
    }
    Ok(())
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. Id counters keep advancing so
    /// ids are never reused across a clear.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.entries.clear();
        data.classes.clear();
        data.teachers.clear();
        data.subjects.clear();
    }

    /// Get the number of timetable entries stored.
    pub fn entry_count(&self) -> usize {
        self.data.read().entries.len()
    }

    /// Check if an entry exists.
    pub fn has_entry(&self, id: EntryId) -> bool {
        self.data.read().entries.contains_key(&id)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimetableRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_entry(&self, fields: &EntryFields) -> RepositoryResult<ScheduleEntry> {
        let mut data = self.data.write();
        data.ensure_healthy("insert_entry")?;
        data.check_references("insert_entry", fields)?;

        let id = EntryId::new(data.next_entry_id);
        data.next_entry_id += 1;

        let entry = ScheduleEntry {
            id,
            class_id: fields.class_id,
            teacher_id: fields.teacher_id,
            subject_id: fields.subject_id,
            slot: fields.slot,
        };
        data.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn update_entry(
        &self,
        id: EntryId,
        fields: &EntryFields,
    ) -> RepositoryResult<ScheduleEntry> {
        let mut data = self.data.write();
        data.ensure_healthy("update_entry")?;
        if !data.entries.contains_key(&id) {
            return Err(entry_not_found("update_entry", id));
        }
        data.check_references("update_entry", fields)?;

        let entry = ScheduleEntry {
            id,
            class_id: fields.class_id,
            teacher_id: fields.teacher_id,
            subject_id: fields.subject_id,
            slot: fields.slot,
        };
        data.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn delete_entry(&self, id: EntryId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        data.ensure_healthy("delete_entry")?;
        match data.entries.remove(&id) {
            Some(_) => Ok(()),
            None => Err(entry_not_found("delete_entry", id)),
        }
    }

    async fn get_entry(&self, id: EntryId) -> RepositoryResult<ScheduleEntry> {
        let data = self.data.read();
        data.ensure_healthy("get_entry")?;
        data.entries
            .get(&id)
            .cloned()
            .ok_or_else(|| entry_not_found("get_entry", id))
    }

    async fn list_entries(&self, filter: &EntryFilter) -> RepositoryResult<Vec<ScheduleEntry>> {
        let data = self.data.read();
        data.ensure_healthy("list_entries")?;
        Ok(data
            .entries
            .values()
            .filter(|e| filter.class_id.is_none_or(|c| e.class_id == c))
            .filter(|e| filter.teacher_id.is_none_or(|t| e.teacher_id == t))
            .filter(|e| filter.day.is_none_or(|d| e.slot.day() == d))
            .cloned()
            .collect())
    }

    async fn entries_for_teacher_on_day(
        &self,
        teacher_id: TeacherId,
        day: Weekday,
        exclude: Option<EntryId>,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        let data = self.data.read();
        data.ensure_healthy("entries_for_teacher_on_day")?;
        Ok(data
            .entries
            .values()
            .filter(|e| e.teacher_id == teacher_id && e.slot.day() == day)
            .filter(|e| exclude != Some(e.id))
            .cloned()
            .collect())
    }

    async fn entries_for_class_on_day(
        &self,
        class_id: ClassId,
        day: Weekday,
        exclude: Option<EntryId>,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        let data = self.data.read();
        data.ensure_healthy("entries_for_class_on_day")?;
        Ok(data
            .entries
            .values()
            .filter(|e| e.class_id == class_id && e.slot.day() == day)
            .filter(|e| exclude != Some(e.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DirectoryRepository for LocalRepository {
    async fn create_class(&self, name: &str) -> RepositoryResult<SchoolClass> {
        validate_name("create_class", name)?;
        let mut data = self.data.write();
        data.ensure_healthy("create_class")?;
        let id = ClassId::new(data.next_class_id);
        data.next_class_id += 1;
        let class = SchoolClass {
            id,
            name: name.to_string(),
        };
        data.classes.insert(id, class.clone());
        Ok(class)
    }

    async fn get_class(&self, id: ClassId) -> RepositoryResult<SchoolClass> {
        let data = self.data.read();
        data.ensure_healthy("get_class")?;
        data.classes.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("class {} does not exist", id.value()),
                ErrorContext::new("get_class")
                    .with_entity("class")
                    .with_entity_id(id.value()),
            )
        })
    }

    async fn list_classes(&self) -> RepositoryResult<Vec<SchoolClass>> {
        let data = self.data.read();
        data.ensure_healthy("list_classes")?;
        Ok(data.classes.values().cloned().collect())
    }

    async fn create_teacher(&self, name: &str) -> RepositoryResult<Teacher> {
        validate_name("create_teacher", name)?;
        let mut data = self.data.write();
        data.ensure_healthy("create_teacher")?;
        let id = TeacherId::new(data.next_teacher_id);
        data.next_teacher_id += 1;
        let teacher = Teacher {
            id,
            name: name.to_string(),
        };
        data.teachers.insert(id, teacher.clone());
        Ok(teacher)
    }

    async fn get_teacher(&self, id: TeacherId) -> RepositoryResult<Teacher> {
        let data = self.data.read();
        data.ensure_healthy("get_teacher")?;
        data.teachers.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("teacher {} does not exist", id.value()),
                ErrorContext::new("get_teacher")
                    .with_entity("teacher")
                    .with_entity_id(id.value()),
            )
        })
    }

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>> {
        let data = self.data.read();
        data.ensure_healthy("list_teachers")?;
        Ok(data.teachers.values().cloned().collect())
    }

    async fn create_subject(&self, name: &str) -> RepositoryResult<Subject> {
        validate_name("create_subject", name)?;
        let mut data = self.data.write();
        data.ensure_healthy("create_subject")?;
        let id = SubjectId::new(data.next_subject_id);
        data.next_subject_id += 1;
        let subject = Subject {
            id,
            name: name.to_string(),
        };
        data.subjects.insert(id, subject.clone());
        Ok(subject)
    }

    async fn get_subject(&self, id: SubjectId) -> RepositoryResult<Subject> {
        let data = self.data.read();
        data.ensure_healthy("get_subject")?;
        data.subjects.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("subject {} does not exist", id.value()),
                ErrorContext::new("get_subject")
                    .with_entity("subject")
                    .with_entity_id(id.value()),
            )
        })
    }

    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>> {
        let data = self.data.read();
        data.ensure_healthy("list_subjects")?;
        Ok(data.subjects.values().cloned().collect())
    }
}
