//! Directory repository trait for classes, teachers, and subjects.
//!
//! Timetable entries reference these records by id; conflict reports cite
//! them by name.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ClassId, SchoolClass, Subject, SubjectId, Teacher, TeacherId};

/// Repository trait for the school directory.
///
/// Create operations reject empty names with
/// `RepositoryError::ValidationError`; lookups of absent ids fail with
/// `RepositoryError::NotFound`.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    // ==================== Classes ====================

    async fn create_class(&self, name: &str) -> RepositoryResult<SchoolClass>;

    async fn get_class(&self, id: ClassId) -> RepositoryResult<SchoolClass>;

    async fn list_classes(&self) -> RepositoryResult<Vec<SchoolClass>>;

    // ==================== Teachers ====================

    async fn create_teacher(&self, name: &str) -> RepositoryResult<Teacher>;

    async fn get_teacher(&self, id: TeacherId) -> RepositoryResult<Teacher>;

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>>;

    // ==================== Subjects ====================

    async fn create_subject(&self, name: &str) -> RepositoryResult<Subject>;

    async fn get_subject(&self, id: SubjectId) -> RepositoryResult<Subject>;

    async fn list_subjects(&self) -> RepositoryResult<Vec<Subject>>;
}
