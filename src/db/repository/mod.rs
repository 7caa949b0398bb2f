//! Repository trait definitions for database operations.
//!
//! The store is split across two focused traits so that implementations and
//! call sites stay narrow:
//!
//! - [`timetable`]: CRUD and day-scoped queries for timetable entries
//! - [`directory`]: the class/teacher/subject records entries reference
//! - [`error`]: error types shared by all repository operations
//!
//! A complete backend implements both traits; the [`FullRepository`] bound
//! is implemented automatically for any type that does.

pub mod directory;
pub mod error;
pub mod timetable;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export traits
pub use directory::DirectoryRepository;
pub use timetable::TimetableRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Use this as the bound (or trait object) whenever a component needs both
/// the timetable entries and the directory the conflict reports draw their
/// names from.
pub trait FullRepository: TimetableRepository + DirectoryRepository {}

// Blanket implementation: both traits together make a full repository.
impl<T> FullRepository for T where T: TimetableRepository + DirectoryRepository {}
