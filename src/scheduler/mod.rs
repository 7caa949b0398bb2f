//! The scheduling engine: conflict detection and mutation orchestration.
//!
//! Callers never write to the store directly; every create/update/delete of
//! a timetable entry goes through [`TimetableService`], which validates the
//! proposed entry, runs the [`ConflictDetector`] against the store's current
//! state, and commits the write only if the slot is clear.

pub mod conflicts;
pub mod error;
pub mod service;

pub use conflicts::{ConflictDetector, ConflictReport};
pub use error::{ScheduleError, ScheduleResult};
pub use service::{EditAccess, TimetableService};

#[cfg(test)]
mod tests;
