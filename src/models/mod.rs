//! Domain models for the timetable engine.
//!
//! - [`time`]: day-of-week convention, time-of-day values, and half-open
//!   time slots with overlap testing
//! - [`entry`]: timetable entry records and the partial-update patch type

pub mod entry;
pub mod time;

pub use entry::{EntryFields, EntryPatch, ScheduleEntry};
pub use time::{TimeError, TimeOfDay, TimeSlot, Weekday};

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
