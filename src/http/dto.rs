//! Data Transfer Objects for the HTTP API.
//!
//! Request DTOs use optional fields so that missing input surfaces as a 400
//! validation error with a field name, not a serde rejection. Time-of-day
//! fields travel as literal `"HH:MM:SS"` strings and are parsed (and
//! rejected) before any comparison happens.

use serde::{Deserialize, Serialize};

use crate::api::{ClassId, SubjectId, TeacherId};
use crate::models::{EntryFields, EntryPatch, ScheduleEntry, TimeOfDay, TimeSlot, Weekday};
use crate::scheduler::ScheduleError;

fn require<T>(field: Option<T>, name: &str) -> Result<T, ScheduleError> {
    field.ok_or_else(|| ScheduleError::Validation(format!("missing required field '{name}'")))
}

fn parse_day(value: u8) -> Result<Weekday, ScheduleError> {
    Weekday::try_from(value).map_err(|e| ScheduleError::Validation(e.to_string()))
}

fn parse_time(value: &str, name: &str) -> Result<TimeOfDay, ScheduleError> {
    TimeOfDay::parse(value)
        .map_err(|e| ScheduleError::Validation(format!("field '{name}': {e}")))
}

/// Request body for creating a timetable entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub subject_id: Option<i64>,
    /// Day of week, Sunday = 0 through Saturday = 6
    pub day_of_week: Option<u8>,
    /// "HH:MM:SS"
    pub start_time: Option<String>,
    /// "HH:MM:SS"
    pub end_time: Option<String>,
}

impl CreateEntryRequest {
    /// Validate shape and convert into the engine's field set.
    pub fn into_fields(self) -> Result<EntryFields, ScheduleError> {
        let class_id = ClassId::new(require(self.class_id, "class_id")?);
        let teacher_id = TeacherId::new(require(self.teacher_id, "teacher_id")?);
        let subject_id = SubjectId::new(require(self.subject_id, "subject_id")?);
        let day = parse_day(require(self.day_of_week, "day_of_week")?)?;
        let start = parse_time(&require(self.start_time, "start_time")?, "start_time")?;
        let end = parse_time(&require(self.end_time, "end_time")?, "end_time")?;

        Ok(EntryFields {
            class_id,
            teacher_id,
            subject_id,
            slot: TimeSlot::new(day, start, end)?,
        })
    }
}

/// Request body for partially updating a timetable entry.
///
/// Absent fields retain their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl UpdateEntryRequest {
    pub fn into_patch(self) -> Result<EntryPatch, ScheduleError> {
        Ok(EntryPatch {
            class_id: self.class_id.map(ClassId::new),
            teacher_id: self.teacher_id.map(TeacherId::new),
            subject_id: self.subject_id.map(SubjectId::new),
            day: self.day_of_week.map(parse_day).transpose()?,
            start: self
                .start_time
                .as_deref()
                .map(|s| parse_time(s, "start_time"))
                .transpose()?,
            end: self
                .end_time
                .as_deref()
                .map(|s| parse_time(s, "end_time"))
                .transpose()?,
        })
    }
}

/// Timetable entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDto {
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    /// Day of week, Sunday = 0 through Saturday = 6
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl From<ScheduleEntry> for EntryDto {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: entry.id.value(),
            class_id: entry.class_id.value(),
            teacher_id: entry.teacher_id.value(),
            subject_id: entry.subject_id.value(),
            day_of_week: entry.slot.day().number(),
            start_time: entry.slot.start().to_string(),
            end_time: entry.slot.end().to_string(),
        }
    }
}

/// Query parameters for timetable listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimetableQuery {
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    /// Day of week, Sunday = 0 through Saturday = 6
    #[serde(default)]
    pub day: Option<u8>,
}

/// Timetable list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableListResponse {
    pub entries: Vec<EntryDto>,
    pub total: usize,
}

/// Request body for creating a directory record (class, teacher, subject).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNameRequest {
    pub name: Option<String>,
}

impl CreateNameRequest {
    pub fn into_name(self) -> Result<String, ScheduleError> {
        let name = require(self.name, "name")?;
        if name.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "field 'name' must not be empty".to_string(),
            ));
        }
        Ok(name)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}
