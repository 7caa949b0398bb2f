use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Errors produced when constructing time model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("invalid time of day {0:?}: expected \"HH:MM:SS\"")]
    InvalidTime(String),

    #[error("day of week {0} is out of range 0..=6")]
    InvalidDay(u8),

    #[error("start time {start} is not before end time {end}")]
    EmptyRange { start: TimeOfDay, end: TimeOfDay },
}

/// Day of week for a recurring timetable slot.
///
/// Fixed convention: **Sunday = 0 through Saturday = 6**. The numeric form
/// is what the wire format and the store use everywhere; no other mapping
/// exists in this codebase.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// All weekdays in store order, Sunday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// English day name, capitalized.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Numeric form under the Sunday = 0 convention.
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Weekday {
    type Error = TimeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Weekday::Sunday),
            1 => Ok(Weekday::Monday),
            2 => Ok(Weekday::Tuesday),
            3 => Ok(Weekday::Wednesday),
            4 => Ok(Weekday::Thursday),
            5 => Ok(Weekday::Friday),
            6 => Ok(Weekday::Saturday),
            other => Err(TimeError::InvalidDay(other)),
        }
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day as u8
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Naive time of day with seconds precision.
///
/// No date, no timezone. Exchanged on the wire as a literal `"HH:MM:SS"`
/// string; ordering is plain (hour, minute, second) comparison.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse from the wire form `"HH:MM:SS"`.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .map(TimeOfDay)
            .map_err(|_| TimeError::InvalidTime(s.to_string()))
    }

    /// Build from an (hour, minute, second) triple.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(TimeOfDay)
    }

    /// Build from seconds since midnight.
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).map(TimeOfDay)
    }

    /// Short `"HH:MM"` form used in conflict messages.
    pub fn short(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}

#[derive(Deserialize)]
struct TimeSlotWire {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

/// A half-open `[start, end)` time range on a specific weekday.
///
/// The constructor enforces `start < end`, so an empty or inverted range is
/// unrepresentable past this point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotWire")]
pub struct TimeSlot {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeSlot {
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self, TimeError> {
        if start >= end {
            return Err(TimeError::EmptyRange { start, end });
        }
        Ok(TimeSlot { day, start, end })
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// True iff both slots fall on the same weekday and their half-open
    /// ranges share at least one instant.
    ///
    /// Back-to-back slots that merely touch at a boundary (one ends at
    /// 10:00:00, the next starts at 10:00:00) do not overlap. The test is
    /// symmetric and covers partial overlap from either side, containment,
    /// and identical ranges.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl TryFrom<TimeSlotWire> for TimeSlot {
    type Error = TimeError;

    fn try_from(wire: TimeSlotWire) -> Result<Self, Self::Error> {
        TimeSlot::new(wire.day, wire.start, wire.end)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}
