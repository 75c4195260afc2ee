//! Operating hours of a service location.

use std::fmt;
use std::str::FromStr;

use chrono::{
    NaiveDate,
    NaiveTime,
    Timelike,
    Weekday,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid time '{0}', expected zero-padded 24h \"HH:MM\"")]
    Format(String),
    #[error("Time '{0}' is out of range")]
    OutOfRange(String),
}

/// Time of day stored as minutes since midnight.
///
/// Written as zero-padded 24h `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    /// # Errors
    /// `OutOfRange` when `hour > 23` or `minute > 59`.
    pub fn new(hour: u16, minute: u16) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 {
            return Err(TimeError::OutOfRange(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self(hour * 60 + minute))
    }

    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Whether `self` lies in `[start, end]`, bounds included.
    #[must_use]
    pub fn within(self, start: Self, end: Self) -> bool {
        start <= self && self <= end
    }
}

impl From<NaiveTime> for TimeOfDay {
    #[allow(clippy::cast_possible_truncation)]
    fn from(time: NaiveTime) -> Self {
        // hour() < 24 and minute() < 60, so this fits in u16
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || TimeError::Format(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(format_error)?;
        if hour.len() != 2
            || minute.len() != 2
            || !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(format_error());
        }

        let hour: u16 = hour.parse().map_err(|_| format_error())?;
        let minute: u16 = minute.parse().map_err(|_| format_error())?;
        Self::new(hour, minute).map_err(|_| TimeError::OutOfRange(s.to_string()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Hours of a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    #[serde(default)]
    pub is_closed: bool,
}

impl DayHours {
    #[must_use]
    pub const fn new(open: TimeOfDay, close: TimeOfDay) -> Self {
        Self { open, close, is_closed: false }
    }

    /// A day the location does not open.
    #[must_use]
    pub const fn closed() -> Self {
        Self { open: TimeOfDay::MIDNIGHT, close: TimeOfDay::MIDNIGHT, is_closed: true }
    }

    /// `close` earlier than `open`, i.e. the hours run past midnight.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        self.close < self.open
    }
}

/// Hours for all seven days. Every day is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHours {
    pub sunday: DayHours,
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
}

impl WeeklyHours {
    /// Same hours on all days.
    #[must_use]
    pub const fn uniform(hours: DayHours) -> Self {
        Self {
            sunday: hours,
            monday: hours,
            tuesday: hours,
            wednesday: hours,
            thursday: hours,
            friday: hours,
            saturday: hours,
        }
    }

    #[must_use]
    pub const fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        }
    }

    pub const fn day_mut(&mut self, weekday: Weekday) -> &mut DayHours {
        match weekday {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchBreak {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default)]
    pub has_lunch_break: bool,
}

impl LunchBreak {
    #[must_use]
    pub const fn none() -> Self {
        Self { start: TimeOfDay::MIDNIGHT, end: TimeOfDay::MIDNIGHT, has_lunch_break: false }
    }
}

impl Default for LunchBreak {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default = "default_holiday_closed")]
    pub is_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

const fn default_holiday_closed() -> bool {
    true
}
