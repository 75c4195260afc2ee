//! Derived open/closed status of a location.
//!
//! The status is computed on every read and never stored. An administrative
//! [`LocationStatus`] other than `active` always wins over the hours table.

use std::fmt;

use chrono::{
    Datelike,
    NaiveDateTime,
};
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};

use super::hours::{
    DayHours,
    TimeOfDay,
};
use super::profile::{
    LocationOperatingProfile,
    LocationStatus,
};

/// Status of a location at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingStatus {
    Open,
    Closed,
    LunchBreak,
    /// Non-active lifecycle status of the document.
    Administrative(LocationStatus),
}

impl OperatingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::LunchBreak => "lunch-break",
            Self::Administrative(status) => status.as_str(),
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Translation key of the label shown for this status.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Open | Self::Administrative(LocationStatus::Active) => "locations.status.open",
            Self::Closed => "locations.status.closed",
            Self::LunchBreak => "locations.status.lunchBreak",
            Self::Administrative(LocationStatus::Inactive) => "locations.status.inactive",
            Self::Administrative(LocationStatus::TemporarilyClosed) => "locations.status.temporarilyClosed",
            Self::Administrative(LocationStatus::PermanentlyClosed) => "locations.status.permanentlyClosed",
            Self::Administrative(LocationStatus::Relocated) => "locations.status.relocated",
        }
    }
}

impl fmt::Display for OperatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OperatingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How hours with `close` earlier than `open` are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvernightPolicy {
    /// Open from `open` until `close` on the next morning. The early hours
    /// count against the previous day's entry.
    #[default]
    Wrap,
    /// Plain range check; overnight hours never match.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusOptions {
    /// Treat a closed holiday on the evaluated date as closed.
    pub honor_holidays: bool,
    pub overnight: OvernightPolicy,
}

/// Computes the status of `profile` at local time `now`.
#[must_use]
pub fn current_operating_status(
    profile: &LocationOperatingProfile,
    now: NaiveDateTime,
    options: StatusOptions,
) -> OperatingStatus {
    if profile.status != LocationStatus::Active {
        return OperatingStatus::Administrative(profile.status);
    }

    if options.honor_holidays
        && profile.holidays.iter().any(|holiday| holiday.is_closed && holiday.date == now.date())
    {
        return OperatingStatus::Closed;
    }

    let time = TimeOfDay::from(now.time());
    let today = profile.weekly_hours.day(now.weekday());
    let carried_over = carries_over(
        profile.weekly_hours.day(now.weekday().pred()),
        time,
        options.overnight,
    );

    if today.is_closed {
        return if carried_over { OperatingStatus::Open } else { OperatingStatus::Closed };
    }

    let lunch = &profile.lunch_break;
    if lunch.has_lunch_break && time.within(lunch.start, lunch.end) {
        return OperatingStatus::LunchBreak;
    }

    if carried_over || within_hours(today, time, options.overnight) {
        OperatingStatus::Open
    } else {
        OperatingStatus::Closed
    }
}

/// Whether `time` falls in the part of today's hours that starts today.
/// The early hours of an overnight shift belong to the previous day.
fn within_hours(hours: &DayHours, time: TimeOfDay, overnight: OvernightPolicy) -> bool {
    match overnight {
        OvernightPolicy::Wrap if hours.is_overnight() => time >= hours.open,
        _ => time.within(hours.open, hours.close),
    }
}

/// Whether the previous day's overnight shift is still running at `time`.
fn carries_over(previous: &DayHours, time: TimeOfDay, overnight: OvernightPolicy) -> bool {
    overnight == OvernightPolicy::Wrap
        && !previous.is_closed
        && previous.is_overnight()
        && time <= previous.close
}
