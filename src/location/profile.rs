//! Operating profile of a location document.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use super::hours::{
    Holiday,
    LunchBreak,
    WeeklyHours,
};

/// Administrative lifecycle flag, independent of daily hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationStatus {
    #[default]
    Active,
    Inactive,
    TemporarilyClosed,
    PermanentlyClosed,
    Relocated,
}

impl LocationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::TemporarilyClosed => "temporarily-closed",
            Self::PermanentlyClosed => "permanently-closed",
            Self::Relocated => "relocated",
        }
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of a location document that drives its open/closed status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationOperatingProfile {
    pub weekly_hours: WeeklyHours,
    #[serde(default)]
    pub lunch_break: LunchBreak,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub status: LocationStatus,
}

impl LocationOperatingProfile {
    #[must_use]
    pub fn new(weekly_hours: WeeklyHours) -> Self {
        Self {
            weekly_hours,
            lunch_break: LunchBreak::none(),
            holidays: Vec::new(),
            status: LocationStatus::Active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("\"active\"", LocationStatus::Active)]
    #[case("\"temporarily-closed\"", LocationStatus::TemporarilyClosed)]
    #[case("\"permanently-closed\"", LocationStatus::PermanentlyClosed)]
    #[case("\"relocated\"", LocationStatus::Relocated)]
    fn status_uses_kebab_case(#[case] json: &str, #[case] expected: LocationStatus) {
        let status: LocationStatus = serde_json::from_str(json).unwrap();

        assert_that!(status, eq(expected));
        assert_that!(format!("\"{status}\""), eq(json));
    }

    #[googletest::test]
    fn profile_deserializes_with_optional_sections() {
        let day = r#"{"open": "09:00", "close": "17:00"}"#;
        let json = format!(
            r#"{{"weeklyHours": {{"sunday": {{"open": "00:00", "close": "00:00", "isClosed": true}},
                "monday": {day}, "tuesday": {day}, "wednesday": {day},
                "thursday": {day}, "friday": {day}, "saturday": {day}}}}}"#
        );

        let profile: LocationOperatingProfile = serde_json::from_str(&json).unwrap();

        expect_that!(profile.status, eq(LocationStatus::Active));
        expect_that!(profile.lunch_break.has_lunch_break, eq(false));
        expect_that!(profile.holidays, is_empty());
        expect_that!(profile.weekly_hours.sunday.is_closed, eq(true));
    }
}
