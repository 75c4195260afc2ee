//! Service locations and their operating status.

pub mod document;
pub mod hours;
pub mod profile;
pub mod status;

pub use document::{
    GeoPoint,
    Location,
    LocationDirectory,
    LocationError,
    Review,
};
pub use hours::{
    DayHours,
    Holiday,
    LunchBreak,
    TimeError,
    TimeOfDay,
    WeeklyHours,
};
pub use profile::{
    LocationOperatingProfile,
    LocationStatus,
};
pub use status::{
    OperatingStatus,
    OvernightPolicy,
    StatusOptions,
    current_operating_status,
};
