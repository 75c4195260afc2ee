//! Location documents and their derived fields.

use chrono::{
    NaiveDate,
    NaiveDateTime,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use super::profile::LocationOperatingProfile;
use super::status::{
    OperatingStatus,
    StatusOptions,
    current_operating_status,
};

/// Mean earth radius used for distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

/// GeoJSON point, `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct GeoPoint {
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { coordinates: [longitude, latitude] }
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Great-circle distance in kilometres (haversine).
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let (lat1, lat2) = (self.latitude().to_radians(), other.latitude().to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.longitude() - self.longitude()).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A service centre, office or camp citizens can visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: Address,
    pub location: GeoPoint,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(flatten)]
    pub operating: LocationOperatingProfile,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Location {
    /// # Errors
    /// `InvalidRating` when the rating is outside `1..=5`.
    pub fn add_review(&mut self, review: Review) -> Result<(), LocationError> {
        if !(1..=5).contains(&review.rating) {
            return Err(LocationError::InvalidRating(review.rating));
        }
        self.reviews.push(review);
        Ok(())
    }

    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Mean rating rounded to one decimal, `None` without reviews.
    #[must_use]
    #[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|review| u32::from(review.rating)).sum();
        let mean = f64::from(total) / self.reviews.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }

    #[must_use]
    pub fn operating_status(&self, now: NaiveDateTime, options: StatusOptions) -> OperatingStatus {
        current_operating_status(&self.operating, now, options)
    }
}

/// In-memory collection of locations with geo lookups.
#[derive(Debug, Clone, Default)]
pub struct LocationDirectory {
    locations: Vec<Location>,
}

impl LocationDirectory {
    #[must_use]
    pub const fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Locations within `max_km` of `point`, nearest first.
    #[must_use]
    pub fn nearby(&self, point: &GeoPoint, max_km: f64) -> Vec<(&Location, f64)> {
        let mut found: Vec<_> = self
            .locations
            .iter()
            .map(|location| (location, location.location.distance_km(point)))
            .filter(|(_, distance)| *distance <= max_km)
            .collect();
        found.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        found
    }

    #[must_use]
    pub fn find_open(&self, now: NaiveDateTime, options: StatusOptions) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|location| location.operating_status(now, options).is_open())
            .collect()
    }
}
