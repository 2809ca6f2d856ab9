//! Core data model: organization records and map coordinates.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers.
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Euclidean distance in degree space. Only meaningful for the
    /// service-area plausibility check, not as a real distance.
    pub fn degree_distance(&self, other: &Self) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }

    pub const fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(self.latitude + d_lat, self.longitude + d_lon)
    }
}

/// One service provider in the directory.
///
/// Records are created by the surrounding data layer and treated as
/// read-only here; only `distance_miles` is recomputed per location context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRecord {
    pub id: String,
    #[serde(alias = "organizationName")]
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub services_offered: String,
    #[serde(default)]
    pub cost_payment: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub crisis_service: bool,
    #[serde(default)]
    pub languages: String,
    #[serde(default)]
    pub special_notes: String,
    /// Miles from the viewer. Never persisted.
    #[serde(skip)]
    pub distance_miles: Option<f64>,
}

impl OrganizationRecord {
    /// Minimal record; remaining fields are empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            service_type: String::new(),
            address: String::new(),
            latitude: None,
            longitude: None,
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            hours: String::new(),
            services_offered: String::new(),
            cost_payment: String::new(),
            description: String::new(),
            crisis_service: false,
            languages: String::new(),
            special_notes: String::new(),
            distance_miles: None,
        }
    }

    /// Explicit coordinates, when both halves are present.
    pub const fn coordinates(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }

    /// Crisis-flagged or filed under Crisis Services; gets a wider pin ring.
    pub fn is_priority(&self) -> bool {
        self.crisis_service || self.category == Category::CrisisServices
    }
}
