//! Geographic value objects shared across the domain.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A coordinate with a human-readable place name, as embedded in readings
/// and alerts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// South/west/north/east rectangle used to scope a map-area query, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// A city record from the search provider, ranked by population.
#[derive(Debug, Clone, Serialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub city: String,
    pub region: Option<String>,
    pub country: String,
    pub country_code: String,
    pub coordinates: Coordinates,
    pub population: Option<u64>,
}
