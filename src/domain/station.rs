//! Map-marker projection of a monitoring station.

use serde::Serialize;

/// Minimal station record for map rendering, sourced from a live bounds
/// query. Stations without a usable AQI value are dropped at the adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
    pub aqi: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}
