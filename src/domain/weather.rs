//! Normalized weather observations and forecast rows.
//!
//! All temperatures are °C, wind speeds km/h, pressure hPa; conversions
//! happen in the adapters via [`crate::domain::units`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::aqi::AqiCategory;

/// Current conditions at a coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherData {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub wind_direction: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<f64>,
    pub visibility: u32,
    pub uv_index: f64,
    pub cloud_cover: u8,
    pub precipitation: f64,
    pub conditions: String,
    pub icon: String,
}

/// One day of the weather forecast for the supported deployment location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature: f64,
    pub dewpoint: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedPollutants {
    pub no2: f64,
    pub co: f64,
    pub o3: f64,
    pub so2: f64,
}

/// One day of the AQI prediction series.
#[derive(Debug, Clone, Serialize)]
pub struct AqiPrediction {
    pub date: String,
    pub aqi: f64,
    pub category: AqiCategory,
    pub quality: String,
    pub pollutants: PredictedPollutants,
    pub aerosol_index: f64,
}
