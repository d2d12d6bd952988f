//! Normalized air-quality readings, the common currency every adapter
//! produces and every downstream consumer reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::aqi::{self, AqiCategory};
use crate::domain::location::NamedLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollutantType {
    O3,
    No2,
    So2,
    Formaldehyde,
    Pm25,
    Pm10,
}

impl PollutantType {
    /// Reporting unit: mass concentration for particulates, ppb for gases.
    pub fn unit(&self) -> &'static str {
        match self {
            PollutantType::Pm25 | PollutantType::Pm10 => "µg/m³",
            _ => "ppb",
        }
    }

    /// Short lowercase code, matching the wire-format spelling.
    pub fn code(&self) -> &'static str {
        match self {
            PollutantType::O3 => "o3",
            PollutantType::No2 => "no2",
            PollutantType::So2 => "so2",
            PollutantType::Formaldehyde => "formaldehyde",
            PollutantType::Pm25 => "pm25",
            PollutantType::Pm10 => "pm10",
        }
    }
}

/// Which upstream network produced a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Tempo,
    Pandora,
    Openaq,
    Combined,
}

/// An aggregate AQI observation at a location.
#[derive(Debug, Clone, Serialize)]
pub struct AqiReading {
    pub value: f64,
    pub category: AqiCategory,
    pub primary_pollutant: PollutantType,
    pub timestamp: DateTime<Utc>,
    pub location: NamedLocation,
}

impl AqiReading {
    /// The category is always derived from the value here, never supplied by
    /// a caller, so the two can't drift apart.
    pub fn new(
        value: f64,
        primary_pollutant: PollutantType,
        timestamp: DateTime<Utc>,
        location: NamedLocation,
    ) -> Self {
        Self {
            value,
            category: aqi::classify(value),
            primary_pollutant,
            timestamp,
            location,
        }
    }
}

/// One pollutant's observation. `aqi` carries the provider's sub-index when
/// it reports one, otherwise the raw concentration is reused.
#[derive(Debug, Clone, Serialize)]
pub struct PollutantReading {
    #[serde(rename = "type")]
    pub kind: PollutantType,
    pub value: f64,
    pub unit: String,
    pub aqi: f64,
    pub timestamp: DateTime<Utc>,
}

/// The complete normalized current-conditions payload for a location.
/// `pollutants` may be a single-element list when the upstream only exposes
/// an aggregate index.
#[derive(Debug, Clone, Serialize)]
pub struct AirQualityData {
    pub aqi: AqiReading,
    pub pollutants: Vec<PollutantReading>,
    pub data_source: DataSource,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_category_follows_value() {
        let location = NamedLocation {
            name: "Test".to_string(),
            lat: 0.0,
            lon: 0.0,
        };
        let reading = AqiReading::new(165.0, PollutantType::Pm25, Utc::now(), location);
        assert_eq!(reading.category, AqiCategory::Unhealthy);
    }

    #[test]
    fn pollutant_units() {
        assert_eq!(PollutantType::Pm25.unit(), "µg/m³");
        assert_eq!(PollutantType::Pm10.unit(), "µg/m³");
        assert_eq!(PollutantType::O3.unit(), "ppb");
        assert_eq!(PollutantType::Formaldehyde.unit(), "ppb");
    }
}
