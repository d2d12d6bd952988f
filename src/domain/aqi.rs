//! AQI categorization on the US EPA 0–500 scale.

use serde::{Deserialize, Serialize};

/// The six AQI health-risk tiers, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthySensitive,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];
}

/// Inclusive AQI range covered by one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiRange {
    pub min: f64,
    pub max: f64,
}

/// Maps an AQI value to its category.
///
/// Total over all inputs: negative values land in `Good`, anything above 300
/// is `Hazardous`. Never panics.
pub fn classify(aqi: f64) -> AqiCategory {
    if aqi <= 50.0 {
        AqiCategory::Good
    } else if aqi <= 100.0 {
        AqiCategory::Moderate
    } else if aqi <= 150.0 {
        AqiCategory::UnhealthySensitive
    } else if aqi <= 200.0 {
        AqiCategory::Unhealthy
    } else if aqi <= 300.0 {
        AqiCategory::VeryUnhealthy
    } else {
        AqiCategory::Hazardous
    }
}

/// Inverse of [`classify`]: the numeric range a category covers. The scale
/// is open-ended above 301 but reported as 301–500 for display.
pub fn range_of(category: AqiCategory) -> AqiRange {
    match category {
        AqiCategory::Good => AqiRange { min: 0.0, max: 50.0 },
        AqiCategory::Moderate => AqiRange { min: 51.0, max: 100.0 },
        AqiCategory::UnhealthySensitive => AqiRange { min: 101.0, max: 150.0 },
        AqiCategory::Unhealthy => AqiRange { min: 151.0, max: 200.0 },
        AqiCategory::VeryUnhealthy => AqiRange { min: 201.0, max: 300.0 },
        AqiCategory::Hazardous => AqiRange { min: 301.0, max: 500.0 },
    }
}
