//! Wildfire event-alert synthesis from raw fire detections.
//!
//! All detections in the search radius collapse into a single centroid and
//! one advisory. Distinct simultaneous fires are conflated on purpose; the
//! alert reports a count and an approximate distance, not per-fire detail.

use chrono::{DateTime, Duration, Utc};

use crate::domain::air_quality::PollutantType;
use crate::domain::alert::{Alert, AlertSeverity, AlertType};
use crate::domain::aqi::AqiCategory;
use crate::domain::location::{Coordinates, NamedLocation};
use crate::providers::firms::FireDetection;

/// Approximate km per degree, good enough for an advisory distance.
const KM_PER_DEGREE: f64 = 111.0;

/// Builds the wildfire smoke advisory, if any fires were detected.
pub fn wildfire_alert(
    origin: Coordinates,
    fires: &[FireDetection],
    now: DateTime<Utc>,
) -> Option<Alert> {
    if fires.is_empty() {
        return None;
    }

    let count = fires.len();
    let centroid_lat = fires.iter().map(|f| f.lat).sum::<f64>() / count as f64;
    let centroid_lon = fires.iter().map(|f| f.lon).sum::<f64>() / count as f64;

    let high_confidence = fires.iter().filter(|f| f.is_high_confidence()).count();
    let severity = if high_confidence > 10 {
        AlertSeverity::Critical
    } else if count > 5 {
        AlertSeverity::Danger
    } else {
        AlertSeverity::Warning
    };

    let distance_km = (((centroid_lat - origin.lat) * KM_PER_DEGREE).powi(2)
        + ((centroid_lon - origin.lon) * KM_PER_DEGREE).powi(2))
    .sqrt()
    .round();

    let plural = if count > 1 { "s" } else { "" };
    Some(Alert {
        id: format!("wildfire-alert-{}", now.timestamp_millis()),
        kind: AlertType::Event,
        severity,
        title: "Wildfire Smoke Advisory".to_string(),
        message: format!(
            "{count} active fire{plural} detected approximately {distance_km}km from your location. \
             Smoke may affect air quality in your area."
        ),
        timestamp: now,
        expires_at: Some(now + Duration::hours(24)),
        location: NamedLocation {
            name: format!("~{distance_km}km from current location"),
            lat: centroid_lat,
            lon: centroid_lon,
        },
        // Estimated smoke impact, not a measured reading.
        aqi_value: Some(165.0),
        category: Some(AqiCategory::Unhealthy),
        pollutant: Some(PollutantType::Pm25),
        actionable: true,
        recommendations: vec![
            "Monitor air quality closely".to_string(),
            "Keep windows and doors closed".to_string(),
            "Run air purifiers if available".to_string(),
            "Limit outdoor activities".to_string(),
            "Follow local fire evacuation orders".to_string(),
            "Check for official smoke advisories".to_string(),
        ],
    })
}
