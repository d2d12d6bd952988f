//! Alert synthesis: threshold, pollutant-spike, and wildfire event alerts,
//! derived fresh on every query. Nothing here is persisted and no
//! deduplication is performed across the three sections; the result is a
//! plain concatenation of whatever each rule set produced.

mod thresholds;
mod wildfire;

pub use thresholds::{spike_alerts, threshold_alert};
pub use wildfire::wildfire_alert;

use chrono::{DateTime, Utc};

use crate::domain::air_quality::AirQualityData;
use crate::domain::alert::Alert;
use crate::domain::location::Coordinates;
use crate::providers::firms::FireDetection;

/// Synthesizes the full alert set for one location: at most one threshold
/// alert, zero or more spike alerts, and at most one wildfire advisory.
///
/// `reading` is `None` when the live feed was unavailable or carried no
/// usable AQI; the fire list may be empty for the mirror-image failure. Both
/// degradations yield fewer alerts, never an error.
pub fn synthesize(
    reading: Option<&AirQualityData>,
    fires: &[FireDetection],
    origin: Coordinates,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if let Some(data) = reading {
        if let Some(alert) = threshold_alert(&data.aqi, now) {
            alerts.push(alert);
        }
        alerts.extend(spike_alerts(data, now));
    }
    if let Some(alert) = wildfire_alert(origin, fires, now) {
        alerts.push(alert);
    }
    alerts
}
