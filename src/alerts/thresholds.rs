//! AQI threshold and pollutant-spike alert rules.
//!
//! The threshold alert mirrors the classifier's tier boundaries with fixed
//! per-tier text and recommendations. Spike rules are independent of it and
//! of each other: each fires only when its pollutant's sub-index is present
//! in the reading and crosses its own limit.

use chrono::{DateTime, Duration, Utc};

use crate::domain::air_quality::{AirQualityData, AqiReading, PollutantType};
use crate::domain::alert::{Alert, AlertSeverity, AlertType};

fn severity_for_aqi(aqi: f64) -> AlertSeverity {
    if aqi >= 201.0 {
        AlertSeverity::Critical
    } else if aqi >= 151.0 {
        AlertSeverity::Danger
    } else if aqi >= 101.0 {
        AlertSeverity::Warning
    } else {
        AlertSeverity::Info
    }
}

/// Builds the single AQI threshold alert, if the reading warrants one.
/// Readings at or below 50 produce nothing.
pub fn threshold_alert(reading: &AqiReading, now: DateTime<Utc>) -> Option<Alert> {
    let aqi = reading.value;
    if aqi <= 50.0 {
        return None;
    }

    let (title, message, recommendations): (&str, String, &[&str]) = if aqi >= 301.0 {
        (
            "Hazardous Air Quality - Health Emergency",
            format!("Air quality is hazardous (AQI: {aqi:.0}). Everyone should avoid all outdoor activities."),
            &[
                "Stay indoors with windows and doors closed",
                "Run air purifiers on high",
                "Avoid all physical activity",
                "Seek medical attention if experiencing symptoms",
                "Follow local emergency guidance",
            ],
        )
    } else if aqi >= 201.0 {
        (
            "Very Unhealthy Air Quality Warning",
            format!("Air quality is very unhealthy (AQI: {aqi:.0}). Health warnings of emergency conditions."),
            &[
                "Everyone should avoid all outdoor exertion",
                "Keep windows and doors closed",
                "Run air purifiers if available",
                "Move activities indoors",
                "Monitor health symptoms closely",
            ],
        )
    } else if aqi >= 151.0 {
        (
            "Unhealthy Air Quality Alert",
            format!("Air quality is unhealthy (AQI: {aqi:.0}). Everyone may begin to experience health effects."),
            &[
                "Limit prolonged outdoor activities",
                "Sensitive groups should stay indoors",
                "Close windows during peak hours",
                "Use air purifiers if available",
            ],
        )
    } else if aqi >= 101.0 {
        (
            "Air Quality Alert for Sensitive Groups",
            format!(
                "Air quality has reached unhealthy levels for sensitive groups (AQI: {aqi:.0}). {} levels are elevated.",
                reading.primary_pollutant.code().to_uppercase()
            ),
            &[
                "Sensitive groups should reduce prolonged outdoor activities",
                "Consider rescheduling outdoor activities to early morning",
                "Keep windows closed if possible",
                "Monitor symptoms if you are sensitive to air pollution",
            ],
        )
    } else {
        (
            "Moderate Air Quality Notice",
            format!("Air quality is moderate (AQI: {aqi:.0}). Unusually sensitive people should consider limiting prolonged outdoor exertion."),
            &[
                "Unusually sensitive people should consider reducing prolonged outdoor exertion",
                "General public can enjoy normal outdoor activities",
            ],
        )
    };

    Some(Alert {
        id: format!(
            "aqi-alert-{}-{}-{}",
            reading.location.lat,
            reading.location.lon,
            now.timestamp_millis()
        ),
        kind: AlertType::AqiThreshold,
        severity: severity_for_aqi(aqi),
        title: title.to_string(),
        message,
        timestamp: now,
        expires_at: Some(now + Duration::hours(6)),
        location: reading.location.clone(),
        aqi_value: Some(aqi),
        category: Some(reading.category),
        pollutant: Some(reading.primary_pollutant),
        actionable: true,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    })
}

/// Evaluates the per-pollutant spike rules against a reading. Each rule is
/// additive to the threshold alert; a single reading can legitimately
/// produce several spikes at once.
pub fn spike_alerts(data: &AirQualityData, now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    push_alert(&mut alerts, pm25_spike(data, now));
    push_alert(&mut alerts, o3_spike(data, now));
    push_alert(&mut alerts, no2_spike(data, now));
    alerts
}

fn push_alert(alerts: &mut Vec<Alert>, alert: Option<Alert>) {
    if let Some(alert) = alert {
        alerts.push(alert);
    }
}

fn sub_index(data: &AirQualityData, kind: PollutantType) -> Option<f64> {
    data.pollutants
        .iter()
        .find(|p| p.kind == kind)
        .map(|p| p.value)
}

fn pm25_spike(data: &AirQualityData, now: DateTime<Utc>) -> Option<Alert> {
    let value = sub_index(data, PollutantType::Pm25)?;
    if value <= 75.0 {
        return None;
    }
    let very_unhealthy = value > 150.0;
    Some(Alert {
        id: format!("pm25-spike-{}", now.timestamp_millis()),
        kind: AlertType::PollutantSpike,
        severity: if very_unhealthy {
            AlertSeverity::Danger
        } else {
            AlertSeverity::Warning
        },
        title: "PM2.5 Levels Elevated".to_string(),
        message: format!(
            "Fine particulate matter (PM2.5) concentration is {value} µg/m³, which is {}.",
            if very_unhealthy { "very unhealthy" } else { "unhealthy" }
        ),
        timestamp: now,
        expires_at: Some(now + Duration::hours(4)),
        location: data.aqi.location.clone(),
        aqi_value: None,
        category: None,
        pollutant: Some(PollutantType::Pm25),
        actionable: true,
        recommendations: vec![
            "Wear N95 or KN95 mask outdoors".to_string(),
            "Keep windows closed".to_string(),
            "Use air purifiers indoors".to_string(),
            "Limit outdoor activities".to_string(),
        ],
    })
}

fn o3_spike(data: &AirQualityData, now: DateTime<Utc>) -> Option<Alert> {
    let value = sub_index(data, PollutantType::O3)?;
    if value <= 80.0 {
        return None;
    }
    Some(Alert {
        id: format!("o3-spike-{}", now.timestamp_millis()),
        kind: AlertType::PollutantSpike,
        severity: if value > 120.0 {
            AlertSeverity::Danger
        } else {
            AlertSeverity::Warning
        },
        title: "High Ozone Levels".to_string(),
        message: format!(
            "Ground-level ozone is {value} ppb. Ozone levels are typically highest in the afternoon."
        ),
        timestamp: now,
        expires_at: Some(now + Duration::hours(6)),
        location: data.aqi.location.clone(),
        aqi_value: None,
        category: None,
        pollutant: Some(PollutantType::O3),
        actionable: true,
        recommendations: vec![
            "Schedule outdoor activities for morning or evening".to_string(),
            "Reduce physical exertion outdoors".to_string(),
            "Sensitive groups should stay indoors during afternoon".to_string(),
        ],
    })
}

fn no2_spike(data: &AirQualityData, now: DateTime<Utc>) -> Option<Alert> {
    let value = sub_index(data, PollutantType::No2)?;
    if value <= 100.0 {
        return None;
    }
    Some(Alert {
        id: format!("no2-spike-{}", now.timestamp_millis()),
        kind: AlertType::PollutantSpike,
        severity: AlertSeverity::Warning,
        title: "Elevated NO₂ from Traffic".to_string(),
        message: format!(
            "Nitrogen dioxide levels are {value} ppb, likely due to increased traffic emissions."
        ),
        timestamp: now,
        expires_at: Some(now + Duration::hours(3)),
        location: data.aqi.location.clone(),
        aqi_value: None,
        category: None,
        pollutant: Some(PollutantType::No2),
        actionable: false,
        recommendations: vec![
            "Avoid busy roads if possible".to_string(),
            "Consider alternate routes for walking or biking".to_string(),
            "Keep car windows closed in traffic".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::air_quality::{AqiReading, DataSource, PollutantReading};
    use crate::domain::aqi::AqiCategory;
    use crate::domain::location::NamedLocation;

    fn reading(aqi: f64) -> AqiReading {
        AqiReading::new(
            aqi,
            PollutantType::Pm25,
            Utc::now(),
            NamedLocation {
                name: "Test City".to_string(),
                lat: 1.0,
                lon: 2.0,
            },
        )
    }

    fn data_with(pollutants: &[(PollutantType, f64)]) -> AirQualityData {
        let now = Utc::now();
        AirQualityData {
            aqi: reading(60.0),
            pollutants: pollutants
                .iter()
                .map(|&(kind, value)| PollutantReading {
                    kind,
                    value,
                    unit: kind.unit().to_string(),
                    aqi: value,
                    timestamp: now,
                })
                .collect(),
            data_source: DataSource::Openaq,
            last_updated: now,
        }
    }

    #[test]
    fn no_threshold_alert_at_or_below_fifty() {
        assert!(threshold_alert(&reading(50.0), Utc::now()).is_none());
        assert!(threshold_alert(&reading(12.0), Utc::now()).is_none());
    }

    #[test]
    fn threshold_severity_tiers() {
        let cases = [
            (51.0, AlertSeverity::Info),
            (100.0, AlertSeverity::Info),
            (101.0, AlertSeverity::Warning),
            (151.0, AlertSeverity::Danger),
            (201.0, AlertSeverity::Critical),
            (301.0, AlertSeverity::Critical),
        ];
        for (aqi, severity) in cases {
            let alert = threshold_alert(&reading(aqi), Utc::now())
                .unwrap_or_else(|| panic!("AQI {aqi} should produce an alert"));
            assert_eq!(alert.severity, severity, "AQI {aqi}");
            assert_eq!(alert.kind, AlertType::AqiThreshold);
        }
    }

    #[test]
    fn threshold_alert_carries_category_and_expiry() {
        let now = Utc::now();
        let alert = threshold_alert(&reading(165.0), now).unwrap();
        assert_eq!(alert.category, Some(AqiCategory::Unhealthy));
        assert_eq!(alert.aqi_value, Some(165.0));
        assert_eq!(alert.expires_at, Some(now + Duration::hours(6)));
        assert!(!alert.recommendations.is_empty());
    }

    #[test]
    fn spike_rules_fire_independently() {
        // pm25 over its limit, o3 under its own: exactly one spike.
        let data = data_with(&[(PollutantType::Pm25, 80.0), (PollutantType::O3, 50.0)]);
        let alerts = spike_alerts(&data, Utc::now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].pollutant, Some(PollutantType::Pm25));
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn multiple_spikes_coexist() {
        let data = data_with(&[
            (PollutantType::Pm25, 160.0),
            (PollutantType::O3, 130.0),
            (PollutantType::No2, 110.0),
        ]);
        let alerts = spike_alerts(&data, Utc::now());
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].severity, AlertSeverity::Danger);
        assert_eq!(alerts[1].severity, AlertSeverity::Danger);
        assert_eq!(alerts[2].severity, AlertSeverity::Warning);
        assert!(!alerts[2].actionable);
    }

    #[test]
    fn absent_sub_index_never_spikes() {
        let data = data_with(&[(PollutantType::So2, 500.0)]);
        assert!(spike_alerts(&data, Utc::now()).is_empty());
    }

    #[test]
    fn spike_expiry_windows_differ_per_pollutant() {
        let now = Utc::now();
        let data = data_with(&[
            (PollutantType::Pm25, 80.0),
            (PollutantType::O3, 90.0),
            (PollutantType::No2, 110.0),
        ]);
        let alerts = spike_alerts(&data, now);
        assert_eq!(alerts[0].expires_at, Some(now + Duration::hours(4)));
        assert_eq!(alerts[1].expires_at, Some(now + Duration::hours(6)));
        assert_eq!(alerts[2].expires_at, Some(now + Duration::hours(3)));
    }
}
