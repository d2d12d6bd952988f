//! Advisory alerts synthesized from live readings. Alerts are value objects
//! created fresh on every query; `expires_at` is display metadata for the
//! consumer, not an enforced TTL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::air_quality::PollutantType;
use crate::domain::aqi::AqiCategory;
use crate::domain::location::NamedLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Danger,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertType {
    AqiThreshold,
    PollutantSpike,
    Event,
    Forecast,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub location: NamedLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AqiCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollutant: Option<PollutantType>,
    pub actionable: bool,
    pub recommendations: Vec<String>,
}
