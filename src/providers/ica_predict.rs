//! Adapter for the in-house prediction API: a 5-day weather forecast and a
//! 7-day AQI prediction series. Both are fixed to the one deployment
//! location the model is trained on, so neither takes a coordinate.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::aqi;
use crate::domain::units::{ms_to_kmh, round1, round2};
use crate::domain::weather::{AqiPrediction, ForecastDay, PredictedPollutants};
use crate::error::{Provider, ProviderError};
use crate::fetch::{self, HttpClient};

pub struct IcaPredictClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl IcaPredictClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Daily weather forecast, ordered by date.
    pub async fn weather_forecast(&self) -> Result<Vec<ForecastDay>, ProviderError> {
        let url = format!("{}/weather/forecast", self.base_url);
        let rows: Vec<ForecastRow> =
            fetch::get_json(&self.http, Provider::IcaPredict, &url).await?;
        if rows.is_empty() {
            return Err(ProviderError::NotFound {
                provider: Provider::IcaPredict,
            });
        }
        Ok(rows.into_iter().map(normalize_forecast).collect())
    }

    /// Daily AQI predictions, ordered by date.
    pub async fn aqi_predictions(&self) -> Result<Vec<AqiPrediction>, ProviderError> {
        let url = format!("{}/predict", self.base_url);
        let rows: Vec<PredictionRow> =
            fetch::get_json(&self.http, Provider::IcaPredict, &url).await?;
        if rows.is_empty() {
            return Err(ProviderError::NotFound {
                provider: Provider::IcaPredict,
            });
        }
        Ok(rows.into_iter().map(normalize_prediction).collect())
    }
}

#[derive(Debug, Deserialize)]
struct ForecastRow {
    date: String,
    temperature_celsius: f64,
    dewpoint_celsius: f64,
    pressure_hpa: f64,
    wind_speed: f64,
    precipitation_mm: f64,
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    date: String,
    #[serde(rename = "AQI")]
    aqi: f64,
    quality: String,
    #[serde(rename = "NO2_ugm3")]
    no2_ugm3: f64,
    #[serde(rename = "CO_mgm3")]
    co_mgm3: f64,
    #[serde(rename = "O3_ugm3")]
    o3_ugm3: f64,
    #[serde(rename = "SO2_ugm3")]
    so2_ugm3: f64,
    aerosol_index: f64,
}

/// Upstream dates sometimes carry a time component ("2024-05-01 00:00:00");
/// only the date token is kept.
fn date_portion(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or(raw)
}

fn normalize_forecast(row: ForecastRow) -> ForecastDay {
    ForecastDay {
        date: date_portion(&row.date).to_string(),
        temperature: round1(row.temperature_celsius),
        dewpoint: round1(row.dewpoint_celsius),
        pressure: round1(row.pressure_hpa),
        wind_speed: ms_to_kmh(row.wind_speed),
        precipitation: round1(row.precipitation_mm),
    }
}

fn normalize_prediction(row: PredictionRow) -> AqiPrediction {
    AqiPrediction {
        date: date_portion(&row.date).to_string(),
        aqi: round1(row.aqi),
        category: aqi::classify(row.aqi),
        quality: row.quality,
        pollutants: PredictedPollutants {
            no2: round1(row.no2_ugm3),
            co: round1(row.co_mgm3),
            o3: round1(row.o3_ugm3),
            so2: round1(row.so2_ugm3),
        },
        aerosol_index: round2(row.aerosol_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aqi::AqiCategory;

    #[test]
    fn forecast_truncates_date_and_converts_wind() {
        let day = normalize_forecast(ForecastRow {
            date: "2024-05-01 00:00:00".to_string(),
            temperature_celsius: 18.333,
            dewpoint_celsius: 11.97,
            pressure_hpa: 1013.249,
            wind_speed: 3.0,
            precipitation_mm: 0.04,
        });
        assert_eq!(day.date, "2024-05-01");
        assert_eq!(day.temperature, 18.3);
        assert_eq!(day.dewpoint, 12.0);
        assert_eq!(day.pressure, 1013.2);
        assert_eq!(day.wind_speed, 10.8);
        assert_eq!(day.precipitation, 0.0);
    }

    #[test]
    fn plain_date_passes_through() {
        assert_eq!(date_portion("2024-05-01"), "2024-05-01");
    }

    #[test]
    fn prediction_rounds_and_classifies() {
        let day = normalize_prediction(PredictionRow {
            date: "2024-05-01".to_string(),
            aqi: 112.46,
            quality: "Unhealthy for Sensitive Groups".to_string(),
            no2_ugm3: 23.456,
            co_mgm3: 0.81,
            o3_ugm3: 64.02,
            so2_ugm3: 4.449,
            aerosol_index: 0.4567,
        });
        assert_eq!(day.aqi, 112.5);
        assert_eq!(day.category, AqiCategory::UnhealthySensitive);
        assert_eq!(day.pollutants.no2, 23.5);
        assert_eq!(day.pollutants.so2, 4.4);
        assert_eq!(day.aerosol_index, 0.46);
    }
}
