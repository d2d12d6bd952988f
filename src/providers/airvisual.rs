//! AirVisual (IQAir) nearest-city adapter, the primary current-AQI source.
//!
//! The provider reports only the aggregate US AQI and its main pollutant, no
//! per-pollutant breakdown, so the normalized pollutant list is a single
//! entry mirroring the aggregate index.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::air_quality::{
    AirQualityData, AqiReading, DataSource, PollutantReading, PollutantType,
};
use crate::domain::location::NamedLocation;
use crate::error::{Provider, ProviderError};
use crate::fetch::auth::UrlParam;
use crate::fetch::{self, HttpClient};
use crate::providers::parse_timestamp;

pub struct AirVisualClient {
    http: Box<dyn HttpClient>,
    base_url: String,
}

impl AirVisualClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Box::new(UrlParam {
                inner: http,
                param_name: "key".to_string(),
                key: api_key.into(),
            }),
            base_url: base_url.into(),
        }
    }

    /// Fetches and normalizes the reading for the city nearest to the
    /// coordinate.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<AirQualityData, ProviderError> {
        let url = format!("{}/nearest_city?lat={lat}&lon={lon}", self.base_url);
        let resp: NearestCityResponse =
            fetch::get_json(&*self.http, Provider::AirVisual, &url).await?;

        if resp.status != "success" {
            return Err(ProviderError::Unavailable {
                provider: Provider::AirVisual,
                detail: format!("provider status \"{}\"", resp.status),
            });
        }
        let data = resp.data.ok_or(ProviderError::NotFound {
            provider: Provider::AirVisual,
        })?;
        Ok(normalize(data, lat, lon))
    }
}

#[derive(Debug, Deserialize)]
struct NearestCityResponse {
    status: String,
    #[serde(default)]
    data: Option<NearestCityData>,
}

#[derive(Debug, Deserialize)]
struct NearestCityData {
    city: String,
    #[serde(default)]
    state: Option<String>,
    country: String,
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    pollution: Pollution,
}

#[derive(Debug, Deserialize)]
struct Pollution {
    ts: String,
    aqius: f64,
    mainus: String,
}

/// AirVisual pollutant codes. Unknown codes default to PM2.5, the most
/// common driver.
fn pollutant_from_code(code: &str) -> PollutantType {
    match code {
        "p2" => PollutantType::Pm25,
        "p1" => PollutantType::Pm10,
        "o3" => PollutantType::O3,
        "n2" => PollutantType::No2,
        "s2" => PollutantType::So2,
        _ => PollutantType::Pm25,
    }
}

fn normalize(data: NearestCityData, lat: f64, lon: f64) -> AirQualityData {
    let timestamp = parse_timestamp(&data.current.pollution.ts);
    let value = data.current.pollution.aqius;
    let primary = pollutant_from_code(&data.current.pollution.mainus);

    let name = match data.state.filter(|s| !s.is_empty()) {
        Some(state) => format!("{}, {}", data.city, state),
        None => format!("{}, {}", data.city, data.country),
    };

    let pollutants = vec![PollutantReading {
        kind: primary,
        value,
        unit: primary.unit().to_string(),
        aqi: value,
        timestamp,
    }];

    AirQualityData {
        aqi: AqiReading::new(value, primary, timestamp, NamedLocation { name, lat, lon }),
        pollutants,
        data_source: DataSource::Combined,
        last_updated: timestamp,
    }
}
