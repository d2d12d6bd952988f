//! OpenWeatherMap one-call adapter for current conditions.
//!
//! Upstream units are Kelvin and m/s; everything is converted to °C and
//! km/h at this boundary. Minutely/hourly/daily/alert blocks are excluded
//! from the request to keep the payload small.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::units::{kelvin_to_celsius, ms_to_kmh};
use crate::domain::weather::WeatherData;
use crate::error::{Provider, ProviderError};
use crate::fetch::auth::UrlParam;
use crate::fetch::{self, HttpClient};

pub struct OpenWeatherClient {
    http: Box<dyn HttpClient>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Box::new(UrlParam {
                inner: http,
                param_name: "appid".to_string(),
                key: api_key.into(),
            }),
            base_url: base_url.into(),
        }
    }

    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherData, ProviderError> {
        let url = format!(
            "{}?lat={lat}&lon={lon}&exclude=minutely,hourly,daily,alerts",
            self.base_url
        );
        let resp: OneCallResponse =
            fetch::get_json(&*self.http, Provider::OpenWeather, &url).await?;

        let current = resp.current.ok_or(ProviderError::NotFound {
            provider: Provider::OpenWeather,
        })?;
        normalize(current)
    }
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    #[serde(default)]
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    dt: i64,
    temp: f64,
    feels_like: f64,
    pressure: u32,
    humidity: u8,
    #[serde(default)]
    uvi: f64,
    #[serde(default)]
    clouds: u8,
    #[serde(default)]
    visibility: u32,
    wind_speed: f64,
    wind_deg: u16,
    #[serde(default)]
    wind_gust: Option<f64>,
    weather: Vec<WeatherCondition>,
    #[serde(default)]
    rain: Option<Accumulation>,
    #[serde(default)]
    snow: Option<Accumulation>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Accumulation {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
}

fn normalize(current: CurrentConditions) -> Result<WeatherData, ProviderError> {
    let condition = current
        .weather
        .first()
        .cloned()
        .ok_or_else(|| ProviderError::Malformed {
            provider: Provider::OpenWeather,
            detail: "empty weather condition list".to_string(),
        })?;

    // Rain and snow never report together; prefer rain.
    let precipitation = current
        .rain
        .and_then(|r| r.one_hour)
        .or_else(|| current.snow.and_then(|s| s.one_hour))
        .unwrap_or(0.0);

    Ok(WeatherData {
        timestamp: DateTime::<Utc>::from_timestamp(current.dt, 0).unwrap_or_else(Utc::now),
        temperature: kelvin_to_celsius(current.temp),
        feels_like: kelvin_to_celsius(current.feels_like),
        humidity: current.humidity,
        pressure: current.pressure,
        wind_speed: ms_to_kmh(current.wind_speed),
        wind_direction: current.wind_deg,
        wind_gust: current.wind_gust.map(ms_to_kmh),
        visibility: current.visibility,
        uv_index: current.uvi,
        cloud_cover: current.clouds,
        precipitation,
        conditions: condition.description,
        icon: condition.icon,
    })
}
