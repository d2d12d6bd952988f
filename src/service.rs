//! Aggregation and fallback orchestration over the provider adapters.
//!
//! One [`Aggregator`] serves the whole query surface. Provider handles are
//! built lazily per call so a missing credential surfaces as a
//! `misconfigured` error on the operations that need it and nowhere else.
//! Nothing is cached or persisted between calls.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::alerts;
use crate::config::{require_var, Config};
use crate::domain::air_quality::AirQualityData;
use crate::domain::alert::Alert;
use crate::domain::location::{BoundingBox, City, Coordinates};
use crate::domain::station::StationMarker;
use crate::domain::weather::{AqiPrediction, ForecastDay, WeatherData};
use crate::error::{Provider, ProviderError};
use crate::fetch::{BasicClient, HttpClient};
use crate::providers::airvisual::AirVisualClient;
use crate::providers::firms::{self, FirmsClient};
use crate::providers::geodb::GeoDbClient;
use crate::providers::ica_predict::IcaPredictClient;
use crate::providers::openweather::OpenWeatherClient;
use crate::providers::waqi::WaqiClient;

pub struct Aggregator {
    config: Config,
    http: Arc<dyn HttpClient>,
}

impl Aggregator {
    pub fn new(config: Config) -> Self {
        Self::with_http(config, Arc::new(BasicClient::new()))
    }

    /// Builds the service over a caller-supplied HTTP client. Tests use this
    /// to substitute canned responses.
    pub fn with_http(config: Config, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    /// Current air quality for a coordinate.
    ///
    /// Tries the primary provider first and falls back to WAQI only after it
    /// genuinely fails; the fallback is never raced proactively. When both
    /// sides fail the fallback's error propagates — never a partial or
    /// synthetic reading.
    pub async fn current_air_quality(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<AirQualityData, ProviderError> {
        match self.airvisual() {
            Ok(client) => match client.current(lat, lon).await {
                Ok(data) => {
                    info!(source = "airvisual", "current air quality from primary provider");
                    return Ok(data);
                }
                Err(err) => {
                    warn!(error = %err, "primary air-quality provider failed, trying fallback")
                }
            },
            Err(err) => warn!(error = %err, "primary air-quality provider not configured"),
        }

        let data = self.waqi()?.current(lat, lon).await?;
        info!(source = "waqi", "current air quality from fallback provider");
        Ok(data)
    }

    /// Stations inside a bounding box, for map rendering. An empty list is a
    /// valid result; substituting static fallback markers is the consumer's
    /// concern.
    pub async fn map_stations(
        &self,
        bounds: BoundingBox,
    ) -> Result<Vec<StationMarker>, ProviderError> {
        self.waqi()?.stations_in_bounds(bounds).await
    }

    /// Current weather conditions for a coordinate.
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherData, ProviderError> {
        self.openweather()?.current(lat, lon).await
    }

    /// Daily weather forecast for the supported deployment location.
    pub async fn weather_forecast(&self) -> Result<Vec<ForecastDay>, ProviderError> {
        self.ica_predict()?.weather_forecast().await
    }

    /// Daily AQI predictions for the supported deployment location.
    pub async fn aqi_predictions(&self) -> Result<Vec<AqiPrediction>, ProviderError> {
        self.ica_predict()?.aqi_predictions().await
    }

    /// Active advisory alerts for a coordinate.
    ///
    /// The live AQI reading and the fire-detection feed are independent, so
    /// they are fetched concurrently and merged. Either side degrades to "no
    /// alerts from this source" on failure; only a missing WAQI credential
    /// is an error, since without it the operation can never do anything.
    pub async fn active_alerts(
        &self,
        lat: f64,
        lon: f64,
        location_name: Option<&str>,
    ) -> Result<Vec<Alert>, ProviderError> {
        let waqi = self.waqi()?;
        let firms = self.firms();
        let now = Utc::now();

        let (reading, fires) = tokio::join!(
            waqi.current(lat, lon),
            firms.detections_near(lat, lon, firms::DEFAULT_RADIUS_KM),
        );

        let reading = match reading {
            Ok(mut data) => {
                if data.aqi.value <= 0.0 {
                    debug!("no live AQI value, skipping AQI-derived alerts");
                    None
                } else {
                    if let Some(name) = location_name {
                        data.aqi.location.name = name.to_string();
                    }
                    Some(data)
                }
            }
            Err(err) => {
                warn!(error = %err, "live reading unavailable for alert synthesis");
                None
            }
        };

        let fires = match fires {
            Ok(fires) => fires,
            Err(err) => {
                warn!(error = %err, "fire-detection feed unavailable, continuing without event alerts");
                Vec::new()
            }
        };

        let alerts = alerts::synthesize(reading.as_ref(), &fires, Coordinates { lat, lon }, now);
        info!(count = alerts.len(), "synthesized active alerts");
        Ok(alerts)
    }

    /// Cities matching a name prefix, most populous first.
    pub async fn search_cities(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<City>, ProviderError> {
        self.geodb()?.search(query, limit, offset).await
    }

    /// The most populous city within `radius_km` of a coordinate.
    pub async fn city_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        radius_km: u32,
    ) -> Result<City, ProviderError> {
        self.geodb()?.nearest(lat, lon, radius_km).await
    }

    fn airvisual(&self) -> Result<AirVisualClient, ProviderError> {
        let url = require_var(
            Provider::AirVisual,
            &self.config.airvisual_api_url,
            "AIRVISUAL_API_URL",
        )?;
        let key = require_var(
            Provider::AirVisual,
            &self.config.airvisual_api_key,
            "AIRVISUAL_API_KEY",
        )?;
        Ok(AirVisualClient::new(self.http.clone(), url, key))
    }

    fn waqi(&self) -> Result<WaqiClient, ProviderError> {
        let key = require_var(Provider::Waqi, &self.config.waqi_api_key, "WAQI_API_KEY")?;
        Ok(WaqiClient::new(
            self.http.clone(),
            self.config.waqi_api_url.clone(),
            key,
        ))
    }

    fn openweather(&self) -> Result<OpenWeatherClient, ProviderError> {
        let url = require_var(
            Provider::OpenWeather,
            &self.config.openweathermap_api_url,
            "OPENWEATHERMAP_API_URL",
        )?;
        let key = require_var(
            Provider::OpenWeather,
            &self.config.openweathermap_api_key,
            "OPENWEATHERMAP_API_KEY",
        )?;
        Ok(OpenWeatherClient::new(self.http.clone(), url, key))
    }

    fn ica_predict(&self) -> Result<IcaPredictClient, ProviderError> {
        let url = require_var(
            Provider::IcaPredict,
            &self.config.ica_predict_api_url,
            "ICA_PREDICT_API_URL",
        )?;
        Ok(IcaPredictClient::new(self.http.clone(), url))
    }

    fn firms(&self) -> FirmsClient {
        FirmsClient::new(
            self.http.clone(),
            self.config.nasa_firms_api_url.clone(),
            self.config.nasa_firms_api_key.clone(),
        )
    }

    fn geodb(&self) -> Result<GeoDbClient, ProviderError> {
        let key = require_var(Provider::GeoDb, &self.config.rapid_api_key, "RAPID_API_KEY")?;
        Ok(GeoDbClient::new(
            self.http.clone(),
            self.config.geodb_api_url.clone(),
            key,
        ))
    }
}
