//! Environment-backed provider configuration.
//!
//! All credentials and base URLs are read once from the environment. Nothing
//! fails here: each service operation validates the providers it needs on
//! first use and fails fast with a `misconfigured` error, and
//! [`Config::missing_providers`] gives a structured startup report instead
//! of ambient warnings.

use crate::error::{Provider, ProviderError};

pub const DEFAULT_WAQI_API_URL: &str = "https://api.waqi.info";
pub const DEFAULT_NASA_FIRMS_API_URL: &str = "https://firms.modaps.eosdis.nasa.gov";
pub const DEFAULT_GEODB_API_URL: &str = "https://wft-geo-db.p.rapidapi.com/v1/geo";

/// NASA distributes a public demo key for the FIRMS feed, so that provider
/// is never reported as misconfigured.
pub const DEFAULT_NASA_FIRMS_API_KEY: &str = "demo";

#[derive(Debug, Clone)]
pub struct Config {
    pub airvisual_api_url: Option<String>,
    pub airvisual_api_key: Option<String>,
    pub waqi_api_url: String,
    pub waqi_api_key: Option<String>,
    pub openweathermap_api_url: Option<String>,
    pub openweathermap_api_key: Option<String>,
    pub ica_predict_api_url: Option<String>,
    pub nasa_firms_api_url: String,
    pub nasa_firms_api_key: String,
    pub rapid_api_key: Option<String>,
    pub geodb_api_url: String,
}

impl Config {
    /// Reads configuration from the process environment. Unset or empty
    /// variables become `None`; base URLs fall back to the public endpoints.
    pub fn from_env() -> Self {
        Self {
            airvisual_api_url: env_var("AIRVISUAL_API_URL"),
            airvisual_api_key: env_var("AIRVISUAL_API_KEY"),
            waqi_api_url: env_var("WAQI_API_URL").unwrap_or_else(|| DEFAULT_WAQI_API_URL.to_string()),
            waqi_api_key: env_var("WAQI_API_KEY"),
            openweathermap_api_url: env_var("OPENWEATHERMAP_API_URL"),
            openweathermap_api_key: env_var("OPENWEATHERMAP_API_KEY"),
            ica_predict_api_url: env_var("ICA_PREDICT_API_URL"),
            nasa_firms_api_url: env_var("NASA_FIRMS_API_URL")
                .unwrap_or_else(|| DEFAULT_NASA_FIRMS_API_URL.to_string()),
            nasa_firms_api_key: env_var("NASA_FIRMS_API_KEY")
                .unwrap_or_else(|| DEFAULT_NASA_FIRMS_API_KEY.to_string()),
            rapid_api_key: env_var("RAPID_API_KEY"),
            geodb_api_url: env_var("GEODB_API_URL")
                .unwrap_or_else(|| DEFAULT_GEODB_API_URL.to_string()),
        }
    }

    /// Providers whose required configuration is absent. Operations that
    /// depend on them will fail with a `misconfigured` error when invoked.
    pub fn missing_providers(&self) -> Vec<Provider> {
        let mut missing = Vec::new();
        if self.airvisual_api_url.is_none() || self.airvisual_api_key.is_none() {
            missing.push(Provider::AirVisual);
        }
        if self.waqi_api_key.is_none() {
            missing.push(Provider::Waqi);
        }
        if self.openweathermap_api_url.is_none() || self.openweathermap_api_key.is_none() {
            missing.push(Provider::OpenWeather);
        }
        if self.ica_predict_api_url.is_none() {
            missing.push(Provider::IcaPredict);
        }
        if self.rapid_api_key.is_none() {
            missing.push(Provider::GeoDb);
        }
        missing
    }
}

/// Unwraps an optional configuration value or fails with `misconfigured`,
/// naming the environment variable the operator needs to set.
pub(crate) fn require_var<'a>(
    provider: Provider,
    value: &'a Option<String>,
    var: &str,
) -> Result<&'a str, ProviderError> {
    value.as_deref().ok_or_else(|| ProviderError::Misconfigured {
        provider,
        detail: format!("{var} is not set"),
    })
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
