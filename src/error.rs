//! Typed errors for the provider adapters and the aggregation service.
//!
//! Every adapter failure carries the upstream it came from plus one of four
//! categories, so callers can distinguish "not configured" from "upstream
//! down" from "no data here" without string matching.

use std::fmt;

use thiserror::Error;

/// The upstream data providers this service aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    AirVisual,
    Waqi,
    OpenWeather,
    IcaPredict,
    NasaFirms,
    GeoDb,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::AirVisual => "airvisual",
            Provider::Waqi => "waqi",
            Provider::OpenWeather => "openweathermap",
            Provider::IcaPredict => "ica-predict",
            Provider::NasaFirms => "nasa-firms",
            Provider::GeoDb => "geodb",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required credential or URL is absent. Raised before any HTTP call
    /// is attempted.
    #[error("{provider} is not configured: {detail}")]
    Misconfigured { provider: Provider, detail: String },

    /// Non-2xx HTTP status, transport failure, or a provider-reported
    /// failure status in an otherwise well-formed response.
    #[error("{provider} is unavailable: {detail}")]
    Unavailable { provider: Provider, detail: String },

    /// Well-formed success response with no data for the given input.
    #[error("{provider} returned no data for this input")]
    NotFound { provider: Provider },

    /// The response body did not match the expected shape.
    #[error("{provider} returned a malformed response: {detail}")]
    Malformed { provider: Provider, detail: String },
}

impl ProviderError {
    /// Maps a non-success HTTP status to its error category: rejected
    /// credentials are a configuration problem, a 404 is an empty result,
    /// anything else means the upstream is down.
    pub(crate) fn from_status(provider: Provider, status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => ProviderError::Misconfigured {
                provider,
                detail: format!("credentials rejected (HTTP {status})"),
            },
            404 => ProviderError::NotFound { provider },
            _ => ProviderError::Unavailable {
                provider,
                detail: format!("HTTP {status}"),
            },
        }
    }
}
