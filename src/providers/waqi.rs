//! WAQI adapters: the geo-feed used as the current-AQI fallback (and as the
//! live reading for alert synthesis, since it carries per-pollutant
//! sub-indices) plus the map-bounds station listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::air_quality::{
    AirQualityData, AqiReading, DataSource, PollutantReading, PollutantType,
};
use crate::domain::location::{BoundingBox, NamedLocation};
use crate::domain::station::StationMarker;
use crate::error::{Provider, ProviderError};
use crate::fetch::auth::UrlParam;
use crate::fetch::{self, HttpClient};
use crate::providers::parse_timestamp;

pub struct WaqiClient {
    http: Box<dyn HttpClient>,
    base_url: String,
}

impl WaqiClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http: Box::new(UrlParam {
                inner: http,
                param_name: "token".to_string(),
                key: token.into(),
            }),
            base_url: base_url.into(),
        }
    }

    /// Fetches and normalizes the feed for the station nearest to the
    /// coordinate.
    ///
    /// # Errors
    ///
    /// `NotFound` when the provider reports a non-ok status or an absent
    /// data block; `Malformed` when the data block doesn't match the feed
    /// schema.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<AirQualityData, ProviderError> {
        let url = format!("{}/feed/geo:{lat};{lon}/", self.base_url);
        let resp: Envelope = fetch::get_json(&*self.http, Provider::Waqi, &url).await?;

        // On failure WAQI sets status != "ok" and puts a message string in
        // `data`, so the block is only decoded once the status is known good.
        let data = match resp {
            Envelope {
                status, data: Some(data), ..
            } if status == "ok" => data,
            _ => {
                return Err(ProviderError::NotFound {
                    provider: Provider::Waqi,
                })
            }
        };
        let feed: FeedData =
            serde_json::from_value(data).map_err(|e| ProviderError::Malformed {
                provider: Provider::Waqi,
                detail: e.to_string(),
            })?;
        Ok(normalize_feed(feed, lat, lon))
    }

    /// Lists stations inside a bounding box. A success response with zero
    /// stations (or a non-ok status) is an empty list, not an error.
    pub async fn stations_in_bounds(
        &self,
        bounds: BoundingBox,
    ) -> Result<Vec<StationMarker>, ProviderError> {
        let url = format!(
            "{}/map/bounds/?latlng={},{},{},{}",
            self.base_url, bounds.south, bounds.west, bounds.north, bounds.east
        );
        let resp: Envelope = fetch::get_json(&*self.http, Provider::Waqi, &url).await?;

        let data = match resp {
            Envelope {
                status, data: Some(data), ..
            } if status == "ok" => data,
            _ => return Ok(Vec::new()),
        };
        let stations: Vec<BoundsStation> =
            serde_json::from_value(data).map_err(|e| ProviderError::Malformed {
                provider: Provider::Waqi,
                detail: e.to_string(),
            })?;
        Ok(stations.into_iter().filter_map(marker_from_station).collect())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    aqi: f64,
    #[serde(default)]
    dominentpol: Option<String>,
    #[serde(default)]
    iaqi: Iaqi,
    city: FeedCity,
    time: FeedTime,
}

#[derive(Debug, Default, Deserialize)]
struct Iaqi {
    #[serde(default)]
    pm25: Option<IaqiValue>,
    #[serde(default)]
    pm10: Option<IaqiValue>,
    #[serde(default)]
    o3: Option<IaqiValue>,
    #[serde(default)]
    no2: Option<IaqiValue>,
    #[serde(default)]
    so2: Option<IaqiValue>,
}

#[derive(Debug, Deserialize)]
struct IaqiValue {
    v: f64,
}

#[derive(Debug, Deserialize)]
struct FeedCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FeedTime {
    s: String,
}

/// WAQI dominant-pollutant codes map by identity; unknown codes default to
/// PM2.5.
fn pollutant_from_code(code: &str) -> PollutantType {
    match code {
        "pm25" => PollutantType::Pm25,
        "pm10" => PollutantType::Pm10,
        "o3" => PollutantType::O3,
        "no2" => PollutantType::No2,
        "so2" => PollutantType::So2,
        _ => PollutantType::Pm25,
    }
}

/// Builds the pollutant list from whichever sub-indices the feed carries.
/// The `aqi` field reuses the raw sub-index value; WAQI sub-indices are not
/// converted through EPA breakpoints.
fn build_pollutants(iaqi: &Iaqi, timestamp: DateTime<Utc>) -> Vec<PollutantReading> {
    let fields = [
        (PollutantType::Pm25, &iaqi.pm25),
        (PollutantType::Pm10, &iaqi.pm10),
        (PollutantType::O3, &iaqi.o3),
        (PollutantType::No2, &iaqi.no2),
        (PollutantType::So2, &iaqi.so2),
    ];
    fields
        .into_iter()
        .filter_map(|(kind, value)| {
            value.as_ref().map(|v| PollutantReading {
                kind,
                value: v.v,
                unit: kind.unit().to_string(),
                aqi: v.v,
                timestamp,
            })
        })
        .collect()
}

fn normalize_feed(feed: FeedData, lat: f64, lon: f64) -> AirQualityData {
    let timestamp = parse_timestamp(&feed.time.s);
    let primary = pollutant_from_code(feed.dominentpol.as_deref().unwrap_or("pm25"));

    AirQualityData {
        aqi: AqiReading::new(
            feed.aqi,
            primary,
            timestamp,
            NamedLocation {
                name: feed.city.name.clone(),
                lat,
                lon,
            },
        ),
        pollutants: build_pollutants(&feed.iaqi, timestamp),
        data_source: DataSource::Openaq,
        last_updated: timestamp,
    }
}

/// Projects one bounds entry to a marker. AQI arrives as a number or a
/// string; entries with non-numeric or negative values are dropped.
fn marker_from_station(station: BoundsStation) -> Option<StationMarker> {
    let aqi = match &station.aqi {
        serde_json::Value::Number(n) => n.as_f64()? as i64,
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if aqi < 0 {
        return None;
    }
    Some(StationMarker {
        id: station.uid,
        lat: station.lat,
        lon: station.lon,
        aqi,
        name: station.station.name,
        last_update: station.station.time,
    })
}

#[derive(Debug, Deserialize)]
struct BoundsStation {
    uid: u64,
    aqi: serde_json::Value,
    lat: f64,
    lon: f64,
    station: BoundsStationInfo,
}

#[derive(Debug, Deserialize)]
struct BoundsStationInfo {
    name: String,
    #[serde(default)]
    time: Option<String>,
}
