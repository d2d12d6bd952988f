//! GeoDB city search and reverse lookup, via RapidAPI.
//!
//! Both endpoints sort by population descending so the first match is the
//! most relevant. Authentication is the RapidAPI header pair, composed from
//! two [`ApiKey`] wrappers.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::location::{City, Coordinates};
use crate::error::{Provider, ProviderError};
use crate::fetch::auth::ApiKey;
use crate::fetch::{self, HttpClient};

pub const RAPID_API_HOST: &str = "wft-geo-db.p.rapidapi.com";

pub struct GeoDbClient {
    http: Box<dyn HttpClient>,
    base_url: String,
}

impl GeoDbClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let with_host = ApiKey {
            inner: http,
            header_name: "x-rapidapi-host".to_string(),
            key: RAPID_API_HOST.to_string(),
        };
        Self {
            http: Box::new(ApiKey {
                inner: with_host,
                header_name: "x-rapidapi-key".to_string(),
                key: api_key.into(),
            }),
            base_url: base_url.into(),
        }
    }

    /// Cities whose name starts with `query`, most populous first.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<City>, ProviderError> {
        let url = format!(
            "{}/cities?namePrefix={query}&limit={limit}&offset={offset}&sort=-population",
            self.base_url
        );
        let resp: GeoDbResponse = fetch::get_json(&*self.http, Provider::GeoDb, &url).await?;
        Ok(resp.data.into_iter().map(city_from_row).collect())
    }

    /// The most populous city within `radius_km` of the coordinate.
    ///
    /// # Errors
    ///
    /// `NotFound` when no city lies within the radius.
    pub async fn nearest(
        &self,
        lat: f64,
        lon: f64,
        radius_km: u32,
    ) -> Result<City, ProviderError> {
        // GeoDB wants explicitly signed coordinates in the path segment.
        let url = format!(
            "{}/locations/{lat:+}{lon:+}/nearbyCities?radius={radius_km}&limit=1&sort=-population",
            self.base_url
        );
        let resp: GeoDbResponse = fetch::get_json(&*self.http, Provider::GeoDb, &url).await?;
        resp.data
            .into_iter()
            .next()
            .map(city_from_row)
            .ok_or(ProviderError::NotFound {
                provider: Provider::GeoDb,
            })
    }
}

#[derive(Debug, Deserialize)]
struct GeoDbResponse {
    #[serde(default)]
    data: Vec<GeoDbCity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoDbCity {
    id: i64,
    city: String,
    name: String,
    #[serde(default)]
    region: Option<String>,
    country: String,
    country_code: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    population: Option<u64>,
}

fn city_from_row(row: GeoDbCity) -> City {
    City {
        id: row.id.to_string(),
        name: row.name,
        city: row.city,
        region: row.region.filter(|r| !r.is_empty()),
        country: row.country,
        country_code: row.country_code,
        coordinates: Coordinates {
            lat: row.latitude,
            lon: row.longitude,
        },
        population: row.population,
    }
}
