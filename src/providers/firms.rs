//! NASA FIRMS fire-detection adapter (VIIRS 375 m near-real-time).
//!
//! The feed is CSV, one row per detection within the last observation day.
//! This adapter only parses; clustering and severity estimation live in the
//! alert engine so each half can be tested on its own.

use std::sync::Arc;

use crate::error::{Provider, ProviderError};
use crate::fetch::{self, HttpClient};

/// Search radius used by the alert engine when scanning for nearby fires.
pub const DEFAULT_RADIUS_KM: f64 = 200.0;

/// Columns the feed must at least carry; shorter rows are dropped.
const MIN_FIELDS: usize = 13;

/// One satellite fire detection.
#[derive(Debug, Clone, PartialEq)]
pub struct FireDetection {
    pub lat: f64,
    pub lon: f64,
    pub brightness: f64,
    pub confidence: String,
    pub acq_date: String,
    pub acq_time: String,
}

impl FireDetection {
    /// VIIRS flags nominal and high confidence as `n` / `h`; `l` is low.
    pub fn is_high_confidence(&self) -> bool {
        self.confidence == "h" || self.confidence == "n"
    }
}

pub struct FirmsClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
}

impl FirmsClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Detections within `radius_km` of the coordinate over the last day.
    /// An empty feed (header only) is an empty list, not an error.
    pub async fn detections_near(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<FireDetection>, ProviderError> {
        let url = format!(
            "{}/api/area/csv/{}/VIIRS_SNPP_NRT/{lat},{lon}/{radius_km}/1",
            self.base_url, self.api_key
        );
        let body = fetch::get_text(&self.http, Provider::NasaFirms, &url).await?;
        parse_detections(&body)
    }
}

/// Parses the detection feed. The first row is a header; rows with too few
/// fields or non-numeric coordinates are dropped rather than failing the
/// whole feed.
pub fn parse_detections(csv_text: &str) -> Result<Vec<FireDetection>, ProviderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut detections = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ProviderError::Malformed {
            provider: Provider::NasaFirms,
            detail: e.to_string(),
        })?;
        if record.len() < MIN_FIELDS {
            continue;
        }
        let (Some(lat), Some(lon), Some(brightness)) = (
            parse_field(&record, 0),
            parse_field(&record, 1),
            parse_field(&record, 2),
        ) else {
            continue;
        };
        detections.push(FireDetection {
            lat,
            lon,
            brightness,
            acq_date: record.get(5).unwrap_or_default().to_string(),
            acq_time: record.get(6).unwrap_or_default().to_string(),
            confidence: record.get(9).unwrap_or_default().to_string(),
        });
    }
    Ok(detections)
}

fn parse_field(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record.get(index)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight";

    #[test]
    fn header_only_feed_is_empty() {
        let detections = parse_detections(&format!("{HEADER}\n")).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn parses_detection_rows() {
        let body = format!(
            "{HEADER}\n\
             34.1,-118.3,330.5,0.4,0.4,2024-01-15,1200,N,VIIRS,h,2.0NRT,290.1,5.2,D\n\
             34.2,-118.4,320.1,0.4,0.4,2024-01-15,1218,N,VIIRS,l,2.0NRT,285.0,3.1,D\n"
        );
        let detections = parse_detections(&body).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].lat, 34.1);
        assert_eq!(detections[0].brightness, 330.5);
        assert_eq!(detections[0].acq_date, "2024-01-15");
        assert!(detections[0].is_high_confidence());
        assert!(!detections[1].is_high_confidence());
    }

    #[test]
    fn short_and_non_numeric_rows_are_dropped() {
        let body = format!(
            "{HEADER}\n\
             34.1,-118.3,330.5\n\
             oops,-118.4,320.1,0.4,0.4,2024-01-15,1218,N,VIIRS,n,2.0NRT,285.0,3.1,D\n\
             34.3,-118.5,310.0,0.4,0.4,2024-01-15,1230,N,VIIRS,n,2.0NRT,280.0,2.0,D\n"
        );
        let detections = parse_detections(&body).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].lat, 34.3);
    }
}
