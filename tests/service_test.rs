//! End-to-end tests of the aggregation service over a canned HTTP client.
//! No network: every provider response is routed by URL substring.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use airwatch::config::Config;
use airwatch::domain::air_quality::{DataSource, PollutantType};
use airwatch::domain::alert::{AlertSeverity, AlertType};
use airwatch::domain::aqi::AqiCategory;
use airwatch::domain::location::BoundingBox;
use airwatch::error::ProviderError;
use airwatch::fetch::HttpClient;
use airwatch::service::Aggregator;

struct Route {
    url_contains: &'static str,
    status: u16,
    body: String,
}

/// Routes requests by URL substring and records every URL it sees, in order.
struct MockClient {
    routes: Vec<Route>,
    calls: Mutex<Vec<String>>,
}

impl MockClient {
    fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls_matching(&self, pattern: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(pattern))
            .count()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let url = req.url().to_string();
        self.calls.lock().unwrap().push(url.clone());

        for route in &self.routes {
            if url.contains(route.url_contains) {
                let resp = http::Response::builder()
                    .status(route.status)
                    .body(route.body.clone())
                    .expect("mock response");
                return Ok(reqwest::Response::from(resp));
            }
        }
        let resp = http::Response::builder()
            .status(404)
            .body(String::new())
            .expect("mock response");
        Ok(reqwest::Response::from(resp))
    }
}

fn test_config() -> Config {
    Config {
        airvisual_api_url: Some("https://airvisual.test/v2".to_string()),
        airvisual_api_key: Some("av-key".to_string()),
        waqi_api_url: "https://waqi.test".to_string(),
        waqi_api_key: Some("waqi-key".to_string()),
        openweathermap_api_url: Some("https://owm.test/onecall".to_string()),
        openweathermap_api_key: Some("owm-key".to_string()),
        ica_predict_api_url: Some("https://ica.test".to_string()),
        nasa_firms_api_url: "https://firms.test".to_string(),
        nasa_firms_api_key: "demo".to_string(),
        rapid_api_key: Some("rapid-key".to_string()),
        geodb_api_url: "https://geodb.test/v1/geo".to_string(),
    }
}

fn service_with(routes: Vec<Route>) -> (Aggregator, Arc<MockClient>) {
    let mock = Arc::new(MockClient::new(routes));
    let service = Aggregator::with_http(test_config(), mock.clone());
    (service, mock)
}

fn airvisual_body(aqius: f64, mainus: &str) -> String {
    format!(
        r#"{{"status":"success","data":{{"city":"Los Angeles","state":"California","country":"USA","current":{{"pollution":{{"ts":"2024-01-15T12:00:00.000Z","aqius":{aqius},"mainus":"{mainus}"}},"weather":{{"ts":"2024-01-15T12:00:00.000Z","tp":20}}}}}}}}"#
    )
}

fn waqi_feed_body(aqi: f64, iaqi: &str) -> String {
    format!(
        r#"{{"status":"ok","data":{{"aqi":{aqi},"idx":1,"dominentpol":"pm25","iaqi":{{{iaqi}}},"city":{{"name":"Test City"}},"time":{{"s":"2024-01-15 12:00:00"}}}}}}"#
    )
}

const FIRMS_HEADER: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight";

#[tokio::test]
async fn primary_provider_scenario() {
    let (service, mock) = service_with(vec![Route {
        url_contains: "nearest_city",
        status: 200,
        body: airvisual_body(165.0, "p2"),
    }]);

    let data = service.current_air_quality(34.05, -118.24).await.unwrap();
    assert_eq!(data.aqi.value, 165.0);
    assert_eq!(data.aqi.category, AqiCategory::Unhealthy);
    assert_eq!(data.aqi.primary_pollutant, PollutantType::Pm25);
    assert_eq!(data.data_source, DataSource::Combined);

    // Fallback never touched on primary success.
    assert_eq!(mock.calls_matching("feed/geo"), 0);
}

#[tokio::test]
async fn fallback_engages_after_primary_failure() {
    let (service, mock) = service_with(vec![
        Route {
            url_contains: "nearest_city",
            status: 500,
            body: String::new(),
        },
        Route {
            url_contains: "feed/geo",
            status: 200,
            body: waqi_feed_body(72.0, r#""pm25":{"v":55.0}"#),
        },
    ]);

    let data = service.current_air_quality(34.05, -118.24).await.unwrap();
    assert_eq!(data.data_source, DataSource::Openaq);
    assert_eq!(data.aqi.value, 72.0);
    assert_eq!(data.aqi.location.name, "Test City");

    // Primary attempted exactly once, and before the fallback.
    assert_eq!(mock.calls_matching("nearest_city"), 1);
    let calls = mock.calls.lock().unwrap();
    assert!(calls[0].contains("nearest_city"));
    assert!(calls[1].contains("feed/geo"));
}

#[tokio::test]
async fn double_failure_is_upstream_unavailable() {
    let (service, _mock) = service_with(vec![
        Route {
            url_contains: "nearest_city",
            status: 500,
            body: String::new(),
        },
        Route {
            url_contains: "feed/geo",
            status: 503,
            body: String::new(),
        },
    ]);

    let err = service.current_air_quality(34.05, -118.24).await.unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }), "{err}");
}

#[tokio::test]
async fn no_keys_at_all_is_misconfigured() {
    let mut config = test_config();
    config.airvisual_api_key = None;
    config.waqi_api_key = None;
    let service = Aggregator::with_http(config, Arc::new(MockClient::new(Vec::new())));

    let err = service.current_air_quality(34.05, -118.24).await.unwrap_err();
    assert!(matches!(err, ProviderError::Misconfigured { .. }), "{err}");
}

#[tokio::test]
async fn map_stations_filters_unparseable_aqi() {
    let body = r#"{"status":"ok","data":[
        {"uid":1,"aqi":"42","lat":1.0,"lon":2.0,"station":{"name":"X","time":"t"}},
        {"uid":2,"aqi":"bad","lat":3.0,"lon":4.0,"station":{"name":"Y","time":"t"}}
    ]}"#;
    let (service, _mock) = service_with(vec![Route {
        url_contains: "map/bounds",
        status: 200,
        body: body.to_string(),
    }]);

    let bounds = BoundingBox {
        south: 0.0,
        west: 0.0,
        north: 10.0,
        east: 10.0,
    };
    let markers = service.map_stations(bounds).await.unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].id, 1);
    assert_eq!(markers[0].aqi, 42);
    assert_eq!(markers[0].name, "X");
}

#[tokio::test]
async fn map_stations_empty_result_is_not_an_error() {
    let (service, _mock) = service_with(vec![Route {
        url_contains: "map/bounds",
        status: 200,
        body: r#"{"status":"ok","data":[]}"#.to_string(),
    }]);

    let bounds = BoundingBox {
        south: 0.0,
        west: 0.0,
        north: 1.0,
        east: 1.0,
    };
    assert!(service.map_stations(bounds).await.unwrap().is_empty());
}

#[tokio::test]
async fn alerts_survive_fire_feed_failure() {
    let (service, _mock) = service_with(vec![
        Route {
            url_contains: "feed/geo",
            status: 200,
            body: waqi_feed_body(120.0, r#""pm25":{"v":80.0},"o3":{"v":50.0}"#),
        },
        Route {
            url_contains: "firms.test",
            status: 500,
            body: String::new(),
        },
    ]);

    let alerts = service.active_alerts(34.05, -118.24, None).await.unwrap();
    let kinds: Vec<_> = alerts.iter().map(|a| a.kind).collect();
    // Threshold plus the single pm25 spike; o3 stays under its own limit
    // and the failed fire feed contributes nothing.
    assert_eq!(kinds, vec![AlertType::AqiThreshold, AlertType::PollutantSpike]);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert_eq!(alerts[1].pollutant, Some(PollutantType::Pm25));
}

#[tokio::test]
async fn alerts_include_wildfire_advisory() {
    let fires = format!(
        "{FIRMS_HEADER}\n\
         34.5,-118.5,330.5,0.4,0.4,2024-01-15,1200,N,VIIRS,h,2.0NRT,290.1,5.2,D\n\
         34.6,-118.6,320.1,0.4,0.4,2024-01-15,1218,N,VIIRS,n,2.0NRT,285.0,3.1,D\n"
    );
    let (service, _mock) = service_with(vec![
        Route {
            url_contains: "feed/geo",
            status: 200,
            body: waqi_feed_body(40.0, r#""pm25":{"v":12.0}"#),
        },
        Route {
            url_contains: "firms.test",
            status: 200,
            body: fires,
        },
    ]);

    let alerts = service.active_alerts(34.05, -118.24, None).await.unwrap();
    // AQI of 40 produces no threshold alert; only the fire advisory remains.
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertType::Event);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert!(alerts[0].message.contains("2 active fires"));
}

#[tokio::test]
async fn alerts_use_location_name_override() {
    let (service, _mock) = service_with(vec![
        Route {
            url_contains: "feed/geo",
            status: 200,
            body: waqi_feed_body(120.0, r#""pm25":{"v":20.0}"#),
        },
        Route {
            url_contains: "firms.test",
            status: 200,
            body: format!("{FIRMS_HEADER}\n"),
        },
    ]);

    let alerts = service
        .active_alerts(34.05, -118.24, Some("Downtown"))
        .await
        .unwrap();
    assert_eq!(alerts[0].location.name, "Downtown");
}

#[tokio::test]
async fn current_weather_converts_units() {
    let body = r#"{"lat":34.05,"lon":-118.24,"current":{
        "dt":1705320000,"temp":293.15,"feels_like":291.15,"pressure":1013,
        "humidity":55,"uvi":4.2,"clouds":20,"visibility":10000,
        "wind_speed":10.0,"wind_deg":270,
        "weather":[{"id":802,"main":"Clouds","description":"scattered clouds","icon":"03d"}],
        "rain":{"1h":0.5}}}"#;
    let (service, _mock) = service_with(vec![Route {
        url_contains: "owm.test",
        status: 200,
        body: body.to_string(),
    }]);

    let weather = service.current_weather(34.05, -118.24).await.unwrap();
    assert!((weather.temperature - 20.0).abs() < 0.1);
    assert!((weather.wind_speed - 36.0).abs() < 0.1);
    assert_eq!(weather.precipitation, 0.5);
    assert_eq!(weather.conditions, "scattered clouds");
}

#[tokio::test]
async fn forecast_normalizes_rows() {
    let body = r#"[
        {"date":"2024-05-01 00:00:00","temperature_celsius":18.333,"dewpoint_celsius":11.97,
         "pressure_hpa":1013.249,"wind_speed":3.0,"precipitation_mm":0.04},
        {"date":"2024-05-02","temperature_celsius":19.0,"dewpoint_celsius":12.0,
         "pressure_hpa":1012.0,"wind_speed":2.5,"precipitation_mm":1.25}
    ]"#;
    let (service, _mock) = service_with(vec![Route {
        url_contains: "weather/forecast",
        status: 200,
        body: body.to_string(),
    }]);

    let days = service.weather_forecast().await.unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, "2024-05-01");
    assert_eq!(days[0].wind_speed, 10.8);
    assert_eq!(days[1].wind_speed, 9.0);
}

#[tokio::test]
async fn predictions_classify_each_day() {
    let body = r#"[
        {"date":"2024-05-01","AQI":42.2,"quality":"Good","NO2_ugm3":10.1,"CO_mgm3":0.4,
         "O3_ugm3":30.0,"SO2_ugm3":2.0,"aerosol_index":0.12},
        {"date":"2024-05-02 00:00:00","AQI":112.46,"quality":"Unhealthy for Sensitive Groups",
         "NO2_ugm3":23.456,"CO_mgm3":0.81,"O3_ugm3":64.02,"SO2_ugm3":4.449,"aerosol_index":0.4567}
    ]"#;
    let (service, _mock) = service_with(vec![Route {
        url_contains: "/predict",
        status: 200,
        body: body.to_string(),
    }]);

    let days = service.aqi_predictions().await.unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].category, AqiCategory::Good);
    assert_eq!(days[1].date, "2024-05-02");
    assert_eq!(days[1].category, AqiCategory::UnhealthySensitive);
    assert_eq!(days[1].aerosol_index, 0.46);
}

#[tokio::test]
async fn empty_prediction_series_is_not_found() {
    let (service, _mock) = service_with(vec![Route {
        url_contains: "/predict",
        status: 200,
        body: "[]".to_string(),
    }]);

    let err = service.aqi_predictions().await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound { .. }), "{err}");
}

#[tokio::test]
async fn city_search_maps_rows() {
    let body = r#"{"data":[
        {"id":3435910,"city":"Lima","name":"Lima","region":"Lima Province","country":"Peru",
         "countryCode":"PE","latitude":-12.05,"longitude":-77.04,"population":9751717}
    ]}"#;
    let (service, _mock) = service_with(vec![Route {
        url_contains: "geodb.test",
        status: 200,
        body: body.to_string(),
    }]);

    let cities = service.search_cities("Lim", 10, 0).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].name, "Lima");
    assert_eq!(cities[0].country_code, "PE");
}

#[tokio::test]
async fn reverse_lookup_with_no_match_is_not_found() {
    let (service, _mock) = service_with(vec![Route {
        url_contains: "geodb.test",
        status: 200,
        body: r#"{"data":[]}"#.to_string(),
    }]);

    let err = service.city_by_coordinates(0.0, 0.0, 50).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound { .. }), "{err}");
}
