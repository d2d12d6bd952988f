//! Per-provider authentication wrappers.
//!
//! Each upstream authenticates differently: WAQI and AirVisual take a query
//! parameter, OpenWeatherMap takes `appid`, GeoDB wants a RapidAPI header
//! pair, and FIRMS embeds its key in the URL path. The wrappers compose over
//! any [`HttpClient`](crate::fetch::HttpClient) so adapters stay unaware of
//! credential plumbing.

mod api_key;
mod url_param;

pub use api_key::ApiKey;
pub use url_param::UrlParam;
