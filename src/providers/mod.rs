//! One adapter per upstream provider.
//!
//! Each adapter issues a single HTTP call through the [`crate::fetch`] layer
//! and maps the provider's wire shape onto the unified domain model. Wire
//! schemas are explicit serde structs validated at the boundary; a shape
//! mismatch fails with `Malformed` instead of propagating missing fields
//! downstream. Normalization is split into pure functions so it can be
//! tested without HTTP.

pub mod airvisual;
pub mod firms;
pub mod geodb;
pub mod ica_predict;
pub mod openweather;
pub mod waqi;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

/// Parses the timestamp strings the air-quality providers emit: RFC 3339
/// from AirVisual, `YYYY-MM-DD HH:MM:SS` from WAQI. Falls back to the fetch
/// time when neither matches; a bad timestamp alone should not discard an
/// otherwise usable reading.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|n| n.and_utc())
        })
        .unwrap_or_else(|_| {
            debug!(raw, "unparseable upstream timestamp, using fetch time");
            Utc::now()
        })
}
