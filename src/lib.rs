//! Server-side aggregation core for an air-quality dashboard.
//!
//! Pulls current readings, forecasts, station listings, city lookups, and a
//! satellite fire feed from several third-party APIs, normalizes them into
//! one domain model, applies primary→fallback ordering for the current-AQI
//! path, and synthesizes advisory alerts. Everything is request/response:
//! no background workers, no cross-request state.

pub mod alerts;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod providers;
pub mod service;
