//! HTTP plumbing shared by every provider adapter.
//!
//! Adapters issue GET requests through the [`HttpClient`] trait so tests can
//! substitute canned responses. Status handling is uniform: non-success HTTP
//! statuses map onto the error taxonomy before any body decoding happens.

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use serde::de::DeserializeOwned;

use crate::error::{Provider, ProviderError};

/// Fetches `url` and decodes the JSON body into `T`.
///
/// # Errors
///
/// `Unavailable` on transport failure or non-2xx status (except 401/403 →
/// `Misconfigured`, 404 → `NotFound`), `Malformed` if the body does not
/// decode into `T`.
pub async fn get_json<C, T>(client: &C, provider: Provider, url: &str) -> Result<T, ProviderError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let resp = send_get(client, provider, url).await?;
    resp.json::<T>().await.map_err(|e| ProviderError::Malformed {
        provider,
        detail: e.to_string(),
    })
}

/// Fetches `url` and returns the body as text. Used for the CSV fire feed.
pub async fn get_text<C>(client: &C, provider: Provider, url: &str) -> Result<String, ProviderError>
where
    C: HttpClient + ?Sized,
{
    let resp = send_get(client, provider, url).await?;
    resp.text().await.map_err(|e| ProviderError::Malformed {
        provider,
        detail: e.to_string(),
    })
}

async fn send_get<C>(
    client: &C,
    provider: Provider,
    url: &str,
) -> Result<reqwest::Response, ProviderError>
where
    C: HttpClient + ?Sized,
{
    let url: reqwest::Url = url.parse().map_err(|e| ProviderError::Misconfigured {
        provider,
        detail: format!("invalid request url: {e}"),
    })?;

    let req = reqwest::Request::new(reqwest::Method::GET, url);
    let resp = client
        .execute(req)
        .await
        .map_err(|e| ProviderError::Unavailable {
            provider,
            detail: e.to_string(),
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderError::from_status(provider, status));
    }
    Ok(resp)
}
