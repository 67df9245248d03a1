//! Indian stock API provider.
//!
//! Issues `GET <base_url>?name=<ticker>` with a static `X-Api-Key` header and
//! decodes the body as a [`StockSnapshot`]. One request per fetch: there is no
//! retry, and no timeout unless one is configured.

use std::fmt;
use std::time::Duration;

use super::provider::{FetchError, SnapshotProvider};
use crate::config::ApiConfig;
use crate::snapshot::StockSnapshot;
use crate::ticker::Ticker;

/// Header carrying the static credential.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Provider backed by the blocking reqwest client.
pub struct IndianApiProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl fmt::Debug for IndianApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndianApiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl IndianApiProvider {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        // The blocking client defaults to a 30s timeout; pass the configured
        // value (or None) explicitly.
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .user_agent(concat!("stockdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SnapshotProvider for IndianApiProvider {
    fn name(&self) -> &str {
        "indianapi"
    }

    fn fetch(&self, ticker: &Ticker) -> Result<Option<StockSnapshot>, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        tracing::info!(provider = self.name(), %ticker, "fetching snapshot");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("name", ticker.as_str())])
            .header(API_KEY_HEADER, api_key)
            .send()
            .map_err(|e| {
                let err = transport_error(e);
                tracing::debug!(%ticker, error = %err, "snapshot request failed");
                err
            })?;

        let status = resp.status();
        if !status.is_success() {
            let err = FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            };
            tracing::debug!(%ticker, error = %err, "snapshot request rejected");
            return Err(err);
        }

        let body = resp.text().map_err(|e| {
            let err = FetchError::Network(format!("failed to read response body: {}", e.without_url()));
            tracing::debug!(%ticker, error = %err, "snapshot body unreadable");
            err
        })?;

        let snapshot = StockSnapshot::from_body(&body).map_err(|err| {
            tracing::debug!(%ticker, error = %err, "snapshot body undecodable");
            err
        })?;

        tracing::info!(%ticker, found = snapshot.is_some(), bytes = body.len(), "snapshot fetched");
        Ok(snapshot)
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Network(format!("timeout: {}", e.without_url()))
    } else if e.is_builder() {
        FetchError::Client(e.without_url().to_string())
    } else {
        FetchError::Network(e.without_url().to_string())
    }
}
