//! Snapshot provider trait and structured error types.
//!
//! The SnapshotProvider trait abstracts over where snapshots come from (the
//! HTTP API, a fixture file, a mock in tests) so the fetch controller never
//! touches the network directly.

use thiserror::Error;

use crate::snapshot::StockSnapshot;
use crate::ticker::Ticker;

/// Structured error types for fetch operations.
///
/// These are designed to be displayable in both CLI and TUI contexts; the
/// controller embeds the `Display` text in the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),

    #[error("request failed with status code {status} ({reason})")]
    Http { status: u16, reason: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("no API key configured (set STOCKDASH_API_KEY)")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Coarse category for error history display.
    pub fn category(&self) -> &'static str {
        match self {
            FetchError::Network(_) | FetchError::Http { .. } | FetchError::Client(_) => "network",
            FetchError::Decode(_) => "data",
            FetchError::MissingApiKey => "config",
        }
    }
}

/// Trait for snapshot sources.
///
/// `Ok(None)` means the request succeeded but carried no usable body.
pub trait SnapshotProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the snapshot for one ticker.
    fn fetch(&self, ticker: &Ticker) -> Result<Option<StockSnapshot>, FetchError>;
}

impl<P: SnapshotProvider + ?Sized> SnapshotProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, ticker: &Ticker) -> Result<Option<StockSnapshot>, FetchError> {
        (**self).fetch(ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status() {
        let err = FetchError::Http {
            status: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status code 404 (Not Found)"
        );
        assert_eq!(err.category(), "network");
    }

    #[test]
    fn network_error_is_passed_through_verbatim() {
        let err = FetchError::Network("timeout".into());
        assert_eq!(err.to_string(), "timeout");
    }
}
