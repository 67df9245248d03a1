//! Stockdash Core — snapshot model, fetch controller, presentation normalizer.
//!
//! This crate contains everything the dashboard shows, minus the terminal:
//! - Lenient snapshot model for a partially-populated API payload
//! - Provider trait and the blocking HTTP provider
//! - Fetch controller state machine with stale-response rejection
//! - Pure derivations: cards, financial lookups, change classes, price series
//! - Peer comparison CSV export
//! - Layered configuration (defaults, TOML, environment)

pub mod config;
pub mod controller;
pub mod data;
pub mod export;
pub mod present;
pub mod snapshot;
pub mod ticker;

pub use config::{ApiConfig, DashboardConfig, ExportConfig};
pub use controller::{fetch_once, FetchAction, FetchRequest, FetchState, Phase};
pub use data::{FetchError, IndianApiProvider, SnapshotProvider};
pub use export::{peer_csv, peer_csv_filename, save_peer_csv, ExportError};
pub use present::{classify_change, financial_value, ChangeClass, FinancialMetric, PriceSeries};
pub use snapshot::StockSnapshot;
pub use ticker::Ticker;
