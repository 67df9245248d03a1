//! Snapshot sources

pub mod indianapi;
pub mod provider;

pub use indianapi::{IndianApiProvider, API_KEY_HEADER};
pub use provider::{FetchError, SnapshotProvider};
