//! Dashboard configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! then environment variables (after loading `.env` if present). The API key
//! is read once at start-up and never rotated.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default snapshot endpoint.
pub const DEFAULT_BASE_URL: &str = "https://stock.indianapi.in/stock";

pub const ENV_API_KEY: &str = "STOCKDASH_API_KEY";
/// Accepted for `.env` files written for the browser build.
pub const ENV_API_KEY_LEGACY: &str = "REACT_APP_API_KEY";
pub const ENV_API_URL: &str = "STOCKDASH_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "STOCKDASH_TIMEOUT_SECS";
pub const ENV_EXPORT_DIR: &str = "STOCKDASH_EXPORT_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub export: ExportConfig,
}

/// Outbound API settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// `None` leaves the request unbounded.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Where exported CSV files land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document. Missing tables and keys take their defaults.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Full layered load: defaults, optional file, `.env`, process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        match dotenv::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) => tracing::debug!(error = %e, "no .env loaded"),
        }

        config.apply_env(|var| std::env::var(var).ok())?;

        if config.api.api_key.is_none() {
            tracing::warn!("no API key configured; fetches will fail until {ENV_API_KEY} is set");
        }
        Ok(config)
    }

    /// Override fields from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_LEGACY)) {
            self.api.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = get(ENV_API_URL) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            self.api.timeout_secs = if secs == 0 { None } else { Some(secs) };
        }
        if let Some(dir) = get(ENV_EXPORT_DIR) {
            self.export.dir = PathBuf::from(dir.trim());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.api_key, None);
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.export.dir, PathBuf::from("."));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml = r#"
            [api]
            timeout_secs = 10
        "#;
        let config = DashboardConfig::from_toml_str(toml, Path::new("x.toml")).unwrap();
        assert_eq!(config.api.timeout_secs, Some(10));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.export.dir, PathBuf::from("."));
    }

    #[test]
    fn bad_toml_names_the_file() {
        let err = DashboardConfig::from_toml_str("api = 3", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = DashboardConfig::default();
        config.api.base_url = "http://file".into();
        let vars = env(&[
            (ENV_API_KEY, " abc "),
            (ENV_API_URL, "http://env"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_EXPORT_DIR, "/tmp/out"),
        ]);
        config.apply_env(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("abc"));
        assert_eq!(config.api.base_url, "http://env");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.export.dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn legacy_key_is_a_fallback() {
        let mut config = DashboardConfig::default();
        let vars = env(&[(ENV_API_KEY_LEGACY, "legacy")]);
        config.apply_env(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("legacy"));

        let vars = env(&[(ENV_API_KEY_LEGACY, "legacy"), (ENV_API_KEY, "primary")]);
        config.apply_env(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let mut config = DashboardConfig::default();
        config.api.timeout_secs = Some(5);
        let vars = env(&[(ENV_TIMEOUT_SECS, "0")]);
        config.apply_env(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut config = DashboardConfig::default();
        let vars = env(&[(ENV_TIMEOUT_SECS, "soon")]);
        let err = config.apply_env(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_TIMEOUT_SECS, .. }));
    }

    #[test]
    fn debug_redacts_key() {
        let api = ApiConfig {
            api_key: Some("hunter2".into()),
            ..ApiConfig::default()
        };
        assert!(!format!("{api:?}").contains("hunter2"));
    }
}
