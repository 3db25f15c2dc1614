//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the dashboard backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the local node API (wallet address lookups)
    pub wallet_api_base: String,

    /// Base URL of the remote faucet service (airdrop and balance)
    pub faucet_base: String,

    /// Base URL of the remote referral/bounty service
    pub referral_base: String,

    /// Budget for the balance polling loop
    #[serde(with = "duration_secs")]
    pub balance_timeout: Duration,

    /// Delay between balance retries
    #[serde(with = "duration_secs")]
    pub balance_retry_interval: Duration,

    /// Per-request timeout for collaborator HTTP calls
    #[serde(with = "duration_secs")]
    pub http_timeout: Duration,

    /// Directory holding persisted dashboard state (referral file, identity)
    pub data_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            wallet_api_base: "http://127.0.0.1:2468/v1/api".to_string(),
            faucet_base: "https://faucet.waypoint.network".to_string(),
            referral_base: "https://bounty.waypoint.network".to_string(),
            balance_timeout: Duration::from_secs(120),
            balance_retry_interval: Duration::from_secs(10),
            http_timeout: Duration::from_secs(30),
            data_dir: default_data_dir(),
        }
    }
}

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("waypoint")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("dashboard.toml")
}

/// Get the default data directory (persisted dashboard state)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("waypoint")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

// Helper module for Duration serialization as whole seconds
mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_polling_budget() {
        let config = DashboardConfig::default();
        assert_eq!(config.balance_timeout, Duration::from_secs(120));
        assert_eq!(config.balance_retry_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DashboardConfig =
            toml::from_str("faucet_base = \"http://127.0.0.1:9999\"").unwrap();
        assert_eq!(config.faucet_base, "http://127.0.0.1:9999");
        assert_eq!(config.wallet_api_base, "http://127.0.0.1:2468/v1/api");
        assert_eq!(config.balance_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_duration_round_trip() {
        let config = DashboardConfig {
            balance_timeout: Duration::from_secs(45),
            ..Default::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let decoded: DashboardConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(decoded.balance_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let result: Result<DashboardConfig, _> = load_config(&path);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "balance_retry_interval = 3\n").unwrap();
        let config: DashboardConfig = load_config(&path).unwrap();
        assert_eq!(config.balance_retry_interval, Duration::from_secs(3));
    }
}
