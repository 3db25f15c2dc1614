//! Core error types for the Waypoint dashboard

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::types::SubsystemKind;

/// Top-level error type for the dashboard backend
#[derive(Error, Debug)]
pub enum CoreError {
    /// Subsystem lifecycle error
    #[error("Subsystem error: {0}")]
    Subsystem(#[from] SubsystemError),

    /// Wallet or faucet error
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Subsystem lifecycle errors
#[derive(Error, Debug)]
pub enum SubsystemError {
    /// The handle slot for this subsystem was never created, or the session
    /// holding it has already been torn down
    #[error("{0} subsystem not initialized")]
    NotInitialized(SubsystemKind),

    /// Launch failed
    #[error("{kind} launch failed: {reason}")]
    Launch {
        kind: SubsystemKind,
        reason: String,
    },

    /// Stop failed with a genuine I/O error (already-stopped is not an error)
    #[error("{kind} stop failed: {reason}")]
    Stop {
        kind: SubsystemKind,
        reason: String,
    },

    /// The subsystem does not implement this operation
    #[error("{kind} does not support {operation}")]
    Unsupported {
        kind: SubsystemKind,
        operation: &'static str,
    },
}

/// Wallet and faucet errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// The local node did not return a wallet address
    #[error("Failed to resolve wallet address: {0}")]
    Address(String),

    /// Balance query failed
    #[error("Balance query failed: {0}")]
    Balance(String),

    /// The balance response body was not numeric
    #[error("Unexpected balance response: {0}")]
    MalformedBalance(String),

    /// The polling budget elapsed without observing a positive balance
    #[error("Could not get positive wallet balance within {0:?}")]
    FundingTimeout(Duration),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
