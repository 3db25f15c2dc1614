//! Events pushed from the orchestrator to the UI surface
//!
//! Pushed events are JSON-encoded. Payload structs use camelCase field
//! names to match what the front-end reads off the channel.

use serde::{Deserialize, Serialize};

use crate::channels;

/// Wallet status payload pushed on `wallet:info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    /// Last observed balance
    pub balance: f64,
    /// Wallet address, resolved once per polling session
    pub address: String,
}

/// Event pushed from the orchestrator to the UI surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Shutdown has begun (`app:closed`)
    Closed,

    /// Wallet status (`wallet:info`)
    WalletInfo(WalletInfo),

    /// Installed dashboard version (`app:version`)
    Version { version: String },

    /// Persisted identifier (`app:identifier`)
    Identifier { identifier: String },
}

impl SurfaceEvent {
    /// The channel this event is delivered on
    pub fn channel(&self) -> &'static str {
        match self {
            SurfaceEvent::Closed => channels::APP_CLOSED,
            SurfaceEvent::WalletInfo(_) => channels::WALLET_INFO,
            SurfaceEvent::Version { .. } => channels::APP_VERSION,
            SurfaceEvent::Identifier { .. } => channels::APP_IDENTIFIER,
        }
    }
}
