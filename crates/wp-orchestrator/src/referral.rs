//! One-time referral notification
//!
//! The installer writes a referral-state file next to the rest of the
//! dashboard data. Once a wallet address exists, the generated event is
//! reported to the bounty service exactly once and the file is rewritten
//! with the sent flag set.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use wp_core::error::CoreError;
use wp_core::traits::{ReferralApi, WalletService};

/// File name of the referral state, relative to the data directory
pub const REFERRAL_FILE: &str = "referral.json";

/// Persisted referral state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralState {
    /// Referral code recorded at install time
    pub referral_code: String,
    /// Whether the generated event has already been reported
    #[serde(default)]
    pub is_generated_event_sent: bool,
}

/// Reads and rewrites the referral-state file
pub struct ReferralStore {
    path: PathBuf,
}

impl ReferralStore {
    /// Create a store over the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted state
    pub fn load(&self) -> Result<ReferralState, CoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rewrite the persisted state
    pub fn save(&self, state: &ReferralState) -> Result<(), CoreError> {
        std::fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }
}

/// Report the wallet-generated event at most once.
///
/// A state file with the sent flag already set results in no remote call
/// and no rewrite. A failed remote call leaves the flag unset so a later
/// trigger retries.
pub async fn send_generated_event(
    store: &ReferralStore,
    api: &dyn ReferralApi,
    wallet: &dyn WalletService,
) -> Result<(), CoreError> {
    let state = store.load()?;
    if state.is_generated_event_sent {
        tracing::debug!("Referral generated event already sent");
        return Ok(());
    }

    let address = wallet.address().await?;
    api.notify_generated(&state.referral_code, &address).await?;
    tracing::info!(
        "Reported referral generated event for code {}",
        state.referral_code
    );

    store.save(&ReferralState {
        is_generated_event_sent: true,
        ..state
    })
}
