//! Collaborator service boundaries

use async_trait::async_trait;

use crate::error::{CoreError, WalletError};

/// Local node API exposing the wallet address
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Resolve the wallet address. Cached by callers per polling session.
    async fn address(&self) -> Result<String, WalletError>;
}

/// Remote faucet: funding requests and balance queries
#[async_trait]
pub trait FaucetService: Send + Sync {
    /// Request funding for an address. Best-effort; callers swallow
    /// failures independently of the polling loop.
    async fn request_airdrop(&self, address: &str) -> Result<(), WalletError>;

    /// Query the current balance.
    ///
    /// A response that is not numeric maps to
    /// [`WalletError::MalformedBalance`] so callers can skip the update
    /// rather than treat it as zero.
    async fn balance(&self, address: &str) -> Result<f64, WalletError>;
}

/// Remote referral/bounty service
#[async_trait]
pub trait ReferralApi: Send + Sync {
    /// Report that a wallet was generated under a referral code.
    async fn notify_generated(&self, referral_code: &str, address: &str)
        -> Result<(), WalletError>;
}

/// Persisted identity and secret material
pub trait IdentityStore: Send + Sync {
    /// Read the persisted identifier.
    fn identifier(&self) -> Result<String, CoreError>;

    /// Erase persisted identity and secret material (log-out).
    fn clear(&self) -> Result<(), CoreError>;
}

/// Installed-version file reader
pub trait VersionReader: Send + Sync {
    /// The installed dashboard version string.
    fn dashboard_version(&self) -> Result<String, CoreError>;
}
