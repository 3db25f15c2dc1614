//! Bounded balance polling against the faucet
//!
//! The polling loop resolves the wallet address once, pushes an initial
//! `wallet:info` status regardless of value, and then alternates funding
//! requests and balance queries until a positive balance is observed or the
//! budget elapses.

use std::time::Duration;

use tokio::time::Instant;

use wp_core::error::WalletError;
use wp_core::events::{SurfaceEvent, WalletInfo};
use wp_core::traits::{FaucetService, UiSurface, WalletService};

/// Bounded-retry balance poller
pub struct BalancePoller {
    /// Total budget for one polling session
    timeout: Duration,
    /// Delay between balance retries
    retry_interval: Duration,
}

impl BalancePoller {
    /// Create a poller with the given budget and retry interval
    pub fn new(timeout: Duration, retry_interval: Duration) -> Self {
        Self {
            timeout,
            retry_interval,
        }
    }

    /// Poll until a positive balance is observed or the budget elapses.
    ///
    /// Pushes `wallet:info` once up front regardless of value and once more
    /// on success. Timeout is a terminal condition returned to the caller;
    /// the triggering channel has no reply path, so callers log it and push
    /// nothing further (the surface already shows the last observed
    /// non-positive balance).
    pub async fn run(
        &self,
        wallet: &dyn WalletService,
        faucet: &dyn FaucetService,
        surface: &dyn UiSurface,
    ) -> Result<f64, WalletError> {
        let start = Instant::now();

        tracing::info!("Resolving wallet address");
        let address = wallet.address().await?;

        let mut balance = 0.0;
        self.check_balance(faucet, &address, &mut balance).await;

        surface.send(SurfaceEvent::WalletInfo(WalletInfo {
            balance,
            address: address.clone(),
        }));

        while balance <= 0.0 {
            if start.elapsed() > self.timeout {
                tracing::error!(
                    "Could not get positive wallet balance within {:?}",
                    self.timeout
                );
                return Err(WalletError::FundingTimeout(self.timeout));
            }

            self.request_airdrop(faucet, &address).await;
            tokio::time::sleep(self.retry_interval).await;
            self.check_balance(faucet, &address, &mut balance).await;
        }

        surface.send(SurfaceEvent::WalletInfo(WalletInfo { balance, address }));
        Ok(balance)
    }

    /// Best-effort funding request; its failures never abort the loop.
    async fn request_airdrop(&self, faucet: &dyn FaucetService, address: &str) {
        tracing::info!("Requesting airdrop for {}", address);
        if let Err(e) = faucet.request_airdrop(address).await {
            tracing::error!("Airdrop request failed: {}", e);
        }
    }

    /// Query the balance, keeping the previous value on failure or on a
    /// malformed response.
    async fn check_balance(&self, faucet: &dyn FaucetService, address: &str, balance: &mut f64) {
        tracing::info!("Checking wallet balance for {}", address);
        match faucet.balance(address).await {
            Ok(value) => {
                tracing::info!("Balance: {}", value);
                *balance = value;
            }
            Err(e) => tracing::error!("Balance query failed: {}", e),
        }
    }
}
