//! HTTP collaborator clients
//!
//! Thin reqwest wrappers over the local node API and the remote faucet and
//! bounty services. These implement the boundary traits in
//! [`wp_core::traits`]; all orchestration logic stays upstream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use wp_core::error::WalletError;
use wp_core::traits::{FaucetService, ReferralApi, WalletService};

/// Local node API client (`GET /wallet/address`)
pub struct HttpWalletClient {
    base: String,
    http: Client,
    timeout: Duration,
}

#[derive(Deserialize)]
struct AddressEnvelope {
    data: AddressData,
}

#[derive(Deserialize)]
struct AddressData {
    address: String,
}

impl HttpWalletClient {
    /// Create a client for the node API at `base`
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base: base.into(),
            http: Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl WalletService for HttpWalletClient {
    async fn address(&self) -> Result<String, WalletError> {
        let url = format!("{}/wallet/address", self.base);
        let envelope: AddressEnvelope = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| WalletError::Address(e.to_string()))?
            .error_for_status()
            .map_err(|e| WalletError::Address(e.to_string()))?
            .json()
            .await
            .map_err(|e| WalletError::Address(e.to_string()))?;
        Ok(envelope.data.address)
    }
}

/// Remote faucet client (`GET /airdrop?address=`, `GET /balance?address=`)
pub struct HttpFaucetClient {
    base: String,
    http: Client,
    timeout: Duration,
}

#[derive(Deserialize)]
struct BalanceEnvelope {
    balance: Option<Value>,
}

impl HttpFaucetClient {
    /// Create a client for the faucet at `base`
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base: base.into(),
            http: Client::new(),
            timeout,
        }
    }
}

/// Interpret a balance response body.
///
/// Numbers and numeric strings are accepted; anything else is malformed
/// and must leave the caller's cached balance unchanged.
fn parse_balance(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[async_trait]
impl FaucetService for HttpFaucetClient {
    async fn request_airdrop(&self, address: &str) -> Result<(), WalletError> {
        let url = format!("{}/airdrop?address={}", self.base, address);
        self.http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| WalletError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| WalletError::Http(e.to_string()))?;
        Ok(())
    }

    async fn balance(&self, address: &str) -> Result<f64, WalletError> {
        let url = format!("{}/balance?address={}", self.base, address);
        let envelope: BalanceEnvelope = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| WalletError::Balance(e.to_string()))?
            .error_for_status()
            .map_err(|e| WalletError::Balance(e.to_string()))?
            .json()
            .await
            .map_err(|e| WalletError::Balance(e.to_string()))?;

        match parse_balance(envelope.balance.as_ref()) {
            Some(value) => Ok(value),
            None => Err(WalletError::MalformedBalance(format!(
                "{:?}",
                envelope.balance
            ))),
        }
    }
}

/// Remote bounty client (`GET /ref_success`)
pub struct HttpReferralClient {
    base: String,
    http: Client,
    timeout: Duration,
}

impl HttpReferralClient {
    /// Create a client for the bounty service at `base`
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base: base.into(),
            http: Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl ReferralApi for HttpReferralClient {
    async fn notify_generated(
        &self,
        referral_code: &str,
        address: &str,
    ) -> Result<(), WalletError> {
        let url = format!(
            "{}/ref_success?event=generated&ref={}&addr={}",
            self.base, referral_code, address
        );
        self.http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| WalletError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| WalletError::Http(e.to_string()))?;
        Ok(())
    }
}
