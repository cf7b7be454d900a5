//! Wallet provider seam: the external browser/extension wallet.
//!
//! Address derivation, PSBT signing, UTXO selection and broadcast all happen
//! inside the wallet. The SDK only talks to it through [`WalletProvider`];
//! bindings for a concrete extension (Unisat, Xverse, ...) implement the trait.
//!
//! [`client::Wallet`] wraps the provider with the checks the UI relies on
//! (insufficient funds, session invalidation on account changes).

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::shared::{Network, TxId};

// ─── WalletId ────────────────────────────────────────────────────────────────

/// Identifier passed to [`WalletProvider::connect`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WalletId {
    Unisat,
    Xverse,
    Oyl,
    Leather,
    MagicEden,
    Okx,
    Phantom,
    Wizz,
    Other(String),
}

impl WalletId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unisat => "unisat",
            Self::Xverse => "xverse",
            Self::Oyl => "oyl",
            Self::Leather => "leather",
            Self::MagicEden => "magic-eden",
            Self::Okx => "okx",
            Self::Phantom => "phantom",
            Self::Wizz => "wizz",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for WalletId {
    fn from(s: &str) -> Self {
        match s {
            "unisat" => Self::Unisat,
            "xverse" => Self::Xverse,
            "oyl" => Self::Oyl,
            "leather" => Self::Leather,
            "magic-eden" => Self::MagicEden,
            "okx" => Self::Okx,
            "phantom" => Self::Phantom,
            "wizz" => Self::Wizz,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for WalletId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<WalletId> for String {
    fn from(id: WalletId) -> Self {
        id.as_str().to_string()
    }
}

impl std::fmt::Display for WalletId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Account / balance types ─────────────────────────────────────────────────

/// Addresses and keys exposed by a connected wallet. Empty strings mean
/// "not connected" or "not provided by this wallet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccounts {
    /// Ordinals (taproot) address: receives inscriptions.
    pub address: String,
    pub public_key: String,
    /// Funding address: pays commit fees.
    pub payment_address: String,
    pub payment_public_key: String,
}

impl WalletAccounts {
    pub fn is_connected(&self) -> bool {
        !self.address.is_empty() || !self.payment_address.is_empty()
    }
}

/// Wallet balance in sats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub confirmed: u64,
    pub unconfirmed: u64,
    pub total: u64,
}

/// Result of a PSBT signing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPsbt {
    pub signed_psbt_hex: Option<String>,
    pub signed_psbt_base64: Option<String>,
    /// Set when the wallet also broadcast the transaction.
    pub tx_id: Option<TxId>,
}

// ─── WalletProvider ──────────────────────────────────────────────────────────

/// An abstraction over a connected Bitcoin wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn connect(&self, wallet: &WalletId) -> Result<(), WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Current addresses and public keys.
    fn accounts(&self) -> WalletAccounts;

    fn network(&self) -> Network;

    async fn balance(&self) -> Result<Balance, WalletError>;

    /// Sign a PSBT given as hex or base64. With `finalize` the inputs are
    /// finalized; with `broadcast` the wallet also pushes the transaction and
    /// reports its id.
    async fn sign_psbt(
        &self,
        psbt: &str,
        finalize: bool,
        broadcast: bool,
    ) -> Result<SignedPsbt, WalletError>;

    /// Sign an arbitrary message and return the signature string.
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;

    async fn send_btc(&self, to: &str, amount_sats: u64) -> Result<TxId, WalletError>;

    async fn switch_network(&self, network: Network) -> Result<(), WalletError>;
}
