//! Shared newtypes and small enums used across all modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw strings the inscription service and wallets exchange.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── TxId ────────────────────────────────────────────────────────────────────

/// Newtype for a Bitcoin transaction id as reported by a wallet or the
/// inscription service (hex string, not parsed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TxId(String);

impl TxId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `None` for blank ids, which wallets sometimes return instead of an error.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TxId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TxId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for TxId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TxId(s.to_string()))
    }
}

impl Serialize for TxId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(TxId(s))
    }
}

// ─── Network ─────────────────────────────────────────────────────────────────

/// Bitcoin network a wallet is connected to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// mempool.space base URL for this network.
    pub fn mempool_url(&self) -> &'static str {
        match self {
            Self::Mainnet => crate::network::MEMPOOL_MAINNET_URL,
            Self::Testnet => crate::network::MEMPOOL_TESTNET_URL,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "bitcoin" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

// ─── Field ───────────────────────────────────────────────────────────────────

/// Request fields that must be present before a network call is made.
///
/// `Display` uses the camelCase names of the inscription service payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Content,
    MimeType,
    FeeRate,
    PaymentAddress,
    PaymentPublicKey,
    OrdinalAddress,
    CommitTxId,
    RecipientAddress,
    Amount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::MimeType => "mimeType",
            Self::FeeRate => "feeRate",
            Self::PaymentAddress => "paymentAddress",
            Self::PaymentPublicKey => "paymentPublicKey",
            Self::OrdinalAddress => "address",
            Self::CommitTxId => "commitTxId",
            Self::RecipientAddress => "recipient address",
            Self::Amount => "amount",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Return `value` if it holds more than whitespace, otherwise fail with
/// `MissingField(field)`.
pub fn require<'a>(
    value: Option<&'a str>,
    field: Field,
) -> Result<&'a str, crate::error::InscribeError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(crate::error::InscribeError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_id_serde() {
        let id = TxId::from("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: TxId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_blank_tx_id_is_none() {
        assert!(TxId::from("  ").non_empty().is_none());
        assert_eq!(
            TxId::from("abc123").non_empty(),
            Some(TxId::from("abc123"))
        );
    }

    #[test]
    fn test_network_serde_and_urls() {
        let n: Network = serde_json::from_str("\"testnet\"").unwrap();
        assert_eq!(n, Network::Testnet);
        assert_eq!(Network::Mainnet.mempool_url(), "https://mempool.space");
        assert_eq!(Network::Testnet.mempool_url(), "https://mempool.space/testnet");
        assert_eq!("TEST".parse::<Network>(), Ok(Network::Testnet));
        assert!("regtest".parse::<Network>().is_err());
    }

    #[test]
    fn test_require_rejects_blank() {
        use crate::error::InscribeError;

        assert_eq!(require(Some("hello"), Field::Content).unwrap(), "hello");
        assert!(matches!(
            require(Some("   "), Field::Content),
            Err(InscribeError::MissingField(Field::Content))
        ));
        assert!(matches!(
            require(None, Field::MimeType),
            Err(InscribeError::MissingField(Field::MimeType))
        ));
    }
}
