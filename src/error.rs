//! Unified SDK error types.

use thiserror::Error;

use crate::shared::{Field, TxId};

/// Top-level error for every inscription, commit and wallet operation.
#[derive(Error, Debug)]
pub enum InscribeError {
    #[error("missing {0}")]
    MissingField(Field),

    #[error("missing commit PSBT")]
    MissingPsbt,

    #[error("commit request failed: {0}")]
    CommitRequest(#[source] HttpError),

    #[error("failed to broadcast commit: wallet returned no transaction id")]
    BroadcastFailed,

    #[error("missing commit transaction id")]
    MissingCommitId,

    #[error("inscription request failed (commit {commit_tx_id}): {source}")]
    InscriptionRequest {
        commit_tx_id: TxId,
        #[source]
        source: HttpError,
    },

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("an inscription is already in flight")]
    AlreadyInFlight,

    #[error("inscription timed out{}", commit_suffix(.commit_tx_id))]
    TimedOut { commit_tx_id: Option<TxId> },

    #[error("commit {commit_tx_id} not visible after {attempts} explorer checks")]
    PropagationTimeout { commit_tx_id: TxId, attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl InscribeError {
    /// The commit transaction id that was already broadcast when this error
    /// was raised, if any. Resubmit with it instead of signing a new commit.
    pub fn commit_tx_id(&self) -> Option<&TxId> {
        match self {
            Self::InscriptionRequest { commit_tx_id, .. }
            | Self::PropagationTimeout { commit_tx_id, .. } => Some(commit_tx_id),
            Self::TimedOut { commit_tx_id } => commit_tx_id.as_ref(),
            _ => None,
        }
    }

    /// Expected user-driven outcomes (declined signature, not enough funds).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Wallet(WalletError::Rejected(_))
                | Self::Wallet(WalletError::InsufficientFunds { .. })
                | Self::AlreadyInFlight
        )
    }
}

fn commit_suffix(commit_tx_id: &Option<TxId>) -> String {
    match commit_tx_id {
        Some(id) => format!(" after commit {}", id),
        None => String::new(),
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Errors surfaced by a wallet provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined a connection or signature request.
    #[error("request rejected by user: {0}")]
    Rejected(String),

    #[error("wallet not connected")]
    NotConnected,

    #[error("Insufficient funds: need {required} sats, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("network not supported by wallet: {0}")]
    UnsupportedNetwork(String),

    #[error("{0}")]
    Provider(String),
}
