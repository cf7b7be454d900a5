//! Inscription domain: commit PSBT, signed commit, inscription result, and
//! the staged sequence that ties them together.

pub mod api;
pub mod client;
pub mod commit;
mod convert;
pub mod propagation;
pub mod state;
pub mod wire;

use crate::shared::TxId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use api::{InscriptionApi, TxVisibility};
pub use propagation::PropagationPolicy;
pub use state::{InscriptionSession, SessionDefaults, SessionEvent};

// ─── InscriptionRequest ──────────────────────────────────────────────────────

/// What to inscribe and at which fee rate. Built from caller input and not
/// modified once handed to the commit requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InscriptionRequest {
    pub content: String,
    pub mime_type: String,
    /// sat/vByte
    pub fee_rate: u64,
}

// ─── CommitPsbt ──────────────────────────────────────────────────────────────

/// Unsigned commit transaction returned by the inscription service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitPsbt {
    pub psbt_hex: String,
    pub psbt_base64: String,
    /// Total fees in sats for commit + reveal.
    pub total_fees: u64,
    /// Address the commit output pays; the service spends it in the reveal.
    pub inscriber_address: String,
}

// ─── SignedCommit ────────────────────────────────────────────────────────────

/// Outcome of signing + broadcasting the commit PSBT. The wallet may report
/// success without a transaction id; the sequence treats that as a failed
/// broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedCommit {
    pub tx_id: Option<TxId>,
}

// ─── Inscription ─────────────────────────────────────────────────────────────

/// Terminal artifact of a completed inscribe sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inscription {
    pub inscription_tx_id: TxId,
    pub commit_tx_id: TxId,
    pub completed_at: DateTime<Utc>,
}

// ─── InscribeArgs ────────────────────────────────────────────────────────────

/// Per-call overrides for `inscribe`. Unset fields fall back to the session
/// (content, mime type, commit tx id) and the wallet (ordinal address).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InscribeArgs {
    pub content: Option<String>,
    pub mime_type: Option<String>,
    pub ordinal_address: Option<String>,
    pub commit_tx_id: Option<TxId>,
}

impl InscribeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn ordinal_address(mut self, address: impl Into<String>) -> Self {
        self.ordinal_address = Some(address.into());
        self
    }

    /// Reuse an already broadcast commit; skips commit request and signing.
    pub fn commit_tx_id(mut self, tx_id: impl Into<TxId>) -> Self {
        self.commit_tx_id = Some(tx_id.into());
        self
    }
}

// ─── InscribeStage ───────────────────────────────────────────────────────────

/// Progress of the inscribe sequence.
///
/// `Idle → AwaitingCommit → AwaitingBroadcastConfirmation → AwaitingInscription → Complete`,
/// with `Failed` reachable from any non-terminal stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InscribeStage {
    #[default]
    Idle,
    AwaitingCommit,
    AwaitingBroadcastConfirmation,
    AwaitingInscription,
    Complete,
    Failed,
}

impl InscribeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingCommit => "awaiting_commit",
            Self::AwaitingBroadcastConfirmation => "awaiting_broadcast_confirmation",
            Self::AwaitingInscription => "awaiting_inscription",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }

    /// Whether a sequence is currently between `Idle` and a terminal stage.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::AwaitingCommit | Self::AwaitingBroadcastConfirmation | Self::AwaitingInscription
        )
    }
}

impl std::fmt::Display for InscribeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
