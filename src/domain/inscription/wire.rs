//! Wire types for the inscription service (`/create-inscription`, `/inscribe`)
//! and the mempool explorer status lookup.

use crate::shared::TxId;
use serde::{Deserialize, Serialize};

// ─── POST /create-inscription ────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInscriptionRequest {
    pub content: String,
    pub payment_address: String,
    pub payment_public_key: String,
    pub fee_rate: u64,
    pub mime_type: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInscriptionResponse {
    pub psbt_hex: String,
    pub psbt_base64: String,
    #[serde(default)]
    pub total_fees: u64,
    #[serde(default)]
    pub inscriber_address: String,
}

// ─── POST /inscribe ──────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InscribeRequest {
    pub content: String,
    pub mime_type: String,
    pub ordinal_address: String,
    pub commit_tx_id: TxId,
}

// ─── GET {mempool}/api/tx/{txid}/status ──────────────────────────────────────

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub block_time: Option<u64>,
}

/// The inscribe endpoint answers with the reveal txid, either as a JSON string
/// or as a bare text body.
pub fn parse_inscription_tx_id(body: &str) -> Option<TxId> {
    let id = serde_json::from_str::<String>(body)
        .unwrap_or_else(|_| body.trim().to_string());
    TxId::from(id).non_empty()
}
