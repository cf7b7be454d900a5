//! Conversions: wire types ↔ inscription domain types.

use super::wire;
use super::{CommitPsbt, InscriptionRequest};
use crate::wallet::WalletAccounts;

impl From<wire::CreateInscriptionResponse> for CommitPsbt {
    fn from(resp: wire::CreateInscriptionResponse) -> Self {
        CommitPsbt {
            psbt_hex: resp.psbt_hex,
            psbt_base64: resp.psbt_base64,
            total_fees: resp.total_fees,
            inscriber_address: resp.inscriber_address,
        }
    }
}

impl wire::CreateInscriptionRequest {
    pub(crate) fn new(request: &InscriptionRequest, accounts: &WalletAccounts) -> Self {
        Self {
            content: request.content.clone(),
            payment_address: accounts.payment_address.clone(),
            payment_public_key: accounts.payment_public_key.clone(),
            fee_rate: request.fee_rate,
            mime_type: request.mime_type.clone(),
        }
    }
}
