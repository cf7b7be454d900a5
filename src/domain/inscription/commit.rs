//! Commits sub-client: request the unsigned commit PSBT, then have the wallet
//! sign and broadcast it.

use super::wire::CreateInscriptionRequest;
use super::{CommitPsbt, InscriptionRequest, SignedCommit};
use crate::client::{FlightGuard, InscriberClient};
use crate::error::InscribeError;
use crate::shared::{require, Field, TxId};

pub struct Commits<'a> {
    pub(crate) client: &'a InscriberClient,
}

impl<'a> Commits<'a> {
    /// Request a commit PSBT for the content, mime type and fee rate held in
    /// the session.
    pub async fn request_psbt(&self) -> Result<CommitPsbt, InscribeError> {
        let request = {
            let session = self.client.session.read().await;
            InscriptionRequest {
                content: session.content().to_string(),
                mime_type: session.mime_type().to_string(),
                fee_rate: session.fee_rate(),
            }
        };
        self.request_psbt_for(&request).await
    }

    /// Request a commit PSBT for an explicit request, paid from the wallet's
    /// payment account.
    ///
    /// Every field is checked before the service is called. On success the
    /// PSBT encodings, total fees and inscriber address are recorded in the
    /// session, tied to the wallet address current at request time.
    pub async fn request_psbt_for(
        &self,
        request: &InscriptionRequest,
    ) -> Result<CommitPsbt, InscribeError> {
        self.client.sync_wallet_address().await;
        let accounts = self.client.wallet.accounts();

        require(Some(request.content.as_str()), Field::Content)?;
        require(Some(accounts.payment_address.as_str()), Field::PaymentAddress)?;
        require(Some(accounts.payment_public_key.as_str()), Field::PaymentPublicKey)?;
        if request.fee_rate == 0 {
            return Err(InscribeError::MissingField(Field::FeeRate));
        }
        require(Some(request.mime_type.as_str()), Field::MimeType)?;

        let _guard = FlightGuard::acquire(&self.client.in_flight.fetching_commit)?;

        let body = CreateInscriptionRequest::new(request, &accounts);
        tracing::debug!(
            fee_rate = request.fee_rate,
            mime_type = %request.mime_type,
            payment_address = %accounts.payment_address,
            "Requesting commit PSBT"
        );
        let commit: CommitPsbt = match self.client.api.create_inscription(&body).await {
            Ok(resp) => resp.into(),
            Err(e) => {
                tracing::warn!(error = %e, "Commit PSBT request failed");
                return Err(InscribeError::CommitRequest(e));
            }
        };

        tracing::info!(
            total_fees = commit.total_fees,
            inscriber_address = %commit.inscriber_address,
            "Commit PSBT received"
        );
        self.client
            .update_session(|s| s.record_commit_psbt(&commit))
            .await;

        Ok(commit)
    }

    /// Sign and broadcast a commit PSBT through the wallet.
    ///
    /// Uses `psbt` when given, otherwise the hex PSBT from the last
    /// [`request_psbt`](Self::request_psbt). Wallet errors (including the user
    /// declining) are returned unchanged and never retried.
    pub async fn sign(&self, psbt: Option<&str>) -> Result<SignedCommit, InscribeError> {
        self.client.sync_wallet_address().await;
        let to_sign = match psbt {
            Some(p) => p.to_string(),
            None => self.client.session.read().await.commit_psbt_hex().to_string(),
        };
        if to_sign.trim().is_empty() {
            return Err(InscribeError::MissingPsbt);
        }

        let signed = self.client.wallet.sign_psbt(&to_sign, true, true).await?;
        let tx_id = signed.tx_id.and_then(TxId::non_empty);

        match &tx_id {
            Some(id) => tracing::info!(commit_tx_id = %id, "Commit broadcast"),
            None => tracing::warn!("Wallet signed the commit but reported no transaction id"),
        }
        self.client
            .update_session(|s| s.set_commit_tx_id(tx_id.clone()))
            .await;

        Ok(SignedCommit { tx_id })
    }
}
