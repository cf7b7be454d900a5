//! Inscriptions sub-client: submit an inscription for a broadcast commit, and
//! the full commit → sign → wait → inscribe sequence.

use std::time::Duration;

use chrono::Utc;
use futures_util::future::{self, Either};

use super::propagation::wait_for_propagation;
use super::wire::InscribeRequest;
use super::{InscribeArgs, InscribeStage, Inscription, InscriptionRequest};
use crate::client::{FlightGuard, InscriberClient};
use crate::error::InscribeError;
use crate::shared::{require, Field, TxId};

pub struct Inscriptions<'a> {
    pub(crate) client: &'a InscriberClient,
}

/// Fields the sequence settled on before touching the network.
struct Resolved {
    content: String,
    mime_type: String,
    ordinal_address: String,
    fee_rate: u64,
    commit_tx_id: Option<TxId>,
}

impl<'a> Inscriptions<'a> {
    /// `POST /inscribe` for an already broadcast commit.
    ///
    /// All four fields are required. On success the inscription transaction
    /// id is recorded in the session. Failures are not retried.
    pub async fn submit(
        &self,
        content: &str,
        mime_type: &str,
        ordinal_address: &str,
        commit_tx_id: &TxId,
    ) -> Result<TxId, InscribeError> {
        require(Some(content), Field::Content)?;
        require(Some(mime_type), Field::MimeType)?;
        require(Some(ordinal_address), Field::OrdinalAddress)?;
        require(Some(commit_tx_id.as_str()), Field::CommitTxId)?;

        let request = InscribeRequest {
            content: content.to_string(),
            mime_type: mime_type.to_string(),
            ordinal_address: ordinal_address.to_string(),
            commit_tx_id: commit_tx_id.clone(),
        };
        tracing::debug!(%commit_tx_id, ordinal_address, "Submitting inscription");

        let inscription_tx_id = self.client.api.inscribe(&request).await.map_err(|e| {
            tracing::warn!(%commit_tx_id, error = %e, "Inscription request failed");
            InscribeError::InscriptionRequest {
                commit_tx_id: commit_tx_id.clone(),
                source: e,
            }
        })?;

        tracing::info!(%commit_tx_id, %inscription_tx_id, "Inscription submitted");
        self.client
            .update_session(|s| s.record_inscription(inscription_tx_id.clone()))
            .await;

        Ok(inscription_tx_id)
    }

    /// Run the whole inscription sequence.
    ///
    /// 1. Resolve content, mime type and ordinal address from `args`, the
    ///    session, and the wallet.
    /// 2. Without a known commit tx id: request the commit PSBT, sign and
    ///    broadcast it. A commit id in `args` always counts as known. The
    ///    session's commit id counts only while no inscription has been
    ///    recorded for it; once one has, that commit is spent and a new one
    ///    is requested and paid for.
    /// 3. Wait for propagation (blind 10 s delay unless configured otherwise).
    /// 4. Submit the inscription referencing the commit.
    ///
    /// Only one sequence runs per client; a second concurrent call fails with
    /// [`InscribeError::AlreadyInFlight`]. A failure after the commit was
    /// broadcast leaves the commit tx id in the session and on the error.
    pub async fn inscribe(&self, args: InscribeArgs) -> Result<Inscription, InscribeError> {
        let _guard = FlightGuard::acquire(&self.client.in_flight.inscribing)?;

        let result = self.run(args).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, commit_tx_id = ?e.commit_tx_id(), "Inscribe failed");
            self.client.set_stage(InscribeStage::Failed).await;
        }
        result
    }

    /// [`inscribe`](Self::inscribe) with a deadline for the whole sequence.
    ///
    /// When the deadline passes, the in-flight step is dropped and
    /// [`InscribeError::TimedOut`] carries the commit tx id recorded so far.
    pub async fn inscribe_with_timeout(
        &self,
        args: InscribeArgs,
        timeout: Duration,
    ) -> Result<Inscription, InscribeError> {
        let sequence = Box::pin(self.inscribe(args));
        let deadline = futures_timer::Delay::new(timeout);

        match future::select(sequence, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), pending)) => {
                drop(pending);
                let commit_tx_id = self.client.session.read().await.commit_tx_id().cloned();
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    commit_tx_id = ?commit_tx_id,
                    "Inscribe timed out"
                );
                self.client.set_stage(InscribeStage::Failed).await;
                Err(InscribeError::TimedOut { commit_tx_id })
            }
        }
    }

    async fn run(&self, args: InscribeArgs) -> Result<Inscription, InscribeError> {
        self.client.sync_wallet_address().await;
        let resolved = self.resolve(args).await?;

        let mut commit_tx_id = resolved.commit_tx_id.clone();
        if commit_tx_id.is_none() {
            self.client.set_stage(InscribeStage::AwaitingCommit).await;

            let request = InscriptionRequest {
                content: resolved.content.clone(),
                mime_type: resolved.mime_type.clone(),
                fee_rate: resolved.fee_rate,
            };
            let commit = self.client.commits().request_psbt_for(&request).await?;
            let signed = self.client.commits().sign(Some(&commit.psbt_base64)).await?;
            commit_tx_id = Some(signed.tx_id.ok_or(InscribeError::BroadcastFailed)?);
        } else {
            tracing::debug!(commit_tx_id = ?commit_tx_id, "Reusing existing commit");
            let reused = commit_tx_id.clone();
            self.client
                .update_session(|s| {
                    if s.commit_tx_id() != reused.as_ref() {
                        s.set_commit_tx_id(reused);
                    }
                })
                .await;
        }

        self.client
            .set_stage(InscribeStage::AwaitingBroadcastConfirmation)
            .await;
        wait_for_propagation(
            &self.client.config.propagation,
            self.client.explorer.as_deref(),
            self.client.wallet.network(),
            commit_tx_id.as_ref(),
        )
        .await?;

        let commit_tx_id = commit_tx_id.ok_or(InscribeError::MissingCommitId)?;

        self.client
            .set_stage(InscribeStage::AwaitingInscription)
            .await;
        let inscription_tx_id = self
            .submit(
                &resolved.content,
                &resolved.mime_type,
                &resolved.ordinal_address,
                &commit_tx_id,
            )
            .await?;

        self.client.set_stage(InscribeStage::Complete).await;

        Ok(Inscription {
            inscription_tx_id,
            commit_tx_id,
            completed_at: Utc::now(),
        })
    }

    async fn resolve(&self, args: InscribeArgs) -> Result<Resolved, InscribeError> {
        let session = self.client.session().await;
        let wallet_address = self.client.wallet.accounts().address;

        let content = args.content.unwrap_or_else(|| session.content().to_string());
        let mime_type = args
            .mime_type
            .unwrap_or_else(|| session.mime_type().to_string());
        let ordinal_address = args.ordinal_address.unwrap_or(wallet_address);

        require(Some(content.as_str()), Field::Content)?;
        require(Some(mime_type.as_str()), Field::MimeType)?;
        require(Some(ordinal_address.as_str()), Field::OrdinalAddress)?;

        // A session commit already used by a finished inscription is spent.
        let session_commit = match session.inscription_tx_id() {
            Some(_) => None,
            None => session.commit_tx_id().cloned(),
        };
        let commit_tx_id = args
            .commit_tx_id
            .and_then(TxId::non_empty)
            .or(session_commit);

        Ok(Resolved {
            content,
            mime_type,
            ordinal_address,
            fee_rate: session.fee_rate(),
            commit_tx_id,
        })
    }
}
