//! Service seams for the inscription flow.
//!
//! [`InscriptionApi`] is the remote inscription service; [`TxVisibility`] is
//! a block explorer used by the polling propagation policy. With the `http`
//! feature, `InscriberHttp` implements both.

use async_trait::async_trait;

use super::wire::{CreateInscriptionRequest, CreateInscriptionResponse, InscribeRequest};
use crate::error::HttpError;
use crate::shared::{Network, TxId};

/// Remote inscription service.
#[async_trait]
pub trait InscriptionApi: Send + Sync {
    /// `POST /create-inscription`: returns the unsigned commit PSBT.
    async fn create_inscription(
        &self,
        request: &CreateInscriptionRequest,
    ) -> Result<CreateInscriptionResponse, HttpError>;

    /// `POST /inscribe`: returns the inscription (reveal) transaction id.
    async fn inscribe(&self, request: &InscribeRequest) -> Result<TxId, HttpError>;
}

/// Block explorer lookup: has the transaction reached the explorer's mempool?
#[async_trait]
pub trait TxVisibility: Send + Sync {
    async fn is_visible(&self, network: Network, tx_id: &TxId) -> Result<bool, HttpError>;
}
