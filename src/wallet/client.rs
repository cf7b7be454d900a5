//! Wallet sub-client: provider calls plus the session side effects the UI
//! expects (address sync, reset on disconnect, funds check before sending).

use super::{Balance, SignedPsbt, WalletAccounts, WalletId};
use crate::client::InscriberClient;
use crate::error::{InscribeError, WalletError};
use crate::shared::{require, Field, Network, TxId};

pub struct Wallet<'a> {
    pub(crate) client: &'a InscriberClient,
}

impl<'a> Wallet<'a> {
    pub fn accounts(&self) -> WalletAccounts {
        self.client.wallet.accounts()
    }

    pub fn network(&self) -> Network {
        self.client.wallet.network()
    }

    pub async fn balance(&self) -> Result<Balance, WalletError> {
        self.client.wallet.balance().await
    }

    /// Connect the given wallet and pull its ordinal address into the session.
    pub async fn connect(&self, wallet: &WalletId) -> Result<WalletAccounts, WalletError> {
        self.client.wallet.connect(wallet).await?;
        let accounts = self.client.wallet.accounts();
        tracing::info!(wallet = %wallet, address = %accounts.address, "Wallet connected");
        self.client.sync_wallet_address().await;
        Ok(accounts)
    }

    /// Disconnect and clear the inscription session.
    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.client.wallet.disconnect().await?;
        tracing::info!("Wallet disconnected");
        self.client.reset().await;
        Ok(())
    }

    pub async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        self.client.wallet.sign_message(message).await
    }

    /// Sign an arbitrary PSBT. Session state is not touched; use
    /// [`Commits::sign`](crate::client::CommitsClient::sign) for the commit.
    pub async fn sign_psbt(
        &self,
        psbt: &str,
        finalize: bool,
        broadcast: bool,
    ) -> Result<SignedPsbt, InscribeError> {
        if psbt.trim().is_empty() {
            return Err(InscribeError::MissingPsbt);
        }
        Ok(self.client.wallet.sign_psbt(psbt, finalize, broadcast).await?)
    }

    /// Send `amount_sats` to `to`.
    ///
    /// The balance is read first; when it cannot cover the amount the wallet
    /// is never asked to send.
    pub async fn send_btc(&self, to: &str, amount_sats: u64) -> Result<TxId, InscribeError> {
        require(Some(to), Field::RecipientAddress)?;
        if amount_sats == 0 {
            return Err(InscribeError::MissingField(Field::Amount));
        }

        let balance = self.client.wallet.balance().await?;
        if balance.total < amount_sats {
            tracing::warn!(
                required = amount_sats,
                available = balance.total,
                "Insufficient funds"
            );
            return Err(WalletError::InsufficientFunds {
                required: amount_sats,
                available: balance.total,
            }
            .into());
        }

        let tx_id = self.client.wallet.send_btc(to, amount_sats).await?;
        tracing::info!(%tx_id, to, amount_sats, "BTC sent");
        Ok(tx_id)
    }

    /// Switch networks; the wallet may expose a different address afterwards.
    pub async fn switch_network(&self, network: Network) -> Result<(), WalletError> {
        self.client.wallet.switch_network(network).await?;
        tracing::info!(%network, "Wallet network switched");
        self.client.sync_wallet_address().await;
        Ok(())
    }

    /// mempool.space page for `tx_id` on the wallet's current network.
    pub fn explorer_tx_url(&self, tx_id: &TxId) -> String {
        format!("{}/tx/{}", self.network().mempool_url(), tx_id)
    }
}
