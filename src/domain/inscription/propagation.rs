//! Waiting for a broadcast commit to reach the inscription service.

use std::time::Duration;

use super::api::TxVisibility;
use crate::error::InscribeError;
use crate::network::DEFAULT_PROPAGATION_DELAY;
use crate::shared::{Network, TxId};

/// How the sequence waits between commit broadcast and inscription submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationPolicy {
    /// Sleep for a fixed duration. This is a heuristic: the commit may still
    /// be unseen by the service when the delay ends.
    FixedDelay(Duration),
    /// Ask a block explorer until it reports the commit, up to `max_attempts`
    /// checks spaced `interval` apart.
    PollExplorer { interval: Duration, max_attempts: u32 },
}

impl Default for PropagationPolicy {
    fn default() -> Self {
        PropagationPolicy::FixedDelay(DEFAULT_PROPAGATION_DELAY)
    }
}

impl PropagationPolicy {
    pub fn poll_explorer(interval: Duration, max_attempts: u32) -> Self {
        PropagationPolicy::PollExplorer {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }
}

/// Apply `policy`. Polling needs a commit id and an explorer; without a commit id
/// there is nothing to look for and the caller's own check reports it.
pub(crate) async fn wait_for_propagation(
    policy: &PropagationPolicy,
    explorer: Option<&dyn TxVisibility>,
    network: Network,
    commit_tx_id: Option<&TxId>,
) -> Result<(), InscribeError> {
    match policy {
        PropagationPolicy::FixedDelay(delay) => {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "Waiting for commit propagation");
            futures_timer::Delay::new(*delay).await;
            Ok(())
        }
        PropagationPolicy::PollExplorer {
            interval,
            max_attempts,
        } => {
            let (Some(explorer), Some(tx_id)) = (explorer, commit_tx_id) else {
                return Ok(());
            };
            for attempt in 1..=*max_attempts {
                match explorer.is_visible(network, tx_id).await {
                    Ok(true) => {
                        tracing::debug!(attempt, %tx_id, "Commit visible on explorer");
                        return Ok(());
                    }
                    Ok(false) => {
                        tracing::debug!(attempt, %tx_id, "Commit not visible yet");
                    }
                    Err(e) => {
                        tracing::warn!(attempt, %tx_id, error = %e, "Explorer check failed");
                    }
                }
                if attempt < *max_attempts {
                    futures_timer::Delay::new(*interval).await;
                }
            }
            Err(InscribeError::PropagationTimeout {
                commit_tx_id: tx_id.clone(),
                attempts: *max_attempts,
            })
        }
    }
}
