//! Inscription session state: the fields a UI binds to while composing and
//! submitting an inscription.
//!
//! Editing anything the commit PSBT was built from (content, mime type, fee
//! rate, the wallet's ordinal address) drops the cached commit PSBT and commit
//! transaction id, so a stale commit is never signed or reused.

use super::{CommitPsbt, InscribeStage};
use crate::network::{DEFAULT_FEE_RATE, MIME_TYPE_TEXT};
use crate::shared::TxId;
use serde::Serialize;

/// Values restored by [`InscriptionSession::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub fee_rate: u64,
    pub mime_type: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            fee_rate: DEFAULT_FEE_RATE,
            mime_type: MIME_TYPE_TEXT.to_string(),
        }
    }
}

/// Notification delivered to session observers.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Any field changed; carries the new snapshot.
    Updated(InscriptionSession),
    StageChanged(InscribeStage),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InscriptionSession {
    content: String,
    mime_type: String,
    fee_rate: u64,
    commit_psbt_hex: String,
    commit_psbt_base64: String,
    commit_tx_id: Option<TxId>,
    total_fees: u64,
    inscriber_address: String,
    inscription_tx_id: Option<TxId>,
    preview_url: String,
    observed_address: String,
    stage: InscribeStage,
    #[serde(skip)]
    defaults: SessionDefaults,
}

impl InscriptionSession {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            content: String::new(),
            mime_type: defaults.mime_type.clone(),
            fee_rate: defaults.fee_rate,
            commit_psbt_hex: String::new(),
            commit_psbt_base64: String::new(),
            commit_tx_id: None,
            total_fees: 0,
            inscriber_address: String::new(),
            inscription_tx_id: None,
            preview_url: String::new(),
            observed_address: String::new(),
            stage: InscribeStage::Idle,
            defaults,
        }
    }

    // ── Getters ──────────────────────────────────────────────────────────

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn fee_rate(&self) -> u64 {
        self.fee_rate
    }

    pub fn commit_psbt_hex(&self) -> &str {
        &self.commit_psbt_hex
    }

    pub fn commit_psbt_base64(&self) -> &str {
        &self.commit_psbt_base64
    }

    pub fn commit_tx_id(&self) -> Option<&TxId> {
        self.commit_tx_id.as_ref()
    }

    pub fn total_fees(&self) -> u64 {
        self.total_fees
    }

    pub fn inscriber_address(&self) -> &str {
        &self.inscriber_address
    }

    pub fn inscription_tx_id(&self) -> Option<&TxId> {
        self.inscription_tx_id.as_ref()
    }

    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    /// Wallet ordinal address the cached commit was built against.
    pub fn observed_address(&self) -> &str {
        &self.observed_address
    }

    pub fn stage(&self) -> InscribeStage {
        self.stage
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    // ── Setters ──────────────────────────────────────────────────────────

    /// Returns `true` when the value changed (and cached commit data was dropped).
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if self.content == content {
            return false;
        }
        self.content = content;
        self.invalidate_commit();
        true
    }

    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) -> bool {
        let mime_type = mime_type.into();
        if self.mime_type == mime_type {
            return false;
        }
        self.mime_type = mime_type;
        self.invalidate_commit();
        true
    }

    pub fn set_fee_rate(&mut self, fee_rate: u64) -> bool {
        if self.fee_rate == fee_rate {
            return false;
        }
        self.fee_rate = fee_rate;
        self.invalidate_commit();
        true
    }

    /// Track the wallet's ordinal address. Returns `true` when the address
    /// changed. Switching from one known address to another invalidates the
    /// commit; the first observation only records a baseline.
    pub fn observe_address(&mut self, address: &str) -> bool {
        if self.observed_address == address {
            return false;
        }
        if !self.observed_address.is_empty() {
            self.invalidate_commit();
        }
        self.observed_address = address.to_string();
        true
    }

    /// Set (or clear) the commit transaction id directly, e.g. to resume
    /// after a failed inscription request. A new commit id starts a new
    /// inscription, so the previous inscription tx id is dropped.
    pub fn set_commit_tx_id(&mut self, tx_id: Option<TxId>) {
        self.commit_tx_id = tx_id.and_then(TxId::non_empty);
        if self.commit_tx_id.is_some() {
            self.inscription_tx_id = None;
        }
    }

    pub fn set_preview_url(&mut self, url: impl Into<String>) {
        self.preview_url = url.into();
    }

    pub(crate) fn record_commit_psbt(&mut self, commit: &CommitPsbt) {
        self.commit_psbt_hex = commit.psbt_hex.clone();
        self.commit_psbt_base64 = commit.psbt_base64.clone();
        self.total_fees = commit.total_fees;
        self.inscriber_address = commit.inscriber_address.clone();
        self.inscription_tx_id = None;
    }

    pub(crate) fn record_inscription(&mut self, tx_id: TxId) {
        self.inscription_tx_id = Some(tx_id);
    }

    pub(crate) fn set_stage(&mut self, stage: InscribeStage) {
        self.stage = stage;
    }

    /// Drop the cached commit PSBT and commit transaction id.
    pub fn invalidate_commit(&mut self) {
        self.commit_psbt_hex.clear();
        self.commit_psbt_base64.clear();
        self.commit_tx_id = None;
    }

    /// Restore every field to its default. The observed wallet address is
    /// kept; it describes the wallet, not the draft.
    pub fn reset(&mut self) {
        let observed_address = std::mem::take(&mut self.observed_address);
        *self = Self::new(self.defaults.clone());
        self.observed_address = observed_address;
    }
}

impl Default for InscriptionSession {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_commit() -> InscriptionSession {
        let mut session = InscriptionSession::default();
        session.set_content("hello");
        session.record_commit_psbt(&CommitPsbt {
            psbt_hex: "70736274ff".into(),
            psbt_base64: "cHNidP8=".into(),
            total_fees: 500,
            inscriber_address: "bc1q...".into(),
        });
        session.set_commit_tx_id(Some(TxId::from("abc123")));
        session
    }

    #[test]
    fn test_defaults() {
        let session = InscriptionSession::default();
        assert_eq!(session.fee_rate(), 10);
        assert_eq!(session.mime_type(), MIME_TYPE_TEXT);
        assert_eq!(session.stage(), InscribeStage::Idle);
        assert!(session.commit_tx_id().is_none());
    }

    #[test]
    fn test_content_change_invalidates_commit() {
        let mut session = session_with_commit();
        assert!(session.set_content("hello again"));
        assert_eq!(session.commit_psbt_hex(), "");
        assert_eq!(session.commit_psbt_base64(), "");
        assert!(session.commit_tx_id().is_none());
        // fee metadata is informational and survives
        assert_eq!(session.total_fees(), 500);
    }

    #[test]
    fn test_same_value_keeps_commit() {
        let mut session = session_with_commit();
        assert!(!session.set_content("hello"));
        assert!(!session.set_fee_rate(10));
        assert_eq!(session.commit_tx_id(), Some(&TxId::from("abc123")));
    }

    #[test]
    fn test_mime_fee_and_address_changes_invalidate() {
        let mut session = session_with_commit();
        assert!(session.set_mime_type("image/png"));
        assert!(session.commit_tx_id().is_none());

        let mut session = session_with_commit();
        assert!(session.set_fee_rate(25));
        assert_eq!(session.commit_psbt_hex(), "");

        let mut session = session_with_commit();
        session.observe_address("bc1pold");
        assert!(session.observe_address("bc1pnew"));
        assert!(session.commit_tx_id().is_none());
        assert!(!session.observe_address("bc1pnew"));
    }

    #[test]
    fn test_first_address_is_a_baseline() {
        let mut session = session_with_commit();
        assert!(session.observe_address("bc1pord"));
        assert_eq!(session.commit_tx_id(), Some(&TxId::from("abc123")));
        assert_eq!(session.commit_psbt_hex(), "70736274ff");
        assert_eq!(session.observed_address(), "bc1pord");
    }

    #[test]
    fn test_new_commit_drops_previous_inscription() {
        let mut session = session_with_commit();
        session.record_inscription(TxId::from("def456"));
        assert_eq!(session.inscription_tx_id(), Some(&TxId::from("def456")));

        session.set_commit_tx_id(Some(TxId::from("next01")));
        assert!(session.inscription_tx_id().is_none());
    }

    #[test]
    fn test_blank_commit_id_is_cleared() {
        let mut session = InscriptionSession::default();
        session.set_commit_tx_id(Some(TxId::from("")));
        assert!(session.commit_tx_id().is_none());
    }

    #[test]
    fn test_reset_restores_every_field() {
        let mut session = session_with_commit();
        session.set_mime_type("image/png");
        session.set_fee_rate(42);
        session.set_commit_tx_id(Some(TxId::from("abc123")));
        session.set_preview_url("blob:preview");
        session.record_inscription(TxId::from("def456"));
        session.set_stage(InscribeStage::Complete);
        session.observe_address("bc1pkeep");

        session.reset();

        let mut expected = InscriptionSession::default();
        expected.observe_address("bc1pkeep");
        assert_eq!(session, expected);
        assert_eq!(session.content(), "");
        assert_eq!(session.total_fees(), 0);
        assert_eq!(session.inscriber_address(), "");
        assert!(session.inscription_tx_id().is_none());
        assert_eq!(session.preview_url(), "");
    }

    #[test]
    fn test_reset_uses_configured_defaults() {
        let mut session = InscriptionSession::new(SessionDefaults {
            fee_rate: 3,
            mime_type: "application/json".into(),
        });
        session.set_fee_rate(50);
        session.reset();
        assert_eq!(session.fee_rate(), 3);
        assert_eq!(session.mime_type(), "application/json");
    }
}
