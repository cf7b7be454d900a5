//! High-level client: `InscriberClient` with nested sub-client accessors.
//!
//! Each concern has its own sub-client (`commits()`, `inscriptions()`,
//! `wallet()`). This module keeps the builder, the shared session state,
//! the in-flight flags and the observer list.

use crate::domain::inscription::client::Inscriptions;
use crate::domain::inscription::commit::Commits;
use crate::domain::inscription::{
    InscribeStage, InscriptionApi, InscriptionSession, PropagationPolicy, SessionDefaults,
    SessionEvent, TxVisibility,
};
use crate::error::InscribeError;
use crate::network::{DEFAULT_API_URL, DEFAULT_FEE_RATE, MIME_TYPE_TEXT};
use crate::wallet::client::Wallet;
use crate::wallet::WalletProvider;

use async_lock::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::inscription::client::Inscriptions as InscriptionsClient;
pub use crate::domain::inscription::commit::Commits as CommitsClient;
pub use crate::wallet::client::Wallet as WalletClient;

/// Callback invoked after every session change, e.g. to re-render a view.
pub type SessionObserver = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct InscriberConfig {
    pub api_url: String,
    pub default_fee_rate: u64,
    pub default_mime_type: String,
    pub propagation: PropagationPolicy,
    pub http_timeout: Duration,
}

impl Default for InscriberConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_fee_rate: DEFAULT_FEE_RATE,
            default_mime_type: MIME_TYPE_TEXT.to_string(),
            propagation: PropagationPolicy::default(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

/// In-flight flags for the two long-running operations.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    pub(crate) fetching_commit: AtomicBool,
    pub(crate) inscribing: AtomicBool,
}

/// Holds an in-flight flag for as long as it lives; the flag is released on
/// drop, including when the owning future is cancelled.
pub(crate) struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, InscribeError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| FlightGuard(flag))
            .map_err(|_| InscribeError::AlreadyInFlight)
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors:
/// `client.commits()`, `client.inscriptions()`, `client.wallet()`.
pub struct InscriberClient {
    pub(crate) api: Arc<dyn InscriptionApi>,
    pub(crate) wallet: Arc<dyn WalletProvider>,
    pub(crate) explorer: Option<Arc<dyn TxVisibility>>,
    pub(crate) config: InscriberConfig,
    pub(crate) session: Arc<RwLock<InscriptionSession>>,
    pub(crate) in_flight: Arc<InFlight>,
    pub(crate) observers: Arc<RwLock<Vec<SessionObserver>>>,
}

impl InscriberClient {
    pub fn builder(wallet: Arc<dyn WalletProvider>) -> InscriberClientBuilder {
        InscriberClientBuilder::new(wallet)
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn commits(&self) -> Commits<'_> {
        Commits { client: self }
    }

    pub fn inscriptions(&self) -> Inscriptions<'_> {
        Inscriptions { client: self }
    }

    pub fn wallet(&self) -> Wallet<'_> {
        Wallet { client: self }
    }

    pub fn config(&self) -> &InscriberConfig {
        &self.config
    }

    // ── Session ──────────────────────────────────────────────────────────

    /// Snapshot of the current session.
    pub async fn session(&self) -> InscriptionSession {
        self.session.read().await.clone()
    }

    /// Mutate the session and notify observers.
    ///
    /// ```rust,ignore
    /// client.update_session(|s| s.set_content("hello")).await;
    /// ```
    pub async fn update_session<R>(&self, f: impl FnOnce(&mut InscriptionSession) -> R) -> R {
        let (result, snapshot) = {
            let mut session = self.session.write().await;
            let result = f(&mut session);
            (result, session.clone())
        };
        self.notify(&SessionEvent::Updated(snapshot)).await;
        result
    }

    /// Return every session field to its default.
    pub async fn reset(&self) {
        self.session.write().await.reset();
        tracing::debug!("Inscription session reset");
        self.notify(&SessionEvent::Reset).await;
    }

    /// Register an observer for session changes.
    pub async fn subscribe(&self, observer: SessionObserver) {
        self.observers.write().await.push(observer);
    }

    /// Whether a commit PSBT request is outstanding.
    pub fn is_fetching_commit_psbt(&self) -> bool {
        self.in_flight.fetching_commit.load(Ordering::Acquire)
    }

    /// Whether an inscribe sequence is outstanding.
    pub fn is_inscribing(&self) -> bool {
        self.in_flight.inscribing.load(Ordering::Acquire)
    }

    // ── Internal ─────────────────────────────────────────────────────────

    pub(crate) async fn set_stage(&self, stage: InscribeStage) {
        self.session.write().await.set_stage(stage);
        tracing::debug!(stage = %stage, "Inscribe stage");
        self.notify(&SessionEvent::StageChanged(stage)).await;
    }

    /// Pull the wallet's ordinal address into the session; switching away
    /// from a previously seen address invalidates any cached commit.
    pub(crate) async fn sync_wallet_address(&self) {
        let address = self.wallet.accounts().address;
        let changed = self.session.write().await.observe_address(&address);
        if changed {
            tracing::debug!(address = %address, "Wallet address observed");
            let snapshot = self.session().await;
            self.notify(&SessionEvent::Updated(snapshot)).await;
        }
    }

    pub(crate) async fn notify(&self, event: &SessionEvent) {
        let observers = self.observers.read().await.clone();
        for observer in observers {
            observer(event);
        }
    }
}

impl Clone for InscriberClient {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            wallet: self.wallet.clone(),
            explorer: self.explorer.clone(),
            config: self.config.clone(),
            session: self.session.clone(),
            in_flight: self.in_flight.clone(),
            observers: self.observers.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct InscriberClientBuilder {
    wallet: Arc<dyn WalletProvider>,
    config: InscriberConfig,
    api: Option<Arc<dyn InscriptionApi>>,
    explorer: Option<Arc<dyn TxVisibility>>,
}

impl InscriberClientBuilder {
    pub fn new(wallet: Arc<dyn WalletProvider>) -> Self {
        Self {
            wallet,
            config: InscriberConfig::default(),
            api: None,
            explorer: None,
        }
    }

    /// Base URL of the inscription service.
    pub fn api_url(mut self, url: &str) -> Self {
        self.config.api_url = url.to_string();
        self
    }

    pub fn default_fee_rate(mut self, sats_per_vbyte: u64) -> Self {
        self.config.default_fee_rate = sats_per_vbyte;
        self
    }

    pub fn default_mime_type(mut self, mime_type: &str) -> Self {
        self.config.default_mime_type = mime_type.to_string();
        self
    }

    pub fn propagation(mut self, policy: PropagationPolicy) -> Self {
        self.config.propagation = policy;
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Use a custom inscription service implementation instead of the
    /// reqwest-backed default.
    pub fn api(mut self, api: Arc<dyn InscriptionApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Use a custom explorer for `PropagationPolicy::PollExplorer`.
    pub fn explorer(mut self, explorer: Arc<dyn TxVisibility>) -> Self {
        self.explorer = Some(explorer);
        self
    }

    pub fn build(self) -> Result<InscriberClient, InscribeError> {
        if self.config.default_fee_rate == 0 {
            return Err(InscribeError::Config(
                "default fee rate must be positive".to_string(),
            ));
        }

        #[cfg(feature = "http")]
        let (api, explorer) = {
            let needs_http = self.api.is_none()
                || (self.explorer.is_none()
                    && matches!(
                        self.config.propagation,
                        PropagationPolicy::PollExplorer { .. }
                    ));
            let http = if needs_http {
                Some(Arc::new(
                    crate::http::InscriberHttp::new(&self.config.api_url, self.config.http_timeout)
                        .map_err(|e| InscribeError::Config(e.to_string()))?,
                ))
            } else {
                None
            };
            let api: Arc<dyn InscriptionApi> = match (self.api, &http) {
                (Some(api), _) => api,
                (None, Some(http)) => http.clone() as Arc<dyn InscriptionApi>,
                (None, None) => {
                    return Err(InscribeError::Config("no inscription API configured".to_string()))
                }
            };
            let explorer: Option<Arc<dyn TxVisibility>> = match (self.explorer, http) {
                (Some(explorer), _) => Some(explorer),
                (None, Some(http)) => Some(http as Arc<dyn TxVisibility>),
                (None, None) => None,
            };
            (api, explorer)
        };

        #[cfg(not(feature = "http"))]
        let (api, explorer) = {
            let api = self.api.ok_or_else(|| {
                InscribeError::Config("an InscriptionApi is required without `http`".to_string())
            })?;
            if self.explorer.is_none()
                && matches!(
                    self.config.propagation,
                    PropagationPolicy::PollExplorer { .. }
                )
            {
                return Err(InscribeError::Config(
                    "explorer polling needs a TxVisibility implementation".to_string(),
                ));
            }
            (api, self.explorer)
        };

        let defaults = SessionDefaults {
            fee_rate: self.config.default_fee_rate,
            mime_type: self.config.default_mime_type.clone(),
        };

        Ok(InscriberClient {
            api,
            wallet: self.wallet,
            explorer,
            config: self.config,
            session: Arc::new(RwLock::new(InscriptionSession::new(defaults))),
            in_flight: Arc::new(InFlight::default()),
            observers: Arc::new(RwLock::new(Vec::new())),
        })
    }
}
