//! # ordscribe
//!
//! Client-side orchestration of wallet-driven Bitcoin inscriptions: request a
//! commit PSBT from an inscription service, have the user's wallet sign and
//! broadcast it, wait for propagation, then submit the inscription.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: newtypes, domain models, session state, errors
//! 2. **Wallet**: the `WalletProvider` seam implemented by wallet bindings
//! 3. **HTTP API**: `InscriberHttp` with per-endpoint retry policies
//! 4. **High-Level Client**: `InscriberClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ordscribe::prelude::*;
//!
//! let client = InscriberClient::builder(wallet)
//!     .api_url("https://inscriber.example.com/api")
//!     .build()?;
//!
//! client.wallet().connect(&WalletId::Unisat).await?;
//! let inscription = client
//!     .inscriptions()
//!     .inscribe(InscribeArgs::new().content("hello").mime_type("text/plain"))
//!     .await?;
//! println!("{}", client.wallet().explorer_tx_url(&inscription.inscription_tx_id));
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and defaults.
pub mod network;

// ── Layer 2: Wallet ──────────────────────────────────────────────────────────

/// Wallet provider trait and wallet actions.
pub mod wallet;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `InscriberClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Field, Network, TxId};

    // Domain types: inscription
    pub use crate::domain::inscription::{
        CommitPsbt, InscribeArgs, InscribeStage, Inscription, InscriptionApi, InscriptionRequest,
        InscriptionSession, PropagationPolicy, SessionEvent, SignedCommit, TxVisibility,
    };

    // Wallet
    pub use crate::wallet::{Balance, SignedPsbt, WalletAccounts, WalletId, WalletProvider};

    // Errors
    pub use crate::error::{HttpError, InscribeError, WalletError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_FEE_RATE, MIME_TYPE_TEXT};

    // Client + sub-clients
    pub use crate::client::{
        CommitsClient, InscriberClient, InscriberClientBuilder, InscriberConfig,
        InscriptionsClient, SessionObserver, WalletClient,
    };

    #[cfg(feature = "http")]
    pub use crate::http::{InscriberHttp, RetryConfig, RetryPolicy};
}
