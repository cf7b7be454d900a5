//! Network URL constants and session defaults.

use std::time::Duration;

/// Default inscription service base URL (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// mempool.space explorer, mainnet.
pub const MEMPOOL_MAINNET_URL: &str = "https://mempool.space";

/// mempool.space explorer, testnet.
pub const MEMPOOL_TESTNET_URL: &str = "https://mempool.space/testnet";

/// Default fee rate in sat/vByte.
pub const DEFAULT_FEE_RATE: u64 = 10;

/// Default inscription content type.
pub const MIME_TYPE_TEXT: &str = "text/plain;charset=utf-8";

/// Blind wait between commit broadcast and inscription submission.
pub const DEFAULT_PROPAGATION_DELAY: Duration = Duration::from_secs(10);
