//! HTTP client layer: `InscriberHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::InscriberHttp;
pub use retry::{RetryConfig, RetryPolicy};
