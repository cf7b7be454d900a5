//! Low-level HTTP client: `InscriberHttp`.
//!
//! One method per endpoint, returning wire types. Implements the
//! [`InscriptionApi`] and [`TxVisibility`] seams consumed by the sub-clients.

use crate::domain::inscription::wire::{
    parse_inscription_tx_id, CreateInscriptionRequest, CreateInscriptionResponse,
    InscribeRequest, TxStatus,
};
use crate::domain::inscription::{InscriptionApi, TxVisibility};
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::{Network, TxId};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Low-level HTTP client for the inscription service and the mempool.space
/// explorer.
#[derive(Clone)]
pub struct InscriberHttp {
    base_url: String,
    client: Client,
    explorer_retry: RetryConfig,
}

impl InscriberHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            explorer_retry: RetryConfig::default(),
        })
    }

    /// Backoff for explorer status lookups.
    pub fn with_explorer_retry(mut self, config: RetryConfig) -> Self {
        self.explorer_retry = config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn explorer_retry(&self) -> &RetryConfig {
        &self.explorer_retry
    }

    // ── Inscription service ──────────────────────────────────────────────

    /// Ask the service for an unsigned commit PSBT. Never retried: every call
    /// creates a new inscriber key on the service side.
    pub async fn create_inscription(
        &self,
        request: &CreateInscriptionRequest,
    ) -> Result<CreateInscriptionResponse, HttpError> {
        let url = format!("{}/create-inscription", self.base_url);
        self.post(&url, request, RetryPolicy::None).await
    }

    /// Submit the reveal for a broadcast commit. The service answers with the
    /// inscription tx id, either as a JSON string or as plain text.
    pub async fn inscribe(&self, request: &InscribeRequest) -> Result<TxId, HttpError> {
        let url = format!("{}/inscribe", self.base_url);
        let body = self
            .request_with_retry(reqwest::Method::POST, &url, Some(request), RetryPolicy::None)
            .await?;
        parse_inscription_tx_id(&body).ok_or_else(|| {
            HttpError::Decode(format!("no inscription tx id in response: {:?}", body))
        })
    }

    // ── Explorer ─────────────────────────────────────────────────────────

    /// `GET {mempool}/api/tx/{txid}/status`. `None` while the explorer has
    /// not seen the transaction.
    pub async fn get_tx_status(
        &self,
        network: Network,
        tx_id: &TxId,
    ) -> Result<Option<TxStatus>, HttpError> {
        let url = tx_status_url(network, tx_id);
        let retry = RetryPolicy::Idempotent(self.explorer_retry.clone());
        match self.get::<TxStatus>(&url, retry).await {
            Ok(status) => Ok(Some(status)),
            Err(HttpError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let body = self
            .request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await?;
        decode(&body)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let body = self
            .request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await?;
        decode(&body)
    }

    async fn request_with_retry<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<String, HttpError> {
        let config = match retry {
            RetryPolicy::None => return self.do_request(&method, url, body).await,
            RetryPolicy::Idempotent(config) => config,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if let HttpError::RateLimited {
                        retry_after_ms: Some(ms),
                    } = &e
                    {
                        futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                    }

                    if config.should_retry(&e) && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<String, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.text().await?);
        }

        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        Err(status_error(status.as_u16(), body_text, retry_after_ms))
    }
}

#[async_trait]
impl InscriptionApi for InscriberHttp {
    async fn create_inscription(
        &self,
        request: &CreateInscriptionRequest,
    ) -> Result<CreateInscriptionResponse, HttpError> {
        InscriberHttp::create_inscription(self, request).await
    }

    async fn inscribe(&self, request: &InscribeRequest) -> Result<TxId, HttpError> {
        InscriberHttp::inscribe(self, request).await
    }
}

#[async_trait]
impl TxVisibility for InscriberHttp {
    async fn is_visible(&self, network: Network, tx_id: &TxId) -> Result<bool, HttpError> {
        Ok(self.get_tx_status(network, tx_id).await?.is_some())
    }
}

fn tx_status_url(network: Network, tx_id: &TxId) -> String {
    format!(
        "{}/api/tx/{}/status",
        network.mempool_url(),
        urlencoding::encode(tx_id.as_str())
    )
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, HttpError> {
    serde_json::from_str(body).map_err(|e| HttpError::Decode(e.to_string()))
}

fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}
