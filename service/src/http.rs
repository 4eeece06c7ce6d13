//! HTTP access for remote identifier lookups
//!
//! The validator only needs "GET this URL and give me the JSON body", so that
//! is all [`HttpClient`] offers. [`ReqwestHttpClient`] is the production
//! implementation; tests substitute their own.

use async_trait::async_trait;
use deposit_core::{DepositError, Result, settings::OrcidSettings};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

/// Fetches JSON documents
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` and parse the response body as JSON
    ///
    /// # Errors
    ///
    /// Returns `DepositError::Http` when the request fails or the server
    /// answers with a non-success status, `DepositError::Json` when the body
    /// is not JSON.
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// [`HttpClient`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client sending the configured `Accept` and `User-Agent`
    /// headers, with the configured timeout if any
    ///
    /// # Errors
    ///
    /// Returns `DepositError::Config` when a header value is invalid or the
    /// client cannot be built.
    pub fn new(settings: &OrcidSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&settings.accept)
                .map_err(|e| DepositError::config(format!("invalid accept header: {e}")))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|e| DepositError::config(format!("invalid user agent: {e}")))?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DepositError::config(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DepositError::http(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DepositError::http(format!("{url} answered {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DepositError::http(format!("failed to read body from {url}: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }
}
