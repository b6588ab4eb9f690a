//! HTTP fetch of the live listings page
//!
//! A thin reqwest wrapper: one GET with browser-like headers and a fixed
//! timeout. Fetch failures are reported upward as "no data" — there is no
//! retry loop here, and nothing downstream of the fetch blocks.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use tracing::{debug, info};

use crate::constants::{HTTP_ACCEPT, HTTP_ACCEPT_LANGUAGE, HTTP_TIMEOUT_SECS, HTTP_USER_AGENT};
use crate::{Error, Result};

/// HTTP client for fetching the exchange listings page
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher with the standard browser-like identity and a fixed
    /// timeout
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(HTTP_USER_AGENT)
            .build()
            .map_err(|e| Error::http("client", "failed to build HTTP client", Some(e)))?;

        Ok(Self { client })
    }

    /// Fetch the page body at `url`
    ///
    /// Non-success statuses are errors; the caller treats any failure as "no
    /// usable data this run".
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, HTTP_ACCEPT)
            .header(ACCEPT_LANGUAGE, HTTP_ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| Error::http(url, "could not reach source", Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(
                url,
                format!("source answered with status {status}"),
                None,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(url, "failed to read response body", Some(e)))?;

        info!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        // The builder only fails on TLS backend misconfiguration, which the
        // compiled-in rustls backend rules out
        Self::new(HTTP_TIMEOUT_SECS).expect("default HTTP client must build")
    }
}
