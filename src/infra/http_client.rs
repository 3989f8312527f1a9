use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::ElectionsConfig;
use crate::error::{PrecinctError, Result};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, USER_AGENT};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

pub struct ReqwestHttp {
    client: Client,
    user_agent: String,
}

impl ReqwestHttp {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    pub fn from_config(config: &ElectionsConfig) -> Result<Self> {
        Self::new(&config.user_agent, config.timeout())
    }
}

impl HttpClientPort for ReqwestHttp {
    fn get(&self, url: &str) -> Result<HttpGetResult> {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let bytes = resp.bytes()?.to_vec();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let content_disposition = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        Ok(HttpGetResult {
            status,
            bytes,
            content_type,
            content_disposition,
        })
    }
}

/// Retries 5xx responses with a linearly growing delay and turns any other
/// unsuccessful status into an error.
pub struct RetryingHttp<C> {
    inner: C,
    max_attempts: u32,
    backoff: Duration,
}

impl<C: HttpClientPort> RetryingHttp<C> {
    pub fn new(inner: C, max_attempts: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(inner: C, config: &ElectionsConfig) -> Self {
        Self::new(inner, config.max_attempts, config.retry_backoff())
    }

    /// Linear backoff, saturating for oversized configured delays.
    fn wait_before_retry(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl<C: HttpClientPort> HttpClientPort for RetryingHttp<C> {
    fn get(&self, url: &str) -> Result<HttpGetResult> {
        let mut attempt = 1;
        loop {
            let resp = self.inner.get(url)?;
            if resp.is_server_error() && attempt < self.max_attempts {
                let wait = self.wait_before_retry(attempt);
                warn!(url, status = resp.status, attempt, "Server error, retrying in {:?}", wait);
                thread::sleep(wait);
                attempt += 1;
                continue;
            }
            if !resp.is_success() {
                return Err(PrecinctError::HttpStatus {
                    status: resp.status,
                    url: url.to_string(),
                });
            }
            return Ok(resp);
        }
    }
}
