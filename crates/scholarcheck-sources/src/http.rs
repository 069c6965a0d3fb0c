//! Throttled HTTP client shared by the source adapters

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode, Url};
use scholarcheck_core::SourceError;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = concat!("scholarcheck/", env!("CARGO_PKG_VERSION"));

pub struct HttpClient {
    client: Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpClient {
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        min_interval: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SourceError::SourceUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            min_interval,
            last_request: Mutex::new(None),
        })
    }

    /// GET `url` with query parameters and extra headers, returning the body
    ///
    /// 429 maps to [`SourceError::RateLimited`]; any other non-success status
    /// and every transport failure map to [`SourceError::SourceUnavailable`].
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, SourceError> {
        let url = Url::parse_with_params(url, params)
            .map_err(|_| SourceError::SourceUnavailable(format!("Invalid URL: {}", url)))?;

        self.throttle().await;

        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::SourceUnavailable("Request timed out".to_string())
            } else {
                SourceError::SourceUnavailable(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "source responded");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }
        if !status.is_success() {
            return Err(SourceError::SourceUnavailable(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::SourceUnavailable(format!("Failed to read body: {}", e)))
    }

    /// Wait until `min_interval` has passed since the previous request
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
