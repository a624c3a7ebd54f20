use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out after {timeout:?} fetching {url}")]
    Timeout { url: String, timeout: Duration },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Resolves a URL to raw page markup.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(HttpFetcher { client, timeout })
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: e,
            }
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| self.classify(url, e))?;
        debug!(
            url,
            bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
