//! Shared HTTP client for provider and webhook calls.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// Failure of a single HTTP exchange.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin wrapper around a pooled `reqwest::Client` with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dashboard_enricher/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and decodes a JSON body. Anything but 200 is an error.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.json::<T>().await.map_err(FetchError::Decode)
    }

    /// GETs `url` and returns the status code, or 503 if no response arrived.
    pub async fn status_of(&self, url: &str) -> u16 {
        debug!("Checking {}", url);

        match self.client.get(url).send().await {
            Ok(resp) => resp.status().as_u16(),
            Err(e) => {
                debug!("Check of {} failed: {}", url, e);
                reqwest::StatusCode::SERVICE_UNAVAILABLE.as_u16()
            }
        }
    }

    /// POSTs `body` as JSON and returns the response status.
    pub async fn post_json<B>(&self, url: &str, body: &B) -> Result<reqwest::StatusCode, FetchError>
    where
        B: Serialize + ?Sized,
    {
        debug!("POST {}", url);

        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        Ok(resp.status())
    }
}
