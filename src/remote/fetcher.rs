//! Document Fetcher Module
//! Single bounded HTTP GET for remote table extraction.

use crate::config::FetchConfig;
use crate::error::DataError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Anything that can turn a URL into an HTML document body.
pub trait DocumentSource {
    fn fetch(&self, url: &str) -> Result<String, DataError>;
}

/// Fetches documents over HTTP(S) with a browser-like `User-Agent`.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, DataError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| DataError::Fetch(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl DocumentSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, DataError> {
        let url = url.trim();
        info!(url, "fetching document");

        let response = self.client.get(url).send().map_err(|e| {
            warn!(url, error = %e, "request failed");
            DataError::Fetch(describe_transport_error(&e))
        })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(url, %status, "server returned an error status");
            return Err(DataError::Fetch(format!("HTTP {} for {}", status, url)));
        }

        let body = response
            .text()
            .map_err(|e| DataError::Fetch(format!("failed to read response body: {}", e)))?;
        info!(url, %status, bytes = body.len(), "fetched document");
        Ok(body)
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_builder() {
        format!("invalid URL: {}", err)
    } else if err.is_connect() {
        format!("could not connect: {}", err)
    } else {
        err.to_string()
    }
}
