//! Fetching JSON metadata documents.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde_json::Value;
use tiles_common::{TilesError, TilesResult};
use tracing::{debug, instrument};

use crate::config::FetchConfig;

/// Source of JSON documents.
///
/// Implementations perform a single attempt per call; retry policy, if
/// any, belongs to the implementation or its caller.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &Url) -> TilesResult<Value>;
}

/// Fetches documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    accept: String,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> TilesResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TilesError::fetch("", format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing client (connection pool) with the configured headers.
    pub fn with_client(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            accept: config.accept.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_json(&self, url: &Url) -> TilesResult<Value> {
        debug!("Fetching document");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, &self.accept)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| TilesError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TilesError::fetch(url.as_str(), format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TilesError::fetch(url.as_str(), e))?;

        debug!(size = body.len(), "Fetched document");
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Serves documents from memory, keyed by absolute URL.
///
/// Useful offline and in tests; every request is recorded in order.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.insert(url, document);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, document: Value) {
        self.documents.insert(url.into(), document);
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl JsonFetcher for MemoryFetcher {
    async fn fetch_json(&self, url: &Url) -> TilesResult<Value> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());

        self.documents
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| TilesError::fetch(url.as_str(), "HTTP 404 Not Found"))
    }
}
