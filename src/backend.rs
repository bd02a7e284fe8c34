use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Index name as a constant for consistency
pub mod indices {
    pub const PRODUCTS: &str = "products";
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("search backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search backend rejected query ({status}): {reason}")]
    Rejected { status: u16, reason: String },
}

/// Raw response shape returned by the search backend for one query.
#[derive(Debug, Deserialize)]
pub struct RawResponse {
    pub hits: RawHits,
}

#[derive(Debug, Deserialize)]
pub struct RawHits {
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// The backend reports the match count either as a bare number or nested
/// inside an object with a `value` field, depending on version and request
/// options. Decode both defensively.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Plain(u64),
    Nested { value: u64 },
}

impl TotalHits {
    pub fn count(self) -> u64 {
        match self {
            TotalHits::Plain(n) => n,
            TotalHits::Nested { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
    #[serde(default)]
    pub highlight: Option<HashMap<String, Vec<String>>>,
}

/// Capability handle to the external search engine. Injected into the HTTP
/// layer so tests can substitute a double for the real cluster.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute one composed search body against the named index.
    async fn search(&self, index: &str, body: Value) -> Result<RawResponse, BackendError>;

    /// Cheap reachability probe, used by the health endpoint.
    async fn ping(&self) -> Result<(), BackendError>;
}

/// Production backend speaking the Elasticsearch HTTP API. The inner reqwest
/// client multiplexes its own connections, so one instance is shared by all
/// in-flight requests.
#[derive(Debug, Clone)]
pub struct ElasticBackend {
    http: reqwest::Client,
    base_url: String,
}

impl ElasticBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticBackend {
    async fn search(&self, index: &str, body: Value) -> Result<RawResponse, BackendError> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Surface the engine's own reason when it sent one.
            let reason = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.pointer("/error/reason")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("query execution failed")
                        .to_string()
                });
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(response.json::<RawResponse>().await?)
    }

    async fn ping(&self) -> Result<(), BackendError> {
        self.http
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
