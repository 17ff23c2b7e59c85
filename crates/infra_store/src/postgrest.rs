//! Hosted store adapter speaking the PostgREST protocol
//!
//! Tables live under `{url}/rest/v1/{table}`. Every request carries the key
//! twice, as `apikey` and as a bearer token. Writes ask for
//! `return=representation` so the stored row (with server-assigned id and
//! timestamps) comes back in the response body.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};

use crate::error::{PostgrestErrorBody, StoreError};
use crate::query::{Filter, Row, Select};
use crate::store::{exactly_one, StoreBackend, TableStore};

const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

/// REST client bound to one store URL and one key
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Builds a client for `url` authenticated with `api_key`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the URL is not an http(s) URL or
    /// the HTTP client cannot be constructed
    pub fn new(url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self, StoreError> {
        let base = url.trim().trim_end_matches('/');
        let parsed = Url::parse(base).map_err(|e| {
            StoreError::Configuration(format!("invalid store URL '{}': {}", base, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::Configuration(format!(
                "store URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", base),
            api_key: api_key.to_string(),
        })
    }

    /// The REST root, e.g. `https://project.supabase.co/rest/v1`
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<Row>, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = PostgrestErrorBody::parse(&text);
            let error = StoreError::from_response(status.as_u16(), body);
            warn!(status = status.as_u16(), error = %error, "Store rejected request");
            return Err(error);
        }

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Array(rows) => Ok(rows),
            row @ Value::Object(_) => Ok(vec![row]),
            other => Err(StoreError::SerializationError(format!(
                "expected rows from store, got {}",
                other
            ))),
        }
    }
}

impl fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("rest_url", &self.rest_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl DomainPort for PostgrestStore {}

#[async_trait]
impl HealthCheckable for PostgrestStore {
    /// Fetches the REST root, which lists the exposed schema
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.request(Method::GET, "").send().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.status().is_success() => {
                HealthCheckResult::new("postgrest-store", AdapterHealth::Healthy, latency_ms)
            }
            Ok(response) => {
                HealthCheckResult::new("postgrest-store", AdapterHealth::Unhealthy, latency_ms)
                    .with_message(format!("Store answered HTTP {}", response.status().as_u16()))
            }
            Err(e) => {
                HealthCheckResult::new("postgrest-store", AdapterHealth::Unhealthy, latency_ms)
                    .with_message(format!("Store unreachable: {}", e))
            }
        }
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgrest
    }

    #[instrument(skip(self, query), fields(table = %query.table))]
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        let request = self
            .request(Method::GET, &query.table)
            .query(&query.to_params());
        let rows = self.execute(request).await?;
        debug!(rows = rows.len(), "Selected rows");
        Ok(rows)
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&vec![row]);
        exactly_one(self.execute(request).await?, table)
    }

    #[instrument(skip(self, filters, patch))]
    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> Result<Row, StoreError> {
        if filters.is_empty() {
            return Err(StoreError::QueryFailed(format!(
                "refusing to update {} without a filter",
                table
            )));
        }
        let params: Vec<(String, String)> = filters.iter().map(Filter::to_param).collect();
        let request = self
            .request(Method::PATCH, table)
            .query(&params)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        exactly_one(self.execute(request).await?, table)
    }

    #[instrument(skip(self, row))]
    async fn upsert(&self, table: &str, row: Row, on_conflict: &str) -> Result<Row, StoreError> {
        let request = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", MERGE_DUPLICATES)
            .json(&vec![row]);
        exactly_one(self.execute(request).await?, table)
    }
}
