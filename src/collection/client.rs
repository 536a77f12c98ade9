//! HTTP client for the Met Museum collection API
//!
//! Wraps the `/search` and `/objects/{id}` endpoints, caches object records
//! for the life of the client, and honours a shared `CancellationHandle`
//! both before and during each request.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::cache::ObjectCache;
use super::cancel::CancellationHandle;
use super::metrics::{ClientMetrics, ClientMetricsSnapshot};
use super::source::{CollectionSource, PendingDetail};
use super::tags::is_collection_tag;
use super::types::{ObjectId, ObjectRecord, SearchQuery, SearchResponse};
use crate::config::ExplorerConfig;
use crate::errors::{ExplorerError, ExplorerResult};
use crate::resource_path;

struct ClientInner {
    http: reqwest::Client,
    config: Arc<ExplorerConfig>,
    cache: ObjectCache,
    metrics: ClientMetrics,
}

/// Client for the collection's search and object endpoints
///
/// Cheap to clone; clones share the HTTP connection pool, the object cache
/// and the metrics. Construct one per application and pass it where needed.
#[derive(Clone)]
pub struct CollectionClient {
    inner: Arc<ClientInner>,
}

impl CollectionClient {
    /// Create a client with its own `reqwest::Client`
    ///
    /// # Errors
    /// Returns `ExplorerError::Unknown` if the HTTP client cannot be built.
    pub fn new(config: ExplorerConfig) -> ExplorerResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_http_client(config: ExplorerConfig, http: reqwest::Client) -> Self {
        let cache = ObjectCache::with_capacity(config.cache_capacity());
        Self {
            inner: Arc::new(ClientInner {
                http,
                config: Arc::new(config),
                cache,
                metrics: ClientMetrics::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cache(&self) -> &ObjectCache {
        &self.inner.cache
    }

    #[must_use]
    pub fn metrics(&self) -> ClientMetricsSnapshot {
        self.inner.metrics.snapshot()
    }

    /// Build the search URL for `query`
    ///
    /// Parameters: `tags=true` only when the text is a collection tag, then
    /// `hasImages`, `isHighlight`, the inclusive `dateBegin`/`dateEnd` and `q`.
    ///
    /// # Errors
    /// Returns `ExplorerError::Unknown` if the configured origin cannot form a URL.
    pub fn search_url(&self, query: &SearchQuery) -> ExplorerResult<Url> {
        let mut url = self.endpoint(&resource_path!(self.config().base_path(), "/search"))?;
        {
            let mut pairs = url.query_pairs_mut();
            if is_collection_tag(query.text()) {
                pairs.append_pair("tags", "true");
            }
            pairs
                .append_pair("hasImages", "true")
                .append_pair("isHighlight", "true")
                .append_pair("dateBegin", &query.min_year().to_string())
                .append_pair("dateEnd", &query.max_year().to_string())
                .append_pair("q", query.text());
        }
        Ok(url)
    }

    /// Build the detail URL for one object
    ///
    /// # Errors
    /// Returns `ExplorerError::Unknown` if the configured origin cannot form a URL.
    pub fn object_url(&self, id: ObjectId) -> ExplorerResult<Url> {
        self.endpoint(&resource_path!(self.config().base_path(), "/objects", id.0))
    }

    /// Search the collection and return matching ids in API order
    ///
    /// # Errors
    /// - `Cancelled` if `cancel` fires before or during the request
    /// - `Remote` for a non-success HTTP status
    /// - `Unknown` for transport or decoding failures
    pub async fn search(
        &self,
        query: &SearchQuery,
        cancel: &CancellationHandle,
    ) -> ExplorerResult<Vec<ObjectId>> {
        if cancel.is_cancelled() {
            self.inner.metrics.increment_cancelled();
            return Err(ExplorerError::Cancelled(
                "already cancelled before search could start".to_string(),
            ));
        }

        let url = self.search_url(query)?;
        self.inner.metrics.increment_search();
        debug!(url = %url, "Searching collection");

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                self.inner.metrics.increment_cancelled();
                return Err(ExplorerError::Cancelled(format!("search request to '{url}'")));
            }
            response = self.get_json::<SearchResponse>(url.clone()) => response,
        };

        match response {
            Ok(response) => {
                let ids = response.into_ids();
                info!(
                    query = %query.text(),
                    min_year = query.min_year(),
                    max_year = query.max_year(),
                    matches = ids.len(),
                    "Search completed"
                );
                Ok(ids)
            }
            Err(e) => {
                self.inner.metrics.increment_failure();
                Err(e)
            }
        }
    }

    /// Retrieve one object record, from the cache when possible
    ///
    /// Only successful responses are cached.
    ///
    /// # Errors
    /// Same taxonomy as [`CollectionClient::search`].
    pub async fn fetch_detail(
        &self,
        id: ObjectId,
        cancel: &CancellationHandle,
    ) -> ExplorerResult<ObjectRecord> {
        if cancel.is_cancelled() {
            self.inner.metrics.increment_cancelled();
            return Err(ExplorerError::Cancelled(format!(
                "already cancelled before object {id} could be retrieved"
            )));
        }

        if let Some(record) = self.inner.cache.get(id) {
            self.inner.metrics.increment_cache_hit();
            return Ok(record);
        }

        let url = self.object_url(id)?;
        self.inner.metrics.increment_detail();

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                self.inner.metrics.increment_cancelled();
                return Err(ExplorerError::Cancelled(format!("request for object {id}")));
            }
            response = self.get_json::<ObjectRecord>(url) => response,
        };

        match response {
            Ok(record) => {
                self.inner.cache.insert(id, record.clone());
                Ok(record)
            }
            Err(e) => {
                self.inner.metrics.increment_failure();
                debug!(object_id = %id, error = %e, "Object retrieval failed");
                Err(e)
            }
        }
    }

    /// Search, then start a detail fetch for every id without awaiting it
    ///
    /// # Errors
    /// Only the search step can fail here; detail failures surface through
    /// each `PendingDetail`.
    pub async fn explore(
        &self,
        query: &SearchQuery,
        cancel: &CancellationHandle,
    ) -> ExplorerResult<Vec<PendingDetail>> {
        let ids = match self.search(query, cancel).await {
            Ok(ids) => ids,
            Err(ExplorerError::Cancelled(reason)) => {
                return Err(ExplorerError::Cancelled(format!(
                    "query '{}' ({}..={}): {reason}",
                    query.text(),
                    query.min_year(),
                    query.max_year()
                )));
            }
            Err(e) => return Err(e),
        };

        let pending = ids
            .into_iter()
            .map(|id| {
                let client = self.clone();
                let cancel = cancel.clone();
                PendingDetail::spawn(id, async move { client.fetch_detail(id, &cancel).await })
            })
            .collect();

        Ok(pending)
    }

    fn endpoint(&self, path: &str) -> ExplorerResult<Url> {
        let raw = format!("{}{path}", self.config().origin());
        Url::parse(&raw).map_err(|e| ExplorerError::Unknown(format!("Invalid request URL '{raw}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ExplorerResult<T> {
        let response = self
            .inner
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ExplorerError::Unknown(format!("Request to '{url}' failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Remote {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExplorerError::Unknown(format!("Failed to read body from '{url}': {e}")))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

impl CollectionSource for CollectionClient {
    fn explore(
        &self,
        query: &SearchQuery,
        cancel: &CancellationHandle,
    ) -> impl std::future::Future<Output = ExplorerResult<Vec<PendingDetail>>> + Send {
        CollectionClient::explore(self, query, cancel)
    }
}
