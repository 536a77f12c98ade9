//! Stale-while-revalidate cache for artwork images
//!
//! Requests to the configured image host are answered from memory when
//! possible, while a background task refreshes the stored body. Requests to
//! any other host go straight to the network and are never stored.

use bytes::Bytes;
use dashmap::{DashMap, DashSet};
use log::{debug, warn};
use std::sync::Arc;

use crate::config::ExplorerConfig;
use crate::errors::{ExplorerError, ExplorerResult};
use crate::imurl::ImUrl;

struct ImageStore {
    bodies: DashMap<String, Bytes>,
    /// URLs with a background refresh in flight
    refreshing: DashSet<String>,
}

/// Byte cache for image responses
///
/// Cheap to clone; clones share the stored bodies.
#[derive(Clone)]
pub struct ImageCache {
    http: reqwest::Client,
    image_host: Arc<str>,
    store: Arc<ImageStore>,
}

impl ImageCache {
    /// Create a cache for `config.image_host()` with its own HTTP client
    ///
    /// # Errors
    /// Returns `ExplorerError::Unknown` if the HTTP client cannot be built.
    pub fn new(config: &ExplorerConfig) -> ExplorerResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(config.image_host(), builder.build()?))
    }

    #[must_use]
    pub fn with_http_client(image_host: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            image_host: Arc::from(image_host),
            store: Arc::new(ImageStore {
                bodies: DashMap::new(),
                refreshing: DashSet::new(),
            }),
        }
    }

    #[must_use]
    pub fn image_host(&self) -> &str {
        &self.image_host
    }

    /// Fetch an image body
    ///
    /// For the image host: a stored body is returned at once and refreshed in
    /// the background; a miss is fetched, stored and returned. Other hosts
    /// are fetched without touching the cache.
    ///
    /// # Errors
    /// - `Remote` for a non-success HTTP status
    /// - `Unknown` for transport failures
    pub async fn fetch(&self, url: &ImUrl) -> ExplorerResult<Bytes> {
        if !url.is_on_host(&self.image_host) {
            return download(&self.http, url.as_str()).await;
        }

        let key = url.as_str().to_string();
        if let Some(body) = self.cached(url) {
            self.revalidate(key);
            return Ok(body);
        }

        let body = download(&self.http, &key).await?;
        debug!("Stored {} bytes for {key}", body.len());
        self.store.bodies.insert(key, body.clone());
        Ok(body)
    }

    /// Parse `url` and fetch it
    ///
    /// # Errors
    /// `MalformedResource` for an unparseable URL, otherwise as [`ImageCache::fetch`].
    pub async fn fetch_str(&self, url: &str) -> ExplorerResult<Bytes> {
        self.fetch(&ImUrl::parse(url)?).await
    }

    /// Stored body for `url`, without any network activity
    #[must_use]
    pub fn cached(&self, url: &ImUrl) -> Option<Bytes> {
        self.store
            .bodies
            .get(url.as_str())
            .map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.bodies.is_empty()
    }

    pub fn clear(&self) {
        self.store.bodies.clear();
    }

    fn revalidate(&self, key: String) {
        if !self.store.refreshing.insert(key.clone()) {
            return;
        }

        let http = self.http.clone();
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match download(&http, &key).await {
                Ok(body) => {
                    store.bodies.insert(key.clone(), body);
                }
                // The stale body stays usable
                Err(e) => warn!("Background refresh of {key} failed: {e}"),
            }
            store.refreshing.remove(&key);
        });
    }
}

async fn download(http: &reqwest::Client, url: &str) -> ExplorerResult<Bytes> {
    let response = http
        .get(url)
        .header("Accept", "image/avif,image/webp,image/apng,image/*,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| ExplorerError::Unknown(format!("Image request to '{url}' failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExplorerError::Remote {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response
        .bytes()
        .await
        .map_err(|e| ExplorerError::Unknown(format!("Failed to read image body from '{url}': {e}")))
}
