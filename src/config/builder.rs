//! Fluent builder for `ExplorerConfig`
//!
//! Every field has a default pointing at the public Met Museum API, so the
//! builder only validates what callers override.

use anyhow::{Context, Result, bail};
use url::Url;

use super::types::{ExplorerConfig, YearBounds};

#[derive(Debug, Clone, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Point the client at another API origin (a mock server in tests)
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config.base_path = base_path.into();
        self
    }

    #[must_use]
    pub fn image_host(mut self, host: impl Into<String>) -> Self {
        self.config.image_host = host.into();
        self
    }

    #[must_use]
    pub fn year_bounds(mut self, min: i32, max: i32) -> Self {
        self.config.year_bounds = YearBounds::new(min, max);
        self
    }

    #[must_use]
    pub fn cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn retain_imageless(mut self, retain: bool) -> Self {
        self.config.retain_imageless = retain;
        self
    }

    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not an absolute http(s) URL, the year
    /// bounds are inverted, the cache capacity or timeout is zero, or the
    /// image host is empty.
    pub fn build(self) -> Result<ExplorerConfig> {
        let mut config = self.config;

        let origin = Url::parse(&config.origin)
            .with_context(|| format!("Invalid API origin '{}'", config.origin))?;
        if !matches!(origin.scheme(), "http" | "https") {
            bail!("API origin must use http or https, got '{}'", origin.scheme());
        }
        // Request URLs are built as origin + absolute path
        config.origin = config.origin.trim_end_matches('/').to_string();

        if config.year_bounds.min > config.year_bounds.max {
            bail!(
                "Year bounds are inverted: {} > {}",
                config.year_bounds.min,
                config.year_bounds.max
            );
        }

        if config.cache_capacity == Some(0) {
            bail!("Cache capacity must be at least 1 (use None for an unbounded cache)");
        }

        if config.request_timeout_secs == Some(0) {
            bail!("Request timeout must be at least 1 second (use None to disable)");
        }

        if config.image_host.trim().is_empty() {
            bail!("Image host cannot be empty");
        }

        Ok(config)
    }
}
