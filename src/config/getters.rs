//! Getter methods for `ExplorerConfig`

use std::time::Duration;

use super::builder::ExplorerConfigBuilder;
use super::types::{ExplorerConfig, YearBounds};

impl ExplorerConfig {
    #[must_use]
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn image_host(&self) -> &str {
        &self.image_host
    }

    #[must_use]
    pub fn year_bounds(&self) -> YearBounds {
        self.year_bounds
    }

    #[must_use]
    pub fn cache_capacity(&self) -> Option<usize> {
        self.cache_capacity
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn retain_imageless(&self) -> bool {
        self.retain_imageless
    }
}
