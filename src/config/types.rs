//! Core configuration types for art exploration
//!
//! This module contains the main `ExplorerConfig` struct and the year domain
//! every search range is clamped into.

use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_API_BASE_PATH, DEFAULT_API_ORIGIN, DEFAULT_IMAGE_HOST, MAX_YEAR, MIN_YEAR, USER_AGENT,
};

/// Inclusive domain of searchable years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Clamp a single year into the domain
    #[must_use]
    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self::new(MIN_YEAR, MAX_YEAR)
    }
}

/// Main configuration struct for exploration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Scheme and host of the collection API, e.g. `https://collectionapi.metmuseum.org`
    pub(crate) origin: String,

    /// Path prefix shared by the search and object endpoints
    pub(crate) base_path: String,

    /// Host whose image requests are served stale-while-revalidate
    pub(crate) image_host: String,

    pub(crate) year_bounds: YearBounds,

    /// Capacity bound for the object cache
    ///
    /// `None` keeps every record for the process lifetime; published museum
    /// objects do not change. `Some(n)` switches to LRU eviction.
    pub(crate) cache_capacity: Option<usize>,

    /// Per-request timeout in seconds
    ///
    /// Default: None. A hung request only blocks the fetch it belongs to.
    pub(crate) request_timeout_secs: Option<u64>,

    pub(crate) user_agent: String,

    /// Keep artworks that have no primary image in the result set
    ///
    /// Default: false (they are dropped before merging).
    pub(crate) retain_imageless: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_API_ORIGIN.to_string(),
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            year_bounds: YearBounds::default(),
            cache_capacity: None,
            request_timeout_secs: None,
            user_agent: USER_AGENT.to_string(),
            retain_imageless: false,
        }
    }
}
