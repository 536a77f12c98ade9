//! Data structures for the Met Museum collection API
//!
//! Only the fields consumed by normalization are typed on `ObjectRecord`;
//! everything else the API returns rides along untouched in `extra`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::YearBounds;
use crate::errors::{ExplorerError, ExplorerResult};

/// Identifier of one object in the remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Free-text query plus an inclusive, clamped year range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
    min_year: i32,
    max_year: i32,
}

impl SearchQuery {
    /// Clamp both years into `bounds`, then reject an inverted range
    ///
    /// # Errors
    /// Returns `ExplorerError::InvalidRange` when `min_year > max_year` after clamping.
    pub fn new(
        text: impl Into<String>,
        min_year: i32,
        max_year: i32,
        bounds: YearBounds,
    ) -> ExplorerResult<Self> {
        let min_year = bounds.clamp(min_year);
        let max_year = bounds.clamp(max_year);

        if min_year > max_year {
            return Err(ExplorerError::InvalidRange { min_year, max_year });
        }

        Ok(Self {
            text: text.into(),
            min_year,
            max_year,
        })
    }

    /// Range of `span` years either side of `year`, clamped into `bounds`
    ///
    /// This is the shape produced by a single year slider with a fixed window.
    ///
    /// # Errors
    /// Returns `ExplorerError::InvalidRange` for a negative span.
    pub fn around(
        text: impl Into<String>,
        year: i32,
        span: i32,
        bounds: YearBounds,
    ) -> ExplorerResult<Self> {
        Self::new(
            text,
            year.saturating_sub(span),
            year.saturating_add(span),
            bounds,
        )
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    #[must_use]
    pub fn max_year(&self) -> i32 {
        self.max_year
    }
}

/// GET /search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,

    /// `null` when `total` is zero
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Option<Vec<ObjectId>>,
}

impl SearchResponse {
    #[must_use]
    pub fn into_ids(self) -> Vec<ObjectId> {
        self.object_ids.unwrap_or_default()
    }
}

/// GET /objects/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "objectID", default)]
    pub object_id: Option<ObjectId>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(rename = "artistDisplayName", default)]
    pub artist_display_name: Option<String>,

    /// Lower-resolution primary image; empty for objects without images
    #[serde(rename = "primaryImageSmall", default)]
    pub primary_image_small: Option<String>,

    #[serde(rename = "additionalImages", default)]
    pub additional_images: Option<Vec<String>>,

    /// Year the artwork was completed
    #[serde(rename = "objectEndDate", default)]
    pub object_end_date: Option<i32>,

    #[serde(rename = "objectURL", default)]
    pub object_url: Option<String>,

    #[serde(rename = "isHighlight", default)]
    pub is_highlight: bool,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
