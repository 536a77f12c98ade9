//! Internal artwork representation and the normalizer that produces it
//!
//! Raw object records carry dozens of fields; the result grid needs seven.

mod normalize;

pub use normalize::normalize;

use serde::{Deserialize, Serialize};

use crate::collection::ObjectId;
use crate::imurl::ImUrl;

/// One artwork as shown in the result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ObjectId,
    pub title: String,
    /// Year the artwork was completed
    pub year: i32,
    /// Human-readable image description
    pub alt_text: String,
    pub image_url: Option<ImUrl>,
    pub additional_image_urls: Vec<ImUrl>,
    /// Object page on the museum website
    pub link: String,
}

impl Artwork {
    /// An artwork without a primary image has nothing to render
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        self.image_url.is_some()
    }
}
