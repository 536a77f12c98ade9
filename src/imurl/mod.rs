use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

use crate::errors::ExplorerError;

/// An immutable, cheaply-cloneable URL wrapper.
///
/// Artwork records are cloned into every published snapshot, so image and
/// link URLs share one parsed `Url` through an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImUrl {
    url: Arc<Url>,
}

impl ImUrl {
    /// Parse an absolute http(s) URL
    ///
    /// # Errors
    /// Returns `ExplorerError::MalformedResource` when the input does not parse
    /// or uses a scheme other than http/https.
    pub fn parse(input: &str) -> Result<Self, ExplorerError> {
        let parsed = Url::parse(input)
            .map_err(|e| ExplorerError::MalformedResource(format!("invalid URL '{input}': {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExplorerError::MalformedResource(format!(
                "unsupported URL scheme '{}' in '{input}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            url: Arc::new(parsed),
        })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// True when this URL points at `host`, ignoring ASCII case
    #[must_use]
    pub fn is_on_host(&self, host: &str) -> bool {
        self.host().is_some_and(|h| h.eq_ignore_ascii_case(host))
    }
}

impl fmt::Display for ImUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Hash for ImUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl FromStr for ImUrl {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ImUrl {
    type Error = ExplorerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for ImUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for ImUrl {
    type Target = Url;

    fn deref(&self) -> &Self::Target {
        &self.url
    }
}

impl Serialize for ImUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
