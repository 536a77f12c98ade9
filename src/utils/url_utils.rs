//! URL and path manipulation utilities.
//!
//! This module builds API resource paths from loose parts.

use std::fmt;

/// One piece of a resource path: a literal segment or a numeric identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPart {
    Text(String),
    Number(i64),
}

impl fmt::Display for PathPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PathPart {
    fn from(part: &str) -> Self {
        Self::Text(part.to_string())
    }
}

impl From<String> for PathPart {
    fn from(part: String) -> Self {
        Self::Text(part)
    }
}

impl From<&String> for PathPart {
    fn from(part: &String) -> Self {
        Self::Text(part.clone())
    }
}

impl From<i64> for PathPart {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for PathPart {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u32> for PathPart {
    fn from(n: u32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u64> for PathPart {
    fn from(n: u64) -> Self {
        // Larger ids are rendered through the text arm to avoid wrapping
        match i64::try_from(n) {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(n.to_string()),
        }
    }
}

/// Join path parts into an absolute, percent-encoded pathname
///
/// Every part loses one leading slash, and every part except the last also
/// loses one trailing slash, so a trailing slash on the final part survives.
/// Parts are percent-encoded segment by segment (slashes inside a part are
/// kept), joined with `/` and prefixed with a single `/`. Encoding follows
/// whole-URI rules: reserved characters such as `?:@&=+$,;!'()*#` stay
/// literal, everything else outside the unreserved set is escaped.
///
/// # Examples
/// ```
/// use kodegen_tools_artexplorer::utils::join_path;
///
/// let path = join_path(["/public/collection/v1/", "/search"]);
/// assert_eq!(path, "/public/collection/v1/search");
///
/// let path = join_path(["objects", "my file"]);
/// assert_eq!(path, "/objects/my%20file");
/// ```
pub fn join_path<I, P>(parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: Into<PathPart>,
{
    let parts: Vec<String> = parts.into_iter().map(|p| p.into().to_string()).collect();
    let last = parts.len().saturating_sub(1);

    let joined = parts
        .iter()
        .enumerate()
        .map(|(index, part)| {
            let part = part.strip_prefix('/').unwrap_or(part);
            let part = if index == last {
                part
            } else {
                part.strip_suffix('/').unwrap_or(part)
            };
            encode_segments(part)
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("/{joined}")
}

/// Build a resource path from heterogeneous parts
///
/// ```
/// use kodegen_tools_artexplorer::resource_path;
///
/// assert_eq!(resource_path!("/v1/", "objects", 42u64), "/v1/objects/42");
/// ```
#[macro_export]
macro_rules! resource_path {
    ($($part:expr),* $(,)?) => {
        $crate::utils::url_utils::join_path(
            [$($crate::utils::url_utils::PathPart::from($part)),*]
        )
    };
}

/// Reserved characters left literal, matching URI (not component) encoding
const URI_RESERVED: &str = ";,?:@&=+$!*'()#";

fn encode_segments(part: &str) -> String {
    part.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    let mut buf = [0u8; 4];
    for c in segment.chars() {
        if URI_RESERVED.contains(c) {
            encoded.push(c);
        } else {
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    encoded
}
