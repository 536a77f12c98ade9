//! Shared configuration constants for the art explorer
//!
//! Default values for the Met Museum Open Access API and the year domain,
//! kept here so the config builder and the tests agree on one source.

/// Origin of the public Met Museum collection API
pub const DEFAULT_API_ORIGIN: &str = "https://collectionapi.metmuseum.org";

/// Path prefix shared by every collection endpoint
pub const DEFAULT_API_BASE_PATH: &str = "/public/collection/v1/";

/// Host serving artwork image files
///
/// Only requests to this host go through the stale-while-revalidate image cache.
pub const DEFAULT_IMAGE_HOST: &str = "images.metmuseum.org";

/// Earliest searchable year: 2000 BCE
pub const MIN_YEAR: i32 = -2000;

/// Latest searchable year: 2000 CE
pub const MAX_YEAR: i32 = 2000;

/// Initial capacity of the unbounded object cache
///
/// A single exploration asks for at most a few hundred highlighted objects.
pub const OBJECT_CACHE_INITIAL_CAPACITY: usize = 256;

/// User agent sent with every API request
pub const USER_AGENT: &str = concat!("kodegen-artexplorer/", env!("CARGO_PKG_VERSION"));
