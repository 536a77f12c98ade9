//! Client side of the Met Museum collection API
//!
//! Search and detail endpoints, the object cache behind them, cooperative
//! cancellation shared across one exploration, and the `CollectionSource`
//! seam the orchestrator is written against.

pub mod cache;
pub mod cancel;
pub mod client;
pub mod metrics;
pub mod source;
pub mod tags;
pub mod types;

pub use cache::ObjectCache;
pub use cancel::CancellationHandle;
pub use client::CollectionClient;
pub use metrics::{ClientMetrics, ClientMetricsSnapshot};
pub use source::{CollectionSource, PendingDetail};
pub use tags::{COLLECTION_TAGS, is_collection_tag};
pub use types::{ObjectId, ObjectRecord, SearchQuery, SearchResponse};
