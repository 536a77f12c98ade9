//! Cancellable, incremental exploration of the Met Museum Open Access collection
//!
//! A query is a free-text term and an inclusive year range. Each exploration
//! searches the collection, fetches artwork details concurrently, and merges
//! them into a year-ordered result set as they arrive. Starting a new
//! exploration supersedes the previous one.

pub mod artwork;
pub mod collection;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod image_cache;
pub mod imurl;
pub mod utils;

pub use artwork::{Artwork, normalize};
pub use collection::{
    CancellationHandle, ClientMetricsSnapshot, CollectionClient, CollectionSource, ObjectCache,
    ObjectId, ObjectRecord, PendingDetail, SearchQuery, SearchResponse, is_collection_tag,
};
pub use config::{ExplorerConfig, ExplorerConfigBuilder, YearBounds};
pub use errors::{ExplorerError, ExplorerResult};
pub use explorer::{
    ExplorationHandle, ExplorationOutcome, ExplorationPhase, ExplorationReport, ExplorerSnapshot,
    QueryOrchestrator, ResultSet, UserNotice,
};
pub use image_cache::ImageCache;
pub use imurl::ImUrl;

/// Run one exploration against the public collection and return its snapshot
///
/// # Errors
/// Propagates config, client and search-step errors from
/// [`QueryOrchestrator::explore`].
pub async fn explore(
    config: ExplorerConfig,
    text: &str,
    min_year: i32,
    max_year: i32,
) -> ExplorerResult<ExplorerSnapshot> {
    let orchestrator = QueryOrchestrator::from_config(config)?;
    orchestrator.explore(text, min_year, max_year).await?;
    Ok(orchestrator.snapshot())
}
