//! The seam between the orchestrator and whatever produces artwork records
//!
//! `CollectionClient` is the production source. Anything that can turn a
//! query into a list of independently settling detail fetches can stand in
//! for it.

use std::future::Future;
use tokio::task::JoinHandle;

use super::cancel::CancellationHandle;
use super::types::{ObjectId, ObjectRecord, SearchQuery};
use crate::errors::{ExplorerError, ExplorerResult};

/// A detail fetch that was started but not awaited
///
/// The fetch runs as its own task. Dropping this value detaches the task
/// rather than aborting it.
#[derive(Debug)]
pub struct PendingDetail {
    id: ObjectId,
    task: JoinHandle<ExplorerResult<ObjectRecord>>,
}

impl PendingDetail {
    /// Start `fetch` on the runtime right away
    pub fn spawn<F>(id: ObjectId, fetch: F) -> Self
    where
        F: Future<Output = ExplorerResult<ObjectRecord>> + Send + 'static,
    {
        Self {
            id,
            task: tokio::spawn(fetch),
        }
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Wait for the fetch to reach a terminal state
    pub async fn settle(self) -> (ObjectId, ExplorerResult<ObjectRecord>) {
        let outcome = match self.task.await {
            Ok(result) => result,
            Err(join_error) => Err(ExplorerError::Unknown(format!(
                "Detail task for object {} did not complete: {join_error}",
                self.id
            ))),
        };
        (self.id, outcome)
    }
}

/// Source of search results and artwork detail records
pub trait CollectionSource: Send + Sync + 'static {
    /// Run the search step, then start one detail fetch per returned id
    ///
    /// The returned list preserves search order. Detail fetches are already
    /// running when this resolves and settle independently of each other.
    fn explore(
        &self,
        query: &SearchQuery,
        cancel: &CancellationHandle,
    ) -> impl Future<Output = ExplorerResult<Vec<PendingDetail>>> + Send;
}
