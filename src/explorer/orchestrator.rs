//! Exploration orchestration
//!
//! Coordinates one exploration at a time:
//! - Supersession of the previous exploration (cancel its handle, new epoch)
//! - Pruning of results outside the new candidate set
//! - Incremental, order-stable merging as detail fetches settle
//! - Settle-all completion and the final user notice
//!
//! Every deferred mutation captures its exploration's epoch and re-checks it
//! under the state lock before touching shared state. The lock is never held
//! across an `.await`.

use ahash::AHashSet;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::result_set::ResultSet;
use super::state::{
    ExplorationOutcome, ExplorationPhase, ExplorationReport, ExplorerSnapshot, UserNotice,
};
use crate::artwork::{Artwork, normalize};
use crate::collection::{
    CancellationHandle, CollectionClient, CollectionSource, ObjectId, PendingDetail, SearchQuery,
};
use crate::config::ExplorerConfig;
use crate::errors::{ExplorerError, ExplorerResult};

/// The exploration currently allowed to mutate shared state
#[derive(Debug, Clone)]
pub struct ExplorationHandle {
    epoch: u64,
    cancel: CancellationHandle,
    ids: Vec<ObjectId>,
}

impl ExplorationHandle {
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn cancel_handle(&self) -> &CancellationHandle {
        &self.cancel
    }

    /// Candidate ids in search order; empty until the search step returns
    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }
}

struct ExplorerState {
    /// Last epoch handed out
    epoch: u64,
    current: Option<ExplorationHandle>,
    phase: ExplorationPhase,
    results: ResultSet,
    notice: UserNotice,
    loading: bool,
}

impl ExplorerState {
    fn owns(&self, epoch: u64) -> bool {
        self.current.as_ref().is_some_and(|h| h.epoch == epoch)
    }

    /// Owned and not cancelled: the only state in which results may merge
    fn is_current(&self, epoch: u64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|h| h.epoch == epoch && !h.cancel.is_cancelled())
    }

    fn snapshot(&self) -> ExplorerSnapshot {
        ExplorerSnapshot {
            epoch: self.epoch,
            phase: self.phase,
            notice: self.notice,
            loading: self.loading,
            artworks: self.results.to_vec(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn finish_cancelled(&mut self) {
        self.current = None;
        self.phase = ExplorationPhase::Cancelled;
        self.notice = UserNotice::Cancelled;
        self.loading = false;
    }
}

struct Shared {
    state: Mutex<ExplorerState>,
    updates: watch::Sender<ExplorerSnapshot>,
}

impl Shared {
    fn publish(&self, state: &ExplorerState) {
        self.updates.send_replace(state.snapshot());
    }

    /// Run `mutate` only if `epoch` is still current, then publish
    fn with_current<R>(&self, epoch: u64, mutate: impl FnOnce(&mut ExplorerState) -> R) -> Option<R> {
        let mut state = self.state.lock();
        if !state.is_current(epoch) {
            return None;
        }
        let result = mutate(&mut state);
        self.publish(&state);
        Some(result)
    }

    /// Outcome for an exploration that lost currency mid-flight
    fn finish_stale(&self, epoch: u64) -> ExplorationOutcome {
        let mut state = self.state.lock();
        if state.owns(epoch) {
            state.finish_cancelled();
            self.publish(&state);
            ExplorationOutcome::Cancelled
        } else {
            ExplorationOutcome::Superseded
        }
    }
}

/// Runs explorations against a `CollectionSource` and owns the result set
///
/// Cheap to clone; clones drive the same state. At most one exploration is
/// current at a time and starting a new one supersedes the previous one.
pub struct QueryOrchestrator<S: CollectionSource = CollectionClient> {
    source: Arc<S>,
    config: Arc<ExplorerConfig>,
    shared: Arc<Shared>,
}

impl<S: CollectionSource> Clone for QueryOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: Arc::clone(&self.config),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl QueryOrchestrator<CollectionClient> {
    /// Build an orchestrator backed by a fresh `CollectionClient`
    ///
    /// # Errors
    /// Returns `ExplorerError::Unknown` if the HTTP client cannot be built.
    pub fn from_config(config: ExplorerConfig) -> ExplorerResult<Self> {
        let client = CollectionClient::new(config.clone())?;
        Ok(Self::new(client, config))
    }
}

impl<S: CollectionSource> QueryOrchestrator<S> {
    #[must_use]
    pub fn new(source: S, config: ExplorerConfig) -> Self {
        Self::with_shared_source(Arc::new(source), config)
    }

    /// Use a source that other components also hold
    #[must_use]
    pub fn with_shared_source(source: Arc<S>, config: ExplorerConfig) -> Self {
        let state = ExplorerState {
            epoch: 0,
            current: None,
            phase: ExplorationPhase::Idle,
            results: ResultSet::new(),
            notice: UserNotice::None,
            loading: false,
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            source,
            config: Arc::new(config),
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Explore `text` within `[min_year, max_year]`
    ///
    /// Years are clamped to the configured bounds first. Resolves once every
    /// detail fetch of this exploration has settled, or as soon as the
    /// exploration is superseded or cancelled.
    ///
    /// # Errors
    /// - `InvalidRange` if the clamped range is inverted (no state change)
    /// - the search step's `Cancelled`, `Remote` or `Unknown` error, after
    ///   the notice has been updated (if this exploration was still current)
    pub async fn explore(
        &self,
        text: impl Into<String>,
        min_year: i32,
        max_year: i32,
    ) -> ExplorerResult<ExplorationReport> {
        let query = SearchQuery::new(text, min_year, max_year, self.config.year_bounds())?;
        self.explore_query(query).await
    }

    /// Like [`QueryOrchestrator::explore`] with a prepared query
    ///
    /// The query is re-clamped to this orchestrator's bounds.
    ///
    /// # Errors
    /// See [`QueryOrchestrator::explore`].
    pub async fn explore_query(&self, query: SearchQuery) -> ExplorerResult<ExplorationReport> {
        let query = SearchQuery::new(
            query.text(),
            query.min_year(),
            query.max_year(),
            self.config.year_bounds(),
        )?;

        let (epoch, cancel) = self.begin(&query);

        let pending = match self.source.explore(&query, &cancel).await {
            Ok(pending) => pending,
            Err(e) => {
                self.fail_search(epoch, &e);
                return Err(e);
            }
        };

        let ids: Vec<ObjectId> = pending.iter().map(PendingDetail::id).collect();
        let id_set: AHashSet<ObjectId> = ids.iter().copied().collect();
        let mut report = ExplorationReport {
            epoch,
            candidates: ids.len(),
            merged: 0,
            skipped: 0,
            failed: 0,
            outcome: ExplorationOutcome::Settled(UserNotice::None),
        };

        // Prune before any detail resolves so stale items never linger
        let pruned = self.shared.with_current(epoch, |state| {
            if let Some(handle) = state.current.as_mut() {
                handle.ids = ids;
            }
            state.phase = ExplorationPhase::Merging;
            state.results.retain_ids(&id_set)
        });
        match pruned {
            Some(removed) => debug!(epoch, removed, candidates = report.candidates, "Pruned result set"),
            None => {
                report.outcome = self.shared.finish_stale(epoch);
                return Ok(report);
            }
        }

        let mut settling: FuturesUnordered<_> =
            pending.into_iter().map(PendingDetail::settle).collect();

        while let Some((id, fetched)) = settling.next().await {
            let record = match fetched {
                Ok(record) => record,
                Err(e) if e.is_cancelled() => {
                    report.failed += 1;
                    debug!(epoch, object_id = %id, "Detail fetch cancelled");
                    continue;
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(epoch, object_id = %id, error = %e, "Detail fetch failed, skipping artwork");
                    continue;
                }
            };

            let Some(artwork) = self.displayable(id, &record) else {
                report.skipped += 1;
                continue;
            };

            if self
                .shared
                .with_current(epoch, |state| state.results.merge(artwork))
                .is_none()
            {
                // Remaining fetches keep running detached; their results are discarded
                report.outcome = self.shared.finish_stale(epoch);
                debug!(epoch, outcome = ?report.outcome, "Exploration lost currency while merging");
                return Ok(report);
            }
            report.merged += 1;
        }

        report.outcome = self.settle(epoch, &id_set);
        info!(
            epoch,
            candidates = report.candidates,
            merged = report.merged,
            skipped = report.skipped,
            failed = report.failed,
            outcome = ?report.outcome,
            "Exploration settled"
        );
        Ok(report)
    }

    /// Run an exploration on its own task
    pub fn spawn_explore(
        &self,
        text: String,
        min_year: i32,
        max_year: i32,
    ) -> JoinHandle<ExplorerResult<ExplorationReport>> {
        let orchestrator = self.clone();
        tokio::spawn(async move { orchestrator.explore(text, min_year, max_year).await })
    }

    /// Cancel the current exploration, if any
    ///
    /// Returns false when nothing was in flight. Results already merged stay.
    pub fn cancel_current(&self) -> bool {
        let mut state = self.shared.state.lock();
        let Some(handle) = state.current.as_ref() else {
            return false;
        };
        if handle.cancel.is_cancelled() {
            return false;
        }

        handle.cancel.cancel();
        info!(epoch = handle.epoch, "Exploration cancelled");
        // Keep the handle so the running exploration can still recognise itself
        state.phase = ExplorationPhase::Cancelled;
        state.notice = UserNotice::Cancelled;
        state.loading = false;
        self.shared.publish(&state);
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> ExplorerSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Receive a new snapshot after every state change
    ///
    /// Snapshots are published while the state lock is held. Do not keep a
    /// `watch::Ref` from `borrow()` alive across calls into the orchestrator;
    /// clone the snapshot out (or use `borrow_and_update().clone()`) first.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ExplorerSnapshot> {
        self.shared.updates.subscribe()
    }

    #[must_use]
    pub fn results(&self) -> Vec<Artwork> {
        self.shared.state.lock().results.to_vec()
    }

    #[must_use]
    pub fn notice(&self) -> UserNotice {
        self.shared.state.lock().notice
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state.lock().loading
    }

    #[must_use]
    pub fn phase(&self) -> ExplorationPhase {
        self.shared.state.lock().phase
    }

    /// The in-flight exploration, if any
    #[must_use]
    pub fn current(&self) -> Option<ExplorationHandle> {
        self.shared.state.lock().current.clone()
    }

    #[must_use]
    pub fn current_epoch(&self) -> Option<u64> {
        self.shared.state.lock().current.as_ref().map(|h| h.epoch)
    }

    fn begin(&self, query: &SearchQuery) -> (u64, CancellationHandle) {
        let mut state = self.shared.state.lock();

        if let Some(previous) = state.current.take() {
            previous.cancel.cancel();
            debug!(epoch = previous.epoch, "Superseded previous exploration");
        }

        state.epoch += 1;
        let epoch = state.epoch;
        let cancel = CancellationHandle::new();
        state.current = Some(ExplorationHandle {
            epoch,
            cancel: cancel.clone(),
            ids: Vec::new(),
        });
        state.phase = ExplorationPhase::Searching;
        state.notice = UserNotice::Loading;
        state.loading = true;
        self.shared.publish(&state);

        info!(
            epoch,
            query = %query.text(),
            min_year = query.min_year(),
            max_year = query.max_year(),
            "Exploration started"
        );
        (epoch, cancel)
    }

    fn fail_search(&self, epoch: u64, e: &ExplorerError) {
        let mut state = self.shared.state.lock();
        if !state.owns(epoch) {
            debug!(epoch, error = %e, "Superseded exploration's search ended");
            return;
        }

        let cancelled = e.is_cancelled()
            || state
                .current
                .as_ref()
                .is_some_and(|h| h.cancel.is_cancelled());

        if cancelled {
            debug!(epoch, "Exploration cancelled during search");
            state.finish_cancelled();
        } else {
            match e {
                ExplorerError::Remote { status, url } => {
                    error!(epoch, status, url = %url, "Search request rejected");
                }
                other => error!(epoch, error = %other, "Search failed"),
            }
            state.current = None;
            state.phase = ExplorationPhase::Failed;
            state.notice = e.notice();
            state.loading = false;
        }
        self.shared.publish(&state);
    }

    fn settle(&self, epoch: u64, ids: &AHashSet<ObjectId>) -> ExplorationOutcome {
        let mut state = self.shared.state.lock();
        if !state.is_current(epoch) {
            drop(state);
            return self.shared.finish_stale(epoch);
        }

        let empty = state.results.count_in(ids) == 0;
        state.current = None;
        state.phase = ExplorationPhase::Settled { empty };
        state.notice = if empty { UserNotice::Empty } else { UserNotice::None };
        state.loading = false;
        self.shared.publish(&state);
        ExplorationOutcome::Settled(state.notice)
    }

    /// Normalize `record`, dropping it when it cannot be shown
    fn displayable(&self, id: ObjectId, record: &crate::collection::ObjectRecord) -> Option<Artwork> {
        match normalize(record) {
            Ok(artwork) if artwork.is_displayable() || self.config.retain_imageless() => Some(artwork),
            Ok(_) => {
                debug!(object_id = %id, "Skipping artwork without a primary image");
                None
            }
            Err(e) => {
                debug!(object_id = %id, error = %e, "Skipping malformed artwork");
                None
            }
        }
    }
}
