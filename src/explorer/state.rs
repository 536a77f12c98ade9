//! Status types published to the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artwork::Artwork;

/// Status line shown above the result grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserNotice {
    #[default]
    None,
    Loading,
    Empty,
    TransientError,
    Cancelled,
}

impl UserNotice {
    /// Text for the status line; empty for `None`
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            UserNotice::None => "",
            UserNotice::Loading => "Loading...",
            UserNotice::Empty => "No results in the Met Museum Open Access Collection.",
            UserNotice::TransientError => "We are having trouble at the moment. Sorry!",
            UserNotice::Cancelled => "Cancelling previous query.",
        }
    }
}

/// Lifecycle of one exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorationPhase {
    Idle,
    Searching,
    Merging,
    Settled { empty: bool },
    /// The search step failed; the notice carries the user-facing message
    Failed,
    Cancelled,
}

/// How an exploration ended, from the exploration's own point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorationOutcome {
    /// Still current when every detail fetch settled; carries the final notice
    Settled(UserNotice),
    /// A newer exploration took over; nothing after that point was applied
    Superseded,
    /// Explicitly cancelled while current
    Cancelled,
}

/// Summary returned by `QueryOrchestrator::explore`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub epoch: u64,
    /// Ids returned by the search step
    pub candidates: usize,
    /// Artworks merged into the result set
    pub merged: usize,
    /// Records dropped for lacking an image or failing normalization
    pub skipped: usize,
    /// Detail fetches that settled with an error
    pub failed: usize,
    pub outcome: ExplorationOutcome,
}

/// Read-only view of the orchestrator for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerSnapshot {
    /// Epoch of the most recent exploration, 0 before the first one
    pub epoch: u64,
    pub phase: ExplorationPhase,
    pub notice: UserNotice,
    pub loading: bool,
    /// Ordered by year, ties in first-insertion order
    pub artworks: Vec<Artwork>,
    pub updated_at: DateTime<Utc>,
}

impl Default for ExplorerSnapshot {
    fn default() -> Self {
        Self {
            epoch: 0,
            phase: ExplorationPhase::Idle,
            notice: UserNotice::None,
            loading: false,
            artworks: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

impl ExplorerSnapshot {
    /// True while an exploration may still add results
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.phase,
            ExplorationPhase::Searching | ExplorationPhase::Merging
        )
    }
}
