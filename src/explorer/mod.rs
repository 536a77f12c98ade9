//! Query orchestration and the state it publishes
//!
//! `QueryOrchestrator` turns a `(text, min_year, max_year)` query into an
//! ordered, de-duplicated result set, superseding older explorations as new
//! ones start. Renderers either poll `snapshot()` or `subscribe()` to a
//! watch channel that receives every change.

pub mod orchestrator;
pub mod result_set;
pub mod state;

pub use orchestrator::{ExplorationHandle, QueryOrchestrator};
pub use result_set::{MergeOutcome, ResultSet};
pub use state::{
    ExplorationOutcome, ExplorationPhase, ExplorationReport, ExplorerSnapshot, UserNotice,
};
