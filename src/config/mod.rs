//! Configuration module for art exploration
//!
//! This module provides the `ExplorerConfig` struct and its builder for
//! configuring the collection client and orchestrator with validation and
//! defaults matching the public Met Museum API.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::ExplorerConfigBuilder;
pub use types::{ExplorerConfig, YearBounds};
