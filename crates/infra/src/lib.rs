//! # GoalPulse Infrastructure
//!
//! Infrastructure implementations of core ports and process-level setup.
//!
//! This crate contains:
//! - Engine configuration loading (environment, TOML and JSON files)
//! - Tracing subscriber initialization
//! - An in-memory goal store implementing `GoalRepository`
//!
//! ## Architecture
//! - Implements traits defined in `goalpulse-core`
//! - Contains all "impure" code (file system, environment, global subscriber)

pub mod config;
pub mod observability;
pub mod store;

// Re-export commonly used items
pub use observability::{init_tracing, TracingOptions};
pub use store::InMemoryGoalStore;
