//! # GoalPulse Domain
//!
//! Goal model and derived-view types for the GoalPulse rollup engine.
//!
//! This crate contains:
//! - The validated goal model and its closed enumerations
//! - Raw inbound records and their validation
//! - Outbound view types (rollups, impact scores, pending reviews)
//! - Engine configuration, policy constants and the error taxonomy
//!
//! ## Architecture
//! - No dependencies on other GoalPulse crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

#[macro_use]
pub mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use validation::{validate_goal, validate_goals, validate_snapshot, RecordValidator};
