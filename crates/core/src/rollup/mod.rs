//! Rollup statistics over flat lists and forests

pub mod calculator;
pub mod key_results;

pub use calculator::{
    aggregate, aggregate_by_level, critical_goals, rollup, subtree_rollups, RollupAccumulator,
};
pub use key_results::{
    key_result_progress, key_result_progress_by_goal, progress_from_key_results,
};
