//! Goal hierarchy construction and traversal

pub mod builder;

pub use builder::{
    ancestors_of, build_forest, build_forest_bounded, count_nodes, depth_first, ensure_acyclic,
    max_depth,
};
