//! Dependency impact scoring

pub mod scorer;

pub use scorer::{impact_band, score_impact};
