//! Status and risk classification

pub mod classifier;

pub use classifier::*;
