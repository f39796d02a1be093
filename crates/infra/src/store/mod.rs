//! Goal storage adapters

pub mod memory;

pub use memory::InMemoryGoalStore;
