//! Goal insights: port definitions and the service composing the engine

pub mod ports;
pub mod service;

pub use ports::GoalRepository;
pub use service::{build_dashboard, GoalInsightsService};
