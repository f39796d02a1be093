//! Review scheduling

pub mod scheduler;

pub use scheduler::{latest_reviews, next_review_date, pending_reviews, review_trend};
