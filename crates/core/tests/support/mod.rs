//! Shared test helpers for `goalpulse-core` integration tests.
//!
//! These helpers provide record builders and a lightweight repository mock so
//! that engine tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
