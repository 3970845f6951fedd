//! Per-race placings, overall performance statistics and race name grouping

pub mod domain;

pub use domain::*;
