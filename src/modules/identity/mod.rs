//! Runner name normalization, club matching and identity clustering

pub mod domain;

pub use domain::*;
