//! Runner and race search over the results data source

pub mod application;

pub use application::*;
