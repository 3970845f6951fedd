//! Race results documents and the data source port that serves them

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::{InMemoryDataSource, JsonFileDataSource};
