pub mod adapters;

pub use adapters::{InMemoryDataSource, JsonFileDataSource};
