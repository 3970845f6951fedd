pub mod in_memory_data_source;
pub mod json_file_data_source;

pub use in_memory_data_source::InMemoryDataSource;
pub use json_file_data_source::JsonFileDataSource;
