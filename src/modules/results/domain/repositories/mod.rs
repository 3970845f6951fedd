pub mod results_data_source;

pub use results_data_source::ResultsDataSource;

#[cfg(test)]
pub use results_data_source::MockResultsDataSource;
