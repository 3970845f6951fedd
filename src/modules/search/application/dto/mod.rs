pub mod partial_name_search_response;
pub mod race_name_search_response;
pub mod runner_search_response;

pub use partial_name_search_response::*;
pub use race_name_search_response::*;
pub use runner_search_response::*;
