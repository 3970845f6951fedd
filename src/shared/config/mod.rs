pub mod app_config;
pub mod search_config;

pub use app_config::AppConfig;
pub use search_config::{SearchConfig, SearchConfigBuilder};
