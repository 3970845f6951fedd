// Shared kernel: cross-cutting concerns used by every module

pub mod cache;
pub mod config;
pub mod errors;
pub mod utils;

pub use cache::{CacheKey, CacheStats, CacheStore};
pub use config::{AppConfig, SearchConfig};
pub use errors::{AppError, AppResult};
