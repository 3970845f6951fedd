pub mod cache_key;
pub mod cache_store;

pub use cache_key::CacheKey;
pub use cache_store::{CacheStats, CacheStore};
