use std::path::PathBuf;
use std::time::Duration;

use super::search_config::{SearchConfig, SearchConfigBuilder};
use crate::shared::errors::{AppError, AppResult};

const DEFAULT_DATA_FILE: &str = "data/races.json";
const DEFAULT_RACE_INFO_FILE: &str = "data/raceinfo.json";

/// Process-level settings read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON dump of race result documents
    pub data_file: PathBuf,
    /// JSON dump of race metadata documents
    pub race_info_file: PathBuf,
    /// Default TTL for cache entries
    pub cache_ttl: Duration,
    /// Upper bound on cache entries before oldest-first eviction
    pub cache_max_entries: usize,
}

impl AppConfig {
    /// Load configuration, reading a `.env` file first when present
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = lookup("FELLRACE_DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.into());
        let race_info_file =
            lookup("FELLRACE_RACE_INFO_FILE").unwrap_or_else(|| DEFAULT_RACE_INFO_FILE.into());

        let cache_ttl_secs = match lookup("FELLRACE_CACHE_TTL_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::ConfigError(format!("FELLRACE_CACHE_TTL_SECS: {}", e))
            })?,
            None => 86_400,
        };

        let cache_max_entries = match lookup("FELLRACE_CACHE_MAX_ENTRIES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::ConfigError(format!("FELLRACE_CACHE_MAX_ENTRIES: {}", e))
            })?,
            None => 10_000,
        };

        if cache_max_entries == 0 {
            return Err(AppError::ConfigError(
                "FELLRACE_CACHE_MAX_ENTRIES must be > 0".to_string(),
            ));
        }

        Ok(Self {
            data_file: PathBuf::from(data_file),
            race_info_file: PathBuf::from(race_info_file),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_max_entries,
        })
    }

    /// Search tuning with the configured cache TTL for results and the name index
    pub fn search_config(&self) -> AppResult<SearchConfig> {
        SearchConfigBuilder::new()
            .result_ttl(self.cache_ttl)
            .name_index_ttl(self.cache_ttl)
            .build()
            .map_err(AppError::ConfigError)
    }
}
