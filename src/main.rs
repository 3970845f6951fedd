use std::sync::Arc;

use anyhow::{bail, Context};
use fellrace_finder_lib::{
    shared::utils::init_logger, AppConfig, CacheStore, JsonFileDataSource, RunnerSearchService,
};

const USAGE: &str = "usage: fellrace-finder <names PARTIAL | runner ENCODED [START END] | by-race ENCODED RACES | races PARTIAL | all-names>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let cache = Arc::new(CacheStore::new(config.cache_ttl, config.cache_max_entries));
    let data_source = Arc::new(JsonFileDataSource::from_config(&config));
    let search_config = config.search_config().context("Invalid search configuration")?;
    let service = RunnerSearchService::new(data_source, cache, search_config)
        .context("Invalid search configuration")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or_default();
    let index = |i: usize, default: usize| -> anyhow::Result<usize> {
        match args.get(i) {
            Some(v) => v.parse().with_context(|| format!("Invalid index '{}'", v)),
            None => Ok(default),
        }
    };

    let output = match arg(0) {
        "names" => serde_json::to_string_pretty(&service.search_by_partial_name(arg(1)).await)?,
        "runner" => {
            let (start, end) = (index(2, 0)?, index(3, usize::MAX)?);
            serde_json::to_string_pretty(&service.search_runner(arg(1), start, end).await)?
        }
        "by-race" => serde_json::to_string_pretty(
            &service.search_runner_by_race(arg(1), arg(2)).await,
        )?,
        "races" => serde_json::to_string_pretty(&service.search_race_names(arg(1)).await)?,
        "all-names" => serde_json::to_string_pretty(&service.get_all_runner_names().await)?,
        _ => bail!(USAGE),
    };

    println!("{}", output);
    log::debug!("Cache stats: {:?}", service.cache_stats());
    Ok(())
}
