/// Test helper functions and service builders
use super::factories::{race_info, RaceFactory};
use fellrace_finder_lib::{
    modules::results::domain::{RaceCore, RaceDocument},
    CacheStore, InMemoryDataSource, ResultsDataSource, RunnerSearchService, SearchConfig,
};
use std::sync::Arc;
use std::time::Duration;

/// Three races featuring John Smith under two spellings
pub fn sample_races() -> Vec<RaceDocument> {
    vec![
        RaceFactory::new("Coniston Fell Race")
            .id("101")
            .date("11/05/2019")
            .field_size(40)
            .runner("Bloggs, Joe", "Keswick AC", "MSEN", "01:00:00")
            .runner("Lee, Ann", "Pennine AC", "FV40", "01:01:00")
            .runner("Smith, John", "Pennine AC", "MV40", "01:02:30")
            .fillers(37)
            .build(),
        RaceFactory::new("Borrowdale")
            .id("102")
            .date("03/08/2019")
            .runner("John  Smith", "Pennine AC", "V40", "03:10:00")
            .runner("Bloggs, Joe", "Keswick AC", "M", "03:15:00")
            .build(),
        RaceFactory::new("Borrowdale")
            .id("103")
            .date("01/08/2020")
            .runner("Bloggs, Joe", "Keswick", "M", "03:05:00")
            .runner("Smith, John", "Pennine", "MV45", "03:20:30")
            .runner("Lee, Ann", "", "L", "03:40:00")
            .build(),
    ]
}

pub fn sample_race_info() -> Vec<RaceCore> {
    vec![
        race_info("9001", "Coniston Fell Race", "11/05/2019", 14.0, 1000.0),
        race_info("9002", "Borrowdale", "03/08/2019", 27.0, 2000.0),
        race_info("9003", "Borrowdale", "01/08/2020", 27.0, 2000.0),
    ]
}

pub fn sample_source() -> InMemoryDataSource {
    InMemoryDataSource::new(sample_races(), sample_race_info())
}

/// Build a search service over `source` with a fresh cache
pub fn build_service(source: Arc<dyn ResultsDataSource>) -> RunnerSearchService {
    let cache = Arc::new(CacheStore::new(Duration::from_secs(300), 1_000));
    RunnerSearchService::new(source, cache, SearchConfig::default())
        .expect("default search config is valid")
}
