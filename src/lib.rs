pub mod modules;
pub mod shared;

pub use modules::{
    identity::domain::{NameNormalizer, NormalizedName, RunnerIdentity, RunnerIdentityView},
    results::{InMemoryDataSource, JsonFileDataSource, ResultsDataSource},
    search::{
        PartialNameSearchResponse, RaceNameSearchResponse, RunnerSearchResponse,
        RunnerSearchService,
    },
    statistics::domain::{OverallStats, RaceRecord},
};
pub use shared::{AppConfig, AppError, AppResult, CacheStore, SearchConfig};
