use async_trait::async_trait;

use crate::modules::results::domain::entities::{RaceCore, RaceDocument, RunnerClubCount};
use crate::shared::errors::AppResult;

/// Port to the document store holding race results
///
/// Implementations may fail; callers in the search service treat any error
/// as an empty collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultsDataSource: Send + Sync {
    /// Full distinct runner-name population, sorted
    async fn fetch_runner_names(&self) -> AppResult<Vec<String>>;

    /// Every race document containing at least one of `names` (exact match)
    async fn fetch_race_rows_by_names(&self, names: &[String]) -> AppResult<Vec<RaceDocument>>;

    /// (name, club, count) for every appearance of `names`
    ///
    /// Blank clubs are reported as `Unknown`, `u/a` and `ua` as `Unattached`.
    async fn fetch_clubs_for_names(&self, names: &[String]) -> AppResult<Vec<RunnerClubCount>>;

    /// Metadata for every race edition
    async fn fetch_all_race_meta(&self) -> AppResult<Vec<RaceCore>>;
}
