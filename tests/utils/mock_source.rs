/// mockall double of the results data source for integration tests
use async_trait::async_trait;
use fellrace_finder_lib::{
    modules::results::domain::{RaceCore, RaceDocument, RunnerClubCount},
    AppResult, InMemoryDataSource, ResultsDataSource,
};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub DataSource {}

    #[async_trait]
    impl ResultsDataSource for DataSource {
        async fn fetch_runner_names(&self) -> AppResult<Vec<String>>;
        async fn fetch_race_rows_by_names(&self, names: &[String]) -> AppResult<Vec<RaceDocument>>;
        async fn fetch_clubs_for_names(&self, names: &[String]) -> AppResult<Vec<RunnerClubCount>>;
        async fn fetch_all_race_meta(&self) -> AppResult<Vec<RaceCore>>;
    }
}

/// Mock answering names, race rows and clubs from `store`
///
/// Race metadata expectations are left to the test.
pub fn mock_over(store: InMemoryDataSource) -> MockDataSource {
    let store = Arc::new(store);
    let mut mock = MockDataSource::new();

    let names = Arc::clone(&store);
    mock.expect_fetch_runner_names()
        .returning(move || Ok(names.runner_names()));
    let races = Arc::clone(&store);
    mock.expect_fetch_race_rows_by_names()
        .returning(move |names| Ok(races.races_for(names)));
    let clubs = Arc::clone(&store);
    mock.expect_fetch_clubs_for_names()
        .returning(move |names| Ok(clubs.club_counts_for(names)));

    mock
}
