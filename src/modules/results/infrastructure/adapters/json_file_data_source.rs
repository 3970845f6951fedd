use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

use super::InMemoryDataSource;
use crate::{
    modules::results::domain::{
        entities::{RaceCore, RaceDocument, RunnerClubCount},
        repositories::ResultsDataSource,
    },
    shared::{
        config::AppConfig,
        errors::{AppError, AppResult},
        utils::TimedOperation,
    },
};

/// Results store backed by two JSON files
///
/// The results file holds an array of race documents and the race-info file
/// an array of race metadata. Both are read on first use and kept in memory.
/// A missing race-info file yields no metadata rather than an error.
pub struct JsonFileDataSource {
    data_file: PathBuf,
    race_info_file: PathBuf,
    loaded: OnceCell<InMemoryDataSource>,
}

impl JsonFileDataSource {
    pub fn new(data_file: impl Into<PathBuf>, race_info_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            race_info_file: race_info_file.into(),
            loaded: OnceCell::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.data_file.clone(), config.race_info_file.clone())
    }

    async fn store(&self) -> AppResult<&InMemoryDataSource> {
        self.loaded
            .get_or_try_init(|| async {
                let timer = TimedOperation::new("load_results_files");
                let races: Vec<RaceDocument> = read_json_array(&self.data_file).await?;
                let race_meta: Vec<RaceCore> = if tokio::fs::try_exists(&self.race_info_file)
                    .await
                    .unwrap_or(false)
                {
                    read_json_array(&self.race_info_file).await?
                } else {
                    log::warn!(
                        "Race info file {} not found, continuing without race metadata",
                        self.race_info_file.display()
                    );
                    Vec::new()
                };
                let store = InMemoryDataSource::new(races, race_meta);
                timer.finish_with_info(&format!(
                    "{} races, {} race info records",
                    store.race_count(),
                    store.meta_count()
                ));
                Ok::<_, AppError>(store)
            })
            .await
    }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::DataSourceError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::SerializationError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

#[async_trait]
impl ResultsDataSource for JsonFileDataSource {
    async fn fetch_runner_names(&self) -> AppResult<Vec<String>> {
        Ok(self.store().await?.runner_names())
    }

    async fn fetch_race_rows_by_names(&self, names: &[String]) -> AppResult<Vec<RaceDocument>> {
        Ok(self.store().await?.races_for(names))
    }

    async fn fetch_clubs_for_names(&self, names: &[String]) -> AppResult<Vec<RunnerClubCount>> {
        Ok(self.store().await?.club_counts_for(names))
    }

    async fn fetch_all_race_meta(&self) -> AppResult<Vec<RaceCore>> {
        Ok(self.store().await?.race_meta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fellrace-finder-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_reads_results_and_tolerates_missing_race_info() {
        let data_file = temp_path("results.json");
        tokio::fs::write(
            &data_file,
            r#"[{"id": 7, "race": "Coniston", "date": "11/05/2019", "numberofrunners": 1,
                 "runners": [{"position": 1, "name": "Smith, John", "club": "", "category": "M", "time": "01:00:00"}]}]"#,
        )
        .await
        .unwrap();

        let source = JsonFileDataSource::new(&data_file, temp_path("missing.json"));

        assert_eq!(source.fetch_runner_names().await.unwrap(), vec!["Smith, John"]);
        assert!(source.fetch_all_race_meta().await.unwrap().is_empty());

        let clubs = source
            .fetch_clubs_for_names(&["Smith, John".to_string()])
            .await
            .unwrap();
        assert_eq!(clubs[0].club, "Unknown");

        let _ = tokio::fs::remove_file(&data_file).await;
    }

    #[tokio::test]
    async fn test_missing_results_file_is_a_data_source_error() {
        let source = JsonFileDataSource::new(temp_path("absent.json"), temp_path("absent-info.json"));

        let result = source.fetch_runner_names().await;
        assert!(matches!(result, Err(AppError::DataSourceError(_))));
    }

    #[tokio::test]
    async fn test_malformed_results_file_is_a_serialization_error() {
        let data_file = temp_path("malformed.json");
        tokio::fs::write(&data_file, "{not json").await.unwrap();

        let source = JsonFileDataSource::new(&data_file, temp_path("malformed-info.json"));
        let result = source.fetch_runner_names().await;
        assert!(matches!(result, Err(AppError::SerializationError(_))));

        let _ = tokio::fs::remove_file(&data_file).await;
    }
}
