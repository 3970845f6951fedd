use async_trait::async_trait;
use std::collections::{BTreeSet, HashSet};

use crate::{
    modules::{
        identity::domain::services::canonical_club_label,
        results::domain::{
            entities::{RaceCore, RaceDocument, RunnerClubCount},
            repositories::ResultsDataSource,
        },
    },
    shared::errors::AppResult,
};

/// Results store held entirely in memory
///
/// Mirrors the queries a document database would answer: distinct names,
/// documents containing any of a set of names, and per-(name, club)
/// appearance counts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    races: Vec<RaceDocument>,
    race_meta: Vec<RaceCore>,
}

impl InMemoryDataSource {
    pub fn new(races: Vec<RaceDocument>, race_meta: Vec<RaceCore>) -> Self {
        Self { races, race_meta }
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    pub fn meta_count(&self) -> usize {
        self.race_meta.len()
    }

    pub fn runner_names(&self) -> Vec<String> {
        self.races
            .iter()
            .flat_map(|race| race.runners.iter().map(|r| r.name.clone()))
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    pub fn races_for(&self, names: &[String]) -> Vec<RaceDocument> {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        self.races
            .iter()
            .filter(|race| race.runners.iter().any(|r| wanted.contains(r.name.as_str())))
            .cloned()
            .collect()
    }

    /// Appearance counts grouped by name and canonical club, first-seen order
    pub fn club_counts_for(&self, names: &[String]) -> Vec<RunnerClubCount> {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let mut counts: Vec<RunnerClubCount> = Vec::new();

        for runner in self.races.iter().flat_map(|race| race.runners.iter()) {
            if !wanted.contains(runner.name.as_str()) {
                continue;
            }
            let club = canonical_club_label(&runner.club);
            match counts
                .iter_mut()
                .find(|c| c.name == runner.name && c.club == club)
            {
                Some(existing) => existing.count += 1,
                None => counts.push(RunnerClubCount {
                    name: runner.name.clone(),
                    club,
                    count: 1,
                }),
            }
        }

        counts
    }

    pub fn race_meta(&self) -> Vec<RaceCore> {
        self.race_meta.clone()
    }
}

#[async_trait]
impl ResultsDataSource for InMemoryDataSource {
    async fn fetch_runner_names(&self) -> AppResult<Vec<String>> {
        Ok(self.runner_names())
    }

    async fn fetch_race_rows_by_names(&self, names: &[String]) -> AppResult<Vec<RaceDocument>> {
        Ok(self.races_for(names))
    }

    async fn fetch_clubs_for_names(&self, names: &[String]) -> AppResult<Vec<RunnerClubCount>> {
        Ok(self.club_counts_for(names))
    }

    async fn fetch_all_race_meta(&self) -> AppResult<Vec<RaceCore>> {
        Ok(self.race_meta())
    }
}
