use std::collections::HashSet;
use std::sync::Arc;

use super::dto::{PartialNameSearchResponse, RaceNameSearchResponse, RunnerSearchResponse};
use super::wire::{decode_race_names, decode_runner_selections, SelectedRunner};
use crate::modules::identity::domain::{
    same_club, ClubSimilarityMatcher, IdentityClusterer, IdentityIndex, NameNormalizer,
    RunnerIdentity,
};
use crate::modules::results::domain::{RaceCore, RaceDocument, ResultsDataSource};
use crate::modules::statistics::domain::{
    latest_editions, overall_stats, CategoryRuleTable, RaceNameGroup, RaceNameGrouper, RaceRanker,
    RaceRecord,
};
use crate::shared::{
    cache::{CacheKey, CacheStats, CacheStore},
    config::SearchConfig,
    errors::{AppError, AppResult},
    utils::{upper_case_words, LogContext, TimedOperation},
};

const RUNNER_NAMES_KEY: &str = "runner-names";
// One entry for the whole index; buckets are not rebuilt per missing prefix
const IDENTITY_INDEX_KEY: &str = "identity-index";
const RACE_META_KEY: &str = "race-meta";
const RACE_NAME_GROUPS_KEY: &str = "race-name-groups";

/// Every race resolved for one runner selection, newest first
#[derive(Debug, Clone)]
struct RunnerRecords {
    runner: String,
    records: Vec<RaceRecord>,
}

/// Runner search and statistics over a results data source
///
/// All cache reads and writes happen here. Any data source failure is
/// logged and treated as an empty collection, and failed lookups are not
/// cached.
pub struct RunnerSearchService {
    data_source: Arc<dyn ResultsDataSource>,
    cache: Arc<CacheStore>,
    config: SearchConfig,
    normalizer: NameNormalizer,
    clusterer: IdentityClusterer,
    club_matcher: ClubSimilarityMatcher,
    ranker: RaceRanker,
    race_names: RaceNameGrouper,
}

impl RunnerSearchService {
    pub fn new(
        data_source: Arc<dyn ResultsDataSource>,
        cache: Arc<CacheStore>,
        config: SearchConfig,
    ) -> AppResult<Self> {
        config.validate().map_err(AppError::ConfigError)?;

        Ok(Self {
            data_source,
            cache,
            normalizer: NameNormalizer::new(config.bucket_prefix_length),
            clusterer: IdentityClusterer::new(&config),
            club_matcher: ClubSimilarityMatcher::new(&config),
            ranker: RaceRanker::new(CategoryRuleTable::standard()),
            race_names: RaceNameGrouper::new(config.race_name_threshold),
            config,
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Autocomplete runner identities for a partial name
    ///
    /// Queries shorter than the configured minimum return no items.
    pub async fn search_by_partial_name(&self, partial_name: &str) -> PartialNameSearchResponse {
        let (identities, _) = self.identities_for(partial_name).await;
        PartialNameSearchResponse {
            items: identities.iter().map(RunnerIdentity::to_view).collect(),
        }
    }

    /// Every distinct runner name, cached for the name index TTL
    pub async fn get_all_runner_names(&self) -> Vec<String> {
        if let Some(names) = self.cache.get::<Arc<Vec<String>>>(RUNNER_NAMES_KEY) {
            return names.as_ref().clone();
        }

        let timer = TimedOperation::new("fetch_runner_names");
        match self.data_source.fetch_runner_names().await {
            Ok(names) => {
                LogContext::fetch_operation("runner_names", Some(names.len()), Some(timer.finish()));
                if !names.is_empty() {
                    self.cache.set_with_ttl(
                        RUNNER_NAMES_KEY,
                        Arc::new(names.clone()),
                        self.config.name_index_ttl,
                    );
                }
                names
            }
            Err(e) => {
                tracing::warn!("Failed to fetch runner names: {}", e);
                Vec::new()
            }
        }
    }

    /// Races and statistics for a `$$`-delimited list of `"<name> - <club>"`
    ///
    /// `races` is the `[start_index, end_index)` slice of the newest-first
    /// race list, clamped to its bounds; statistics cover every race.
    pub async fn search_runner(
        &self,
        encoded_names: &str,
        start_index: usize,
        end_index: usize,
    ) -> RunnerSearchResponse {
        let timer = TimedOperation::new("search_runner");
        let selections = decode_runner_selections(encoded_names);

        let response = match self.runner_records(&selections).await {
            Some(found) => {
                let mut response = self.respond(found.runner.clone(), &found.records);
                response.races = page(found.records.clone(), start_index, end_index);
                response
            }
            None => RunnerSearchResponse::empty(),
        };

        timer.finish_with_info(&format!("{} races", response.total_races));
        response
    }

    /// Like [`search_runner`](Self::search_runner) but only over the named races
    ///
    /// `encoded_race_names` holds `||`-separated groups of `|`-separated
    /// spellings and may contain HTML entities. No paging is applied.
    pub async fn search_runner_by_race(
        &self,
        encoded_names: &str,
        encoded_race_names: &str,
    ) -> RunnerSearchResponse {
        let selections = decode_runner_selections(encoded_names);
        let wanted: HashSet<String> = decode_race_names(encoded_race_names)
            .into_iter()
            .map(|name| name.to_lowercase())
            .collect();

        let Some(found) = self.runner_records(&selections).await else {
            return RunnerSearchResponse::empty();
        };
        let records: Vec<RaceRecord> = found
            .records
            .iter()
            .filter(|record| wanted.contains(&record.name.trim().to_lowercase()))
            .cloned()
            .collect();

        let mut response = self.respond(found.runner.clone(), &records);
        response.races = records;
        response
    }

    /// Race name autocomplete over the latest edition of every race
    pub async fn search_race_names(&self, partial_race_name: &str) -> RaceNameSearchResponse {
        let query = partial_race_name.trim().to_lowercase();
        if query.chars().count() < self.config.min_partial_race_length {
            return RaceNameSearchResponse::default();
        }

        let groups = self.race_name_groups().await;
        let items: Vec<RaceNameGroup> = groups
            .iter()
            .filter(|group| {
                group.display.to_lowercase().contains(&query)
                    || group.original.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();

        LogContext::search_operation(&query, Some(items.len()));
        RaceNameSearchResponse { items }
    }

    /// Identities for a partial name, and whether every fetch behind them succeeded
    async fn identities_for(&self, partial_name: &str) -> (Vec<RunnerIdentity>, bool) {
        let query = partial_name.trim();
        if query.chars().count() < self.config.min_partial_name_length {
            return (Vec::new(), true);
        }

        let key = CacheKey::new("partial-name").part(query).build();
        if let Some(identities) = self.cache.get::<Vec<RunnerIdentity>>(&key) {
            return (identities, true);
        }

        LogContext::search_operation(query, None);
        let index = self.identity_index().await;
        let matches = index.lookup(query, self.config.max_autocomplete_results);
        if matches.is_empty() {
            LogContext::search_operation(query, Some(0));
            let complete = !index.is_empty();
            if complete {
                self.cache.set_with_ttl(key, Vec::<RunnerIdentity>::new(), self.config.result_ttl);
            }
            return (Vec::new(), complete);
        }

        let originals: Vec<String> = matches.iter().map(|n| n.original.clone()).collect();
        let (club_counts, complete) = match self.data_source.fetch_clubs_for_names(&originals).await {
            Ok(counts) => (counts, true),
            Err(e) => {
                tracing::warn!("Failed to fetch clubs for '{}': {}", query, e);
                (Vec::new(), false)
            }
        };

        let identities = self.clusterer.cluster(&matches, &club_counts);
        LogContext::search_operation(query, Some(identities.len()));
        if complete {
            self.cache.set_with_ttl(key, identities.clone(), self.config.result_ttl);
        }
        (identities, complete)
    }

    async fn identity_index(&self) -> Arc<IdentityIndex> {
        if let Some(index) = self.cache.get::<Arc<IdentityIndex>>(IDENTITY_INDEX_KEY) {
            return index;
        }

        let names = self.get_all_runner_names().await;
        let index = Arc::new(IdentityIndex::build(&names, &self.normalizer));
        if !index.is_empty() {
            self.cache.set_with_ttl(
                IDENTITY_INDEX_KEY,
                Arc::clone(&index),
                self.config.name_index_ttl,
            );
        }
        index
    }

    /// Race metadata, and whether the fetch succeeded
    async fn race_meta(&self) -> (Arc<Vec<RaceCore>>, bool) {
        if let Some(meta) = self.cache.get::<Arc<Vec<RaceCore>>>(RACE_META_KEY) {
            return (meta, true);
        }

        match self.data_source.fetch_all_race_meta().await {
            Ok(meta) => {
                LogContext::fetch_operation("race_meta", Some(meta.len()), None);
                let meta = Arc::new(meta);
                if !meta.is_empty() {
                    self.cache
                        .set_with_ttl(RACE_META_KEY, Arc::clone(&meta), self.config.result_ttl);
                }
                (meta, true)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch race metadata: {}", e);
                (Arc::new(Vec::new()), false)
            }
        }
    }

    async fn race_name_groups(&self) -> Arc<Vec<RaceNameGroup>> {
        if let Some(groups) = self.cache.get::<Arc<Vec<RaceNameGroup>>>(RACE_NAME_GROUPS_KEY) {
            return groups;
        }

        let (meta, complete) = self.race_meta().await;
        let latest = latest_editions(&meta);
        let groups = Arc::new(self.race_names.group(latest.iter().map(|r| r.name.as_str())));
        if complete && !groups.is_empty() {
            self.cache.set_with_ttl(
                RACE_NAME_GROUPS_KEY,
                Arc::clone(&groups),
                self.config.result_ttl,
            );
        }
        groups
    }

    async fn runner_records(&self, selections: &[SelectedRunner]) -> Option<Arc<RunnerRecords>> {
        let first = selections.first()?;
        let key = CacheKey::new("runner-races")
            .sorted_parts(selections.iter().map(|s| format!("{} {}", s.name, s.club)))
            .build();
        if let Some(found) = self.cache.get::<Arc<RunnerRecords>>(&key) {
            return Some(found);
        }

        let (names, clubs, identities_complete) = self.resolve_variations(selections).await;
        if names.is_empty() || clubs.is_empty() {
            tracing::debug!("No name or club variations for {} selections", selections.len());
            return None;
        }

        let documents = match self.data_source.fetch_race_rows_by_names(&names).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!("Failed to fetch races for {:?}: {}", names, e);
                return None;
            }
        };

        let mut records = self.build_records(&documents, &names, &clubs);
        let meta_complete = self.attach_race_meta(&mut records).await;
        records.sort_by(|a, b| b.date_time.cmp(&a.date_time));

        let found = Arc::new(RunnerRecords {
            runner: upper_case_words(&first.name.to_lowercase()),
            records,
        });
        if identities_complete && meta_complete {
            self.cache
                .set_with_ttl(key, Arc::clone(&found), self.config.result_ttl);
        } else {
            tracing::debug!("Not caching partial races for {} selections", selections.len());
        }
        Some(found)
    }

    /// Raw name spellings and club spellings behind the selected runners,
    /// and whether every identity lookup was complete
    async fn resolve_variations(
        &self,
        selections: &[SelectedRunner],
    ) -> (Vec<String>, Vec<String>, bool) {
        let mut names: Vec<String> = Vec::new();
        let mut clubs: Vec<String> = Vec::new();
        let mut complete = true;

        for selection in selections {
            let (identities, found_all) = self.identities_for(&selection.name).await;
            complete &= found_all;
            let label = format!("{} - {}", selection.name, selection.club).to_lowercase();
            let name = selection.name.to_lowercase();

            let exact: Vec<&RunnerIdentity> = identities
                .iter()
                .filter(|i| i.display_with_club().to_lowercase() == label)
                .collect();
            let chosen = if !exact.is_empty() {
                exact
            } else {
                let same_name: Vec<&RunnerIdentity> = identities
                    .iter()
                    .filter(|i| i.display_name.to_lowercase() == name)
                    .collect();
                if same_name.is_empty() {
                    identities.iter().collect()
                } else {
                    same_name
                }
            };

            for identity in chosen {
                for original in &identity.originals {
                    push_unique(&mut names, original);
                }
                for club in &identity.clubs {
                    if self.club_matcher.similar(&club.raw, &selection.club) {
                        push_unique(&mut clubs, &club.raw);
                    }
                }
            }
        }

        if clubs.iter().any(|c| c.trim().eq_ignore_ascii_case("unknown")) {
            push_unique(&mut clubs, "");
            push_unique(&mut clubs, " ");
        }

        (names, clubs, complete)
    }

    /// One record per race id, taken from the first matching name variation
    fn build_records(
        &self,
        documents: &[RaceDocument],
        names: &[String],
        clubs: &[String],
    ) -> Vec<RaceRecord> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut records = Vec::new();

        for name in names {
            for document in documents {
                let Some(runner) = document.find_runner(name) else {
                    continue;
                };
                if !clubs.iter().any(|club| same_club(club, &runner.club)) {
                    continue;
                }
                if seen.insert(document.id.as_str()) {
                    records.push(self.ranker.race_record(document, runner));
                }
            }
        }

        records
    }

    /// Attach the first matching metadata document to each record
    ///
    /// Returns false when the metadata fetch failed.
    async fn attach_race_meta(&self, records: &mut [RaceRecord]) -> bool {
        let (meta, complete) = self.race_meta().await;

        for record in records.iter_mut() {
            if let Some(info) = meta.iter().find(|m| m.describes(&record.name, &record.date)) {
                self.ranker.attach_race_info(record, info);
            }
        }
        complete
    }

    fn respond(&self, runner: String, records: &[RaceRecord]) -> RunnerSearchResponse {
        RunnerSearchResponse {
            runner,
            races: Vec::new(),
            total_races: records.len(),
            overall_stats: overall_stats(records),
            race_names: self.race_names.group(records.iter().map(|r| r.name.as_str())),
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// `items[start..end]` clamped to the bounds, empty when `end <= start`
fn page<T>(items: Vec<T>, start: usize, end: usize) -> Vec<T> {
    let start = start.min(items.len());
    let end = end.clamp(start, items.len());
    items.into_iter().skip(start).take(end - start).collect()
}
