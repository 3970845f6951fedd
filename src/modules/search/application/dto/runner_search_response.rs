use serde::{Deserialize, Serialize};

use crate::modules::statistics::domain::{OverallStats, RaceNameGroup, RaceRecord};

/// A runner's races, one page of them, with statistics over all of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunnerSearchResponse {
    pub runner: String,
    /// Newest first, restricted to the requested page
    pub races: Vec<RaceRecord>,
    /// Number of races before paging
    pub total_races: usize,
    /// Computed over every race, not just the page
    pub overall_stats: OverallStats,
    pub race_names: Vec<RaceNameGroup>,
}

impl RunnerSearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}
