use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::results::domain::RaceCore;

/// Leader of a whole race, a category or a club within a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacingWinner {
    pub name: String,
    pub time: String,
}

/// Everything computed about one runner's finish in one race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerRaceResult {
    /// `"<position> of <field size>"`, or the raw position when it is not a number
    pub position: String,
    /// Position as a rounded percentage of the field, `None` when unplaced
    pub percentage_position: Option<u32>,
    /// `"Winner!"`, `"Top <p>%"` or empty when unplaced
    pub race_percentage_position: String,
    pub category: String,
    pub category_position: String,
    /// `"Fastest <code>"` or `"Top <p>%"`
    pub category_percentage: String,
    pub category_winner: Option<PlacingWinner>,
    pub club: String,
    pub club_position: String,
    /// Empty for the club's fastest runner
    pub club_percentage: String,
    pub club_winner: Option<PlacingWinner>,
    pub time: String,
    pub winner: Option<PlacingWinner>,
    /// Empty for the leader
    pub time_from_first: String,
}

/// Race metadata derived values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceInfoExtras {
    pub race_id: String,
    pub race_type: String,
    pub number_of_runners: u32,
}

/// One race a runner took part in, with their placings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    pub id: String,
    pub name: String,
    /// `DD/MM/YYYY` as stored
    pub date: String,
    /// Parsed `date`, `None` when it does not parse
    pub date_time: Option<NaiveDate>,
    pub results_url: String,
    pub runner: RunnerRaceResult,
    /// Numeric finishing position, `None` for DNF, DSQ or blank positions
    pub place: Option<u32>,
    pub field_size: u32,
    /// Floor percentage of `place / field_size`
    pub place_percentage: Option<u32>,
    pub race_info: Option<RaceCore>,
    pub race_info_extras: Option<RaceInfoExtras>,
}

impl RaceRecord {
    pub fn is_win(&self) -> bool {
        self.place == Some(1)
    }

    /// Race distance in kilometres when metadata with a distance is attached
    pub fn distance_km(&self) -> Option<f64> {
        self.race_info
            .as_ref()
            .map(|info| info.distance.kilometers)
            .filter(|km| *km > 0.0)
    }

    pub fn climb_meters(&self) -> f64 {
        self.race_info
            .as_ref()
            .map(|info| info.climb.meters)
            .unwrap_or(0.0)
    }

    /// `"<race> - <date>"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.date)
    }
}
