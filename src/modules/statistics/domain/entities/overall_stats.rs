use serde::{Deserialize, Serialize};

/// Aggregated performance over a set of races
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub no_of_races: u32,
    pub no_of_wins: u32,
    /// `"<p>%"` of races won
    pub race_win_percentage: String,
    /// Mean finishing position, rounded
    pub overall_position: u32,
    /// Mean floor percentage position, rounded
    pub percentage_position: u32,
    /// Best (lowest) finishing position
    pub highest_place: u32,
    /// Best (lowest) percentage position
    pub highest_percentage: u32,
    /// `"<race> - <date>"` of the best percentage finish
    pub best_race: String,
    pub best_race_id: String,
    /// Newest year first
    pub races_by_year: Vec<YearPerformance>,
    /// `[date, percentage]`, oldest first
    pub overall_race_data: Vec<(String, u32)>,
    /// `[year, average of monthly bests]`, oldest first
    pub performance_by_year: Vec<(i32, u32)>,
    /// `["YYYY-Month", "<p>%"]`, oldest first
    pub performance_by_month: Vec<(String, String)>,
    pub distance: DistanceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPerformance {
    pub year: i32,
    /// Months in first-seen order
    pub months: Vec<MonthPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPerformance {
    /// Full month name, e.g. `"May"`
    pub month: String,
    /// 1-based month number
    pub month_number: u32,
    pub races: u32,
    /// Highest percentage position recorded this month
    pub performance: u32,
}

/// Totals over races whose metadata carries a distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DistanceStats {
    pub races_with_distance: u32,
    pub total_distance_km: f64,
    pub total_climb_meters: f64,
    /// Rounded to two decimals
    pub average_distance_km: f64,
    pub longest_race: Option<RaceDistance>,
    pub shortest_race: Option<RaceDistance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDistance {
    pub race_id: String,
    pub name: String,
    pub date: String,
    pub distance_km: f64,
}
