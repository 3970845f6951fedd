use chrono::Datelike;

use crate::modules::statistics::domain::entities::{
    DistanceStats, MonthPerformance, OverallStats, RaceDistance, RaceRecord, YearPerformance,
};

/// Accumulates [`OverallStats`] one race record at a time
///
/// Records are expected to be unique by race id; the caller deduplicates.
/// Unplaced records count as races entered but stay out of every placing
/// and percentage figure.
#[derive(Debug, Default)]
pub struct OverallStatsBuilder {
    no_of_races: u32,
    no_of_wins: u32,
    placed_races: u32,
    position_total: u64,
    percentage_total: u64,
    highest_place: Option<u32>,
    best: Option<(u32, String, String)>,
    years: Vec<YearPerformance>,
    race_data: Vec<(Option<chrono::NaiveDate>, String, u32)>,
    distance: DistanceStats,
}

impl OverallStatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &RaceRecord) -> &mut Self {
        self.no_of_races += 1;
        if record.is_win() {
            self.no_of_wins += 1;
        }
        self.add_distance(record);

        let (Some(place), Some(percentage)) = (record.place, record.place_percentage) else {
            return self;
        };
        self.placed_races += 1;
        self.position_total += u64::from(place);
        self.percentage_total += u64::from(percentage);
        self.highest_place = Some(self.highest_place.map_or(place, |best| best.min(place)));

        let improves = match &self.best {
            Some((best, _, _)) => percentage < *best,
            None => true,
        };
        if improves {
            self.best = Some((percentage, record.label(), record.id.clone()));
        }

        if let Some(date) = record.date_time {
            self.add_to_month(date, percentage);
        }
        if let Some(rounded) = record.runner.percentage_position {
            self.race_data.push((record.date_time, record.date.clone(), rounded));
        }

        self
    }

    fn add_to_month(&mut self, date: chrono::NaiveDate, percentage: u32) {
        let year_index = match self.years.iter().position(|y| y.year == date.year()) {
            Some(index) => index,
            None => {
                self.years.push(YearPerformance {
                    year: date.year(),
                    months: Vec::new(),
                });
                self.years.len() - 1
            }
        };
        let months = &mut self.years[year_index].months;

        match months.iter_mut().find(|m| m.month_number == date.month()) {
            Some(month) => {
                month.races += 1;
                month.performance = month.performance.max(percentage);
            }
            None => months.push(MonthPerformance {
                month: date.format("%B").to_string(),
                month_number: date.month(),
                races: 1,
                performance: percentage,
            }),
        }
    }

    fn add_distance(&mut self, record: &RaceRecord) {
        let Some(km) = record.distance_km() else {
            return;
        };
        let stats = &mut self.distance;
        stats.races_with_distance += 1;
        stats.total_distance_km += km;
        stats.total_climb_meters += record.climb_meters();

        let entry = RaceDistance {
            race_id: record.id.clone(),
            name: record.name.clone(),
            date: record.date.clone(),
            distance_km: km,
        };
        if stats.longest_race.as_ref().map_or(true, |r| km > r.distance_km) {
            stats.longest_race = Some(entry.clone());
        }
        if stats.shortest_race.as_ref().map_or(true, |r| km < r.distance_km) {
            stats.shortest_race = Some(entry);
        }
    }

    pub fn build(self) -> OverallStats {
        let races = self.no_of_races;
        let race_win_percentage = if self.no_of_wins > 0 {
            format!("{}%", rounded_mean(u64::from(self.no_of_wins) * 100, races))
        } else {
            "0%".to_string()
        };

        let mut ascending = self.years.clone();
        ascending.sort_by_key(|y| y.year);

        let performance_by_year = ascending
            .iter()
            .filter(|y| !y.months.is_empty())
            .map(|y| {
                let total: u64 = y.months.iter().map(|m| u64::from(m.performance)).sum();
                (y.year, rounded_mean(total, y.months.len() as u32))
            })
            .collect();

        let performance_by_month = ascending
            .iter()
            .flat_map(|y| {
                let mut months = y.months.clone();
                months.sort_by_key(|m| m.month_number);
                months
                    .into_iter()
                    .map(move |m| (format!("{}-{}", y.year, m.month), format!("{}%", m.performance)))
            })
            .collect();

        let mut race_data = self.race_data;
        race_data.sort_by(|a, b| match (a.0, b.0) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut races_by_year = self.years;
        races_by_year.sort_by(|a, b| b.year.cmp(&a.year));

        let mut distance = self.distance;
        if distance.races_with_distance > 0 {
            distance.average_distance_km = round_2dp(
                distance.total_distance_km / f64::from(distance.races_with_distance),
            );
        }
        distance.total_distance_km = round_2dp(distance.total_distance_km);
        distance.total_climb_meters = round_2dp(distance.total_climb_meters);

        let (highest_percentage, best_race, best_race_id) = self.best.unwrap_or_default();

        OverallStats {
            no_of_races: races,
            no_of_wins: self.no_of_wins,
            race_win_percentage,
            overall_position: rounded_mean(self.position_total, self.placed_races),
            percentage_position: rounded_mean(self.percentage_total, self.placed_races),
            highest_place: self.highest_place.unwrap_or(0),
            highest_percentage,
            best_race,
            best_race_id,
            races_by_year,
            overall_race_data: race_data
                .into_iter()
                .map(|(_, date, percentage)| (date, percentage))
                .collect(),
            performance_by_year,
            performance_by_month,
            distance,
        }
    }
}

/// Overall stats for a set of unique race records
pub fn overall_stats(records: &[RaceRecord]) -> OverallStats {
    let mut builder = OverallStatsBuilder::new();
    for record in records {
        builder.add(record);
    }
    builder.build()
}

/// `total / count` rounded half up, 0 when `count` is 0
fn rounded_mean(total: u64, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    let count = u64::from(count);
    ((total * 2 + count) / (count * 2)) as u32
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
