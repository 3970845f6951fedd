use chrono::NaiveDate;

use super::category_code::CategoryRuleTable;
use super::duration::{pretty_finish_time, time_from_first};
use super::race_type::race_type;
use crate::modules::identity::domain::services::{same_club, NameNormalizer};
use crate::modules::results::domain::{RaceCore, RaceDocument, RaceRunner};
use crate::modules::statistics::domain::entities::{
    PlacingWinner, RaceInfoExtras, RaceRecord, RunnerRaceResult,
};
use crate::shared::utils::leading_number;

/// Base address of a race's published results page
pub const RESULTS_URL_BASE: &str = "https://fellrunner.org.uk/results.php?id=";

/// Floor of `position / total * 100`, 0 for an empty field
pub fn floor_percentage(position: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((u64::from(position) * 100) / u64::from(total)) as u32
}

/// `position / total * 100` rounded half up, 0 for an empty field
pub fn rounded_percentage(position: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (position, total) = (u64::from(position), u64::from(total));
    ((position * 200 + total) / (total * 2)) as u32
}

/// `"Top <p>%"` with `p` clamped to at least 1
pub fn top_percentage(position: u32, total: u32) -> String {
    format!("Top {}%", floor_percentage(position, total).max(1))
}

/// `"Winner!"` for first place, `"Top <p>%"` otherwise
pub fn race_percentage(position: u32, total: u32) -> String {
    if position == 1 {
        "Winner!".to_string()
    } else {
        top_percentage(position, total)
    }
}

/// Parse a `DD/MM/YYYY` race date
pub fn parse_race_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y").ok()
}

/// Numeric finishing position, `None` for DNF, DSQ, blank or zero
fn placing(position: &str) -> Option<u32> {
    leading_number(position)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
}

/// Position and field size of a runner within a sub-field
struct SubFieldPlacing<'a> {
    rank: Option<u32>,
    size: usize,
    leader: Option<&'a RaceRunner>,
}

/// Computes a runner's per-race placings: overall, in category, in club
pub struct RaceRanker {
    categories: CategoryRuleTable,
    normalizer: NameNormalizer,
}

impl RaceRanker {
    pub fn new(categories: CategoryRuleTable) -> Self {
        Self {
            categories,
            normalizer: NameNormalizer::default(),
        }
    }

    /// Build the record for `runner` finishing in `race`
    ///
    /// A runner without a numeric position (DNF, DSQ, blank) keeps the raw
    /// position and gets no percentiles. Category and club placings count
    /// placed runners only.
    pub fn race_record(&self, race: &RaceDocument, runner: &RaceRunner) -> RaceRecord {
        let field_size = race.field_size();
        let place = placing(&runner.position);
        let raw_position = runner.position.trim();
        let leader = race.leader();

        let category = self.categories.tidy_category_name(&runner.category);
        let in_category = self.sub_field(race, runner, |r| {
            self.categories.tidy_category_name(&r.category) == category
        });
        let in_club = self.sub_field(race, runner, |r| same_club(&r.club, &runner.club));

        let category_size = in_category.size as u32;
        let (category_position, category_percentage) = match in_category.rank {
            Some(1) => (format!("1 of {}", category_size), format!("Fastest {}", category)),
            Some(rank) => (
                format!("{} of {}", rank, category_size),
                top_percentage(rank, category_size),
            ),
            None => (raw_position.to_string(), String::new()),
        };

        let club_size = in_club.size as u32;
        let (club_position, club_percentage) = match in_club.rank {
            Some(1) => (format!("1 of {}", club_size), String::new()),
            Some(rank) => (format!("{} of {}", rank, club_size), top_percentage(rank, club_size)),
            None => (raw_position.to_string(), String::new()),
        };

        let result = RunnerRaceResult {
            position: match place {
                Some(_) => format!("{} of {}", raw_position, field_size),
                None => raw_position.to_string(),
            },
            percentage_position: place.map(|p| rounded_percentage(p, field_size)),
            race_percentage_position: place
                .map(|p| race_percentage(p, field_size))
                .unwrap_or_default(),
            category: category.clone(),
            category_position,
            category_percentage,
            category_winner: in_category.leader.map(|r| self.winner(r)),
            club: runner.club.clone(),
            club_position,
            club_percentage,
            club_winner: in_club.leader.map(|r| self.winner(r)),
            time: pretty_finish_time(&runner.time),
            winner: leader.map(|r| self.winner(r)),
            time_from_first: leader
                .map(|l| time_from_first(&l.time, &runner.time))
                .unwrap_or_default(),
        };

        RaceRecord {
            id: race.id.clone(),
            name: race.race.trim().to_string(),
            date: race.date.clone(),
            date_time: parse_race_date(&race.date),
            results_url: format!("{}{}", RESULTS_URL_BASE, race.id),
            runner: result,
            place,
            field_size,
            place_percentage: place.map(|p| floor_percentage(p, field_size)),
            race_info: None,
            race_info_extras: None,
        }
    }

    /// Attach race metadata and the values derived from it
    pub fn attach_race_info(&self, record: &mut RaceRecord, info: &RaceCore) {
        record.race_info_extras = Some(RaceInfoExtras {
            race_id: info.id.clone(),
            race_type: race_type(info),
            number_of_runners: record.field_size,
        });
        record.race_info = Some(info.clone());
    }

    fn sub_field<'a, F>(
        &self,
        race: &'a RaceDocument,
        runner: &RaceRunner,
        belongs: F,
    ) -> SubFieldPlacing<'a>
    where
        F: Fn(&RaceRunner) -> bool,
    {
        let name = runner.name.to_lowercase();
        let members: Vec<&RaceRunner> = race
            .runners
            .iter()
            .filter(|r| placing(&r.position).is_some() && belongs(r))
            .collect();

        SubFieldPlacing {
            rank: members
                .iter()
                .position(|r| r.name.to_lowercase() == name)
                .map(|i| i as u32 + 1),
            size: members.len(),
            leader: members.first().copied(),
        }
    }

    fn winner(&self, runner: &RaceRunner) -> PlacingWinner {
        PlacingWinner {
            name: self.normalizer.normalize(&runner.name).display,
            time: pretty_finish_time(&runner.time),
        }
    }
}

impl Default for RaceRanker {
    fn default() -> Self {
        Self::new(CategoryRuleTable::standard())
    }
}
