pub mod category_code;
pub mod duration;
pub mod overall_stats_builder;
pub mod race_names;
pub mod race_ranking;
pub mod race_type;

pub use category_code::{CategoryRule, CategoryRuleTable, DEFAULT_CATEGORY};
pub use duration::{format_duration, parse_finish_time, pretty_finish_time, time_from_first};
pub use overall_stats_builder::{overall_stats, OverallStatsBuilder};
pub use race_names::{latest_editions, RaceNameGroup, RaceNameGrouper};
pub use race_ranking::{
    floor_percentage, parse_race_date, race_percentage, rounded_percentage, top_percentage,
    RaceRanker, RESULTS_URL_BASE,
};
pub use race_type::race_type;
