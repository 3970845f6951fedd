pub mod overall_stats;
pub mod race_record;

pub use overall_stats::{DistanceStats, MonthPerformance, OverallStats, RaceDistance, YearPerformance};
pub use race_record::{PlacingWinner, RaceInfoExtras, RaceRecord, RunnerRaceResult};
