/// Per-race placings and overall statistics computed through the search service
use fellrace_finder_lib::modules::statistics::domain::{race_percentage, CategoryRuleTable};
use fellrace_finder_lib::InMemoryDataSource;
use std::sync::Arc;

mod utils;
use utils::factories::RaceFactory;
use utils::helpers::{build_service, sample_source};
use utils::mock_source::mock_over;

const JOHN: &str = "John Smith - Pennine AC";

#[tokio::test]
async fn races_are_newest_first_with_placings() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_runner(JOHN, 0, 10).await;

    assert_eq!(response.runner, "John Smith");
    let ids: Vec<&str> = response.races.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["103", "102", "101"]);

    let coniston = &response.races[2];
    assert_eq!(coniston.runner.position, "3 of 40");
    assert_eq!(coniston.runner.race_percentage_position, "Top 7%");
    assert_eq!(coniston.runner.category_percentage, "Fastest MV40");
    assert_eq!(coniston.runner.club_position, "2 of 2");
    assert_eq!(coniston.runner.club_percentage, "Top 100%");
    assert_eq!(
        coniston.runner.club_winner.as_ref().map(|w| w.name.as_str()),
        Some("Ann Lee")
    );
    assert_eq!(coniston.runner.time_from_first, "2m 30s");
    assert_eq!(
        coniston.results_url,
        "https://fellrunner.org.uk/results.php?id=101"
    );
}

#[tokio::test]
async fn leader_has_empty_time_from_first() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_runner(JOHN, 0, 10).await;
    let borrowdale = &response.races[1];

    assert_eq!(borrowdale.runner.race_percentage_position, "Winner!");
    assert_eq!(borrowdale.runner.time_from_first, "");
    // Field size falls back to the number of finishers
    assert_eq!(borrowdale.runner.position, "1 of 2");
    assert_eq!(borrowdale.runner.category, "MV40");
}

#[tokio::test]
async fn race_metadata_is_attached() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_runner(JOHN, 0, 10).await;

    let extras: Vec<&str> = response
        .races
        .iter()
        .filter_map(|r| r.race_info_extras.as_ref())
        .map(|e| e.race_type.as_str())
        .collect();
    assert_eq!(extras, vec!["AL", "AL", "AM"]);
}

#[tokio::test]
async fn overall_stats_cover_every_race() {
    let service = build_service(Arc::new(sample_source()));

    let stats = service.search_runner(JOHN, 0, 1).await.overall_stats;

    assert_eq!(stats.no_of_races, 3);
    assert_eq!(stats.no_of_wins, 1);
    assert_eq!(stats.race_win_percentage, "33%");
    assert_eq!(stats.overall_position, 2);
    assert_eq!(stats.percentage_position, 41);
    assert_eq!(stats.highest_place, 1);
    assert_eq!(stats.highest_percentage, 7);
    assert_eq!(stats.best_race, "Coniston Fell Race - 11/05/2019");
    assert_eq!(stats.best_race_id, "101");

    let years: Vec<i32> = stats.races_by_year.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2020, 2019]);
    assert_eq!(stats.performance_by_year, vec![(2019, 29), (2020, 66)]);
    assert_eq!(
        stats.performance_by_month,
        vec![
            ("2019-May".to_string(), "7%".to_string()),
            ("2019-August".to_string(), "50%".to_string()),
            ("2020-August".to_string(), "66%".to_string()),
        ]
    );
    assert_eq!(stats.overall_race_data[0].0, "11/05/2019");
}

#[tokio::test]
async fn distance_totals() {
    let service = build_service(Arc::new(sample_source()));

    let distance = service.search_runner(JOHN, 0, 10).await.overall_stats.distance;

    assert_eq!(distance.races_with_distance, 3);
    assert_eq!(distance.total_distance_km, 68.0);
    assert_eq!(distance.total_climb_meters, 5000.0);
    assert_eq!(distance.average_distance_km, 22.67);
    assert_eq!(distance.longest_race.map(|r| r.race_id), Some("103".to_string()));
    assert_eq!(distance.shortest_race.map(|r| r.race_id), Some("101".to_string()));
}

#[tokio::test]
async fn pagination_slices_races_only() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_runner(JOHN, 1, 2).await;

    assert_eq!(response.races.len(), 1);
    assert_eq!(response.races[0].id, "102");
    assert_eq!(response.total_races, 3);
    assert_eq!(response.overall_stats.no_of_races, 3);

    let names: Vec<&str> = response.race_names.iter().map(|g| g.display.as_str()).collect();
    assert_eq!(names, vec!["Borrowdale", "Coniston Fell Race"]);
}

#[tokio::test]
async fn non_finishers_stay_out_of_placing_stats() {
    let races = vec![
        RaceFactory::new("Good Race")
            .id("201")
            .date("01/05/2019")
            .runner("Bloggs, Joe", "Keswick AC", "M", "01:00:00")
            .runner("Smith, John", "Pennine AC", "MV40", "01:05:00")
            .fillers(8)
            .build(),
        RaceFactory::new("Bad Day")
            .id("202")
            .date("01/06/2019")
            .runner("Bloggs, Joe", "Keswick AC", "M", "01:10:00")
            .runner("Lee, Ann", "Pennine AC", "FV40", "01:20:00")
            .non_finisher("Smith, John", "Pennine AC", "MV40", "DNF")
            .build(),
    ];
    let mut source = mock_over(InMemoryDataSource::new(races, Vec::new()));
    source.expect_fetch_all_race_meta().returning(|| Ok(Vec::new()));
    let service = build_service(Arc::new(source));

    let response = service.search_runner(JOHN, 0, 10).await;

    let bad_day = &response.races[0];
    assert_eq!(bad_day.name, "Bad Day");
    assert_eq!(bad_day.place, None);
    assert_eq!(bad_day.runner.position, "DNF");
    assert_eq!(bad_day.runner.percentage_position, None);
    assert_eq!(bad_day.runner.race_percentage_position, "");
    assert_eq!(bad_day.runner.club_position, "DNF");

    let stats = response.overall_stats;
    assert_eq!(stats.no_of_races, 2);
    assert_eq!(stats.no_of_wins, 0);
    assert_eq!(stats.highest_place, 2);
    assert_eq!(stats.highest_percentage, 20);
    assert_eq!(stats.best_race, "Good Race - 01/05/2019");
    assert_eq!(stats.overall_position, 2);
    assert_eq!(stats.percentage_position, 20);
    assert_eq!(stats.overall_race_data, vec![("01/05/2019".to_string(), 20)]);
}

#[test]
fn top_percentage_of_field() {
    assert_eq!(race_percentage(3, 40), "Top 7%");
    assert_eq!(race_percentage(1, 400), "Winner!");
    assert_eq!(race_percentage(2, 400), "Top 1%");
}

#[test]
fn category_fallbacks() {
    let table = CategoryRuleTable::standard();

    assert_eq!(table.tidy_category_name(""), "M");
    assert_eq!(table.tidy_category_name("Guest Runner"), "GUEST");
    assert_eq!(table.tidy_category_name("V40"), "MV40");
    assert_eq!(table.tidy_category_name("L"), "F");
}
