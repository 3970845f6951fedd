/// End-to-end checks of runner identity resolution: normalization,
/// surname-bucket lookup and clustering of spellings into identities
use fellrace_finder_lib::modules::identity::domain::{
    IdentityClusterer, IdentityIndex, NameNormalizer,
};
use fellrace_finder_lib::modules::results::domain::RunnerClubCount;
use std::sync::Arc;

mod utils;
use utils::helpers::{build_service, sample_source};

#[test]
fn two_spellings_with_one_club_form_one_identity() {
    let normalizer = NameNormalizer::default();
    let index = IdentityIndex::build(&["Smith, John", "John  Smith"], &normalizer);
    let matches = index.lookup("john smith", 20);
    let clubs = vec![
        RunnerClubCount {
            name: "Smith, John".to_string(),
            club: "Pennine AC".to_string(),
            count: 4,
        },
        RunnerClubCount {
            name: "John  Smith".to_string(),
            club: "Pennine AC".to_string(),
            count: 1,
        },
    ];

    let identities = IdentityClusterer::default().cluster(&matches, &clubs);

    assert_eq!(identities.len(), 1, "Both spellings should merge");
    let view = identities[0].to_view();
    assert_eq!(view.display, "John Smith - Pennine AC");
    assert_eq!(view.original, "Smith, John|John  Smith");
    assert_eq!(view.count, 5);
}

#[tokio::test]
async fn partial_name_search_merges_spellings_and_club_variants() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_by_partial_name("John Smith").await;

    assert_eq!(response.items.len(), 1);
    let item = &response.items[0];
    assert_eq!(item.display, "John Smith - Pennine AC");
    assert_eq!(item.original, "Smith, John|John  Smith");
    assert_eq!(item.club, "Pennine AC|Pennine");
    assert_eq!(item.count, 3);
}

#[tokio::test]
async fn surname_only_query_finds_the_runner() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_by_partial_name("smith").await;

    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].display, "John Smith - Pennine AC");
}

#[tokio::test]
async fn unrelated_clubs_keep_identities_apart() {
    let service = build_service(Arc::new(sample_source()));

    let response = service.search_by_partial_name("ann lee").await;

    let displays: Vec<&str> = response.items.iter().map(|i| i.display.as_str()).collect();
    assert_eq!(displays, vec!["Ann Lee - Pennine AC", "Ann Lee - Unknown"]);
}

#[tokio::test]
async fn short_partial_names_return_no_items() {
    let service = build_service(Arc::new(sample_source()));

    assert!(service.search_by_partial_name("jo").await.items.is_empty());
    assert!(service.search_by_partial_name("   ").await.items.is_empty());
}

#[tokio::test]
async fn clustering_is_deterministic_across_services() {
    let first = build_service(Arc::new(sample_source()))
        .search_by_partial_name("bloggs")
        .await;
    let second = build_service(Arc::new(sample_source()))
        .search_by_partial_name("bloggs")
        .await;

    assert_eq!(first, second);
    assert_eq!(first.items[0].display, "Joe Bloggs - Keswick AC");
}

#[test]
fn normalization_is_idempotent() {
    let normalizer = NameNormalizer::default();

    for raw in ["Smith, John", "JOHN  SMITH", "o'neil, mary-jane", "  lee ,  ann "] {
        let once = normalizer.normalize(raw);
        let twice = normalizer.normalize(&once.display);
        assert_eq!(once.display, twice.display, "raw: {raw}");
        assert_eq!(once.surname_key, twice.surname_key, "raw: {raw}");
    }
}
