use nearplace::config::Config;
use nearplace::models::{DistanceMeters, SearchRequest};
use nearplace::services::aggregator::NearbySearchAggregator;
use nearplace::services::places::PlacesClient;
use nearplace::services::provider::PlaceSearchProvider;
use std::sync::Arc;

mod common;

fn live_client() -> PlacesClient {
    let config = Config::from_env().expect("Failed to load configuration");
    match config.places_base_url {
        Some(base_url) => PlacesClient::with_endpoint(config.places_api_key, base_url),
        None => PlacesClient::new(config.places_api_key),
    }
}

#[tokio::test]
async fn test_places_text_search() {
    if common::should_skip_real_api_tests() {
        println!("Skipping real API test");
        return;
    }

    common::init_tracing();

    let client = live_client();
    let center = common::tokyo_station();

    let result = client
        .query("ramen", &center, DistanceMeters::from_raw(2000.0))
        .await;

    assert!(result.is_ok(), "Places query should succeed");

    let candidates = result.unwrap();
    assert!(!candidates.is_empty(), "Should find ramen near Tokyo Station");

    for candidate in &candidates {
        assert!(!candidate.name.is_empty(), "Candidate should have a name");
        assert!(
            candidate.coordinates.lat >= -90.0 && candidate.coordinates.lat <= 90.0,
            "Latitude should be valid: {}",
            candidate.coordinates.lat
        );
        assert!(
            candidate.coordinates.lng >= -180.0 && candidate.coordinates.lng <= 180.0,
            "Longitude should be valid: {}",
            candidate.coordinates.lng
        );
    }
}

#[tokio::test]
async fn test_end_to_end_nearby_search() {
    if common::should_skip_real_api_tests() {
        println!("Skipping real API test");
        return;
    }

    common::init_tracing();

    let aggregator = NearbySearchAggregator::new(Arc::new(live_client()));

    let mut request =
        SearchRequest::new("coffee".to_string(), common::tokyo_station()).unwrap();
    request.min_count = 5;

    let results = aggregator.search(&request).await.unwrap();

    assert!(!results.is_empty(), "Should find coffee near Tokyo Station");
    assert!(results.len() <= 5, "Result list is capped at min_count");

    for pair in results.windows(2) {
        assert!(
            pair[0].distance <= pair[1].distance,
            "Results should be ordered by ascending distance"
        );
    }
}
