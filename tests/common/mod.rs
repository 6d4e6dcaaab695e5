use nearplace::models::{Coordinates, Place};
use nearplace::services::provider::PlaceCandidate;

/// Initialize tracing for test output. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nearplace=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Search center used throughout the tests (Tokyo Station).
#[allow(dead_code)]
pub fn tokyo_station() -> Coordinates {
    Coordinates::new(35.681236, 139.767125).unwrap()
}

/// Create a raw provider candidate
#[allow(dead_code)]
pub fn candidate(name: &str, lat: f64, lng: f64) -> PlaceCandidate {
    PlaceCandidate::new(name.to_string(), Coordinates::new(lat, lng).unwrap())
}

/// Create a test place with a stable identity derived from `seed`
#[allow(dead_code)]
pub fn test_place(seed: &str, name: &str, lat: f64, lng: f64) -> Place {
    Place::new(
        Place::id_from_provider(seed),
        name.to_string(),
        Coordinates::new(lat, lng).unwrap(),
    )
}

/// Real-API tests need a key; skip when none is configured
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("PLACES_API_KEY").is_err()
}
