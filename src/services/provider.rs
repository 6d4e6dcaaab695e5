use crate::constants::DEDUP_COORDINATE_SCALE;
use crate::error::Result;
use crate::models::{Coordinates, DistanceMeters, Place};
use async_trait::async_trait;

/// One raw hit from a place-search provider, before it is assigned a stable
/// identity. Providers fill in whatever optional attributes they have.
#[derive(Debug, Clone)]
pub struct PlaceCandidate {
    /// Provider-assigned identifier, when the provider has stable ids.
    pub provider_id: Option<String>,
    pub name: String,
    pub coordinates: Coordinates,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub price_level: Option<u8>,
    pub category: Option<String>,
}

impl PlaceCandidate {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        PlaceCandidate {
            provider_id: None,
            name,
            coordinates,
            phone: None,
            url: None,
            address: None,
            rating: None,
            user_rating_count: None,
            price_level: None,
            category: None,
        }
    }

    /// Key collapsing the same physical place across overlapping radius
    /// queries: name plus coordinates rounded to four decimal places.
    pub fn dedup_key(&self) -> String {
        let lat = (self.coordinates.lat * DEDUP_COORDINATE_SCALE).round() as i64;
        let lng = (self.coordinates.lng * DEDUP_COORDINATE_SCALE).round() as i64;
        format!("{}_{}_{}", self.name, lat, lng)
    }
}

impl From<PlaceCandidate> for Place {
    fn from(candidate: PlaceCandidate) -> Self {
        let id = match candidate.provider_id.as_deref() {
            Some(provider_id) => Place::id_from_provider(provider_id),
            // No provider id: fall back to the dedup key, which is equally
            // stable across consecutive searches.
            None => Place::id_from_provider(&candidate.dedup_key()),
        };

        Place {
            id,
            name: candidate.name,
            coordinates: candidate.coordinates,
            phone: candidate.phone,
            url: candidate.url,
            address: candidate.address,
            rating: candidate.rating,
            user_rating_count: candidate.user_rating_count,
            price_level: candidate.price_level,
            category: candidate.category,
        }
    }
}

/// A keyword search over a geographic region, answered by some remote
/// place-search service. The aggregator only ever talks to this trait;
/// concrete clients are injected at construction.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Search for `keyword` within a square region of side `span` centered
    /// at `center`. Returns raw candidates in provider order.
    async fn query(
        &self,
        keyword: &str,
        center: &Coordinates,
        span: DistanceMeters,
    ) -> Result<Vec<PlaceCandidate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, lat: f64, lng: f64) -> PlaceCandidate {
        PlaceCandidate::new(name.to_string(), Coordinates::new(lat, lng).unwrap())
    }

    #[test]
    fn test_dedup_key_collapses_nearby_duplicates() {
        // Same name, coordinates equal to four decimal places
        let a = candidate("Ichiran", 35.68123601, 139.76712499);
        let b = candidate("Ichiran", 35.68123644, 139.76712520);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_keeps_distinct_places() {
        let a = candidate("Ichiran", 35.6812, 139.7671);
        let far = candidate("Ichiran", 35.6912, 139.7671);
        let other_name = candidate("Afuri", 35.6812, 139.7671);
        assert_ne!(a.dedup_key(), far.dedup_key());
        assert_ne!(a.dedup_key(), other_name.dedup_key());
    }

    #[test]
    fn test_place_identity_prefers_provider_id() {
        let mut a = candidate("Ichiran", 35.6812, 139.7671);
        a.provider_id = Some("prov-1".to_string());
        let mut moved = candidate("Ichiran", 35.6815, 139.7675);
        moved.provider_id = Some("prov-1".to_string());

        let a: Place = a.into();
        let moved: Place = moved.into();
        assert_eq!(a.id, moved.id);
    }

    #[test]
    fn test_place_identity_from_dedup_key_is_stable() {
        let first: Place = candidate("Ichiran", 35.6812, 139.7671).into();
        let second: Place = candidate("Ichiran", 35.6812, 139.7671).into();
        assert_eq!(first.id, second.id);
    }
}
