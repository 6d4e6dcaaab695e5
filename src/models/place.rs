use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity for a place. Pins on the map and the selection state are
/// keyed by this, never by display name: two distinct places can share a name.
pub type PlaceId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub coordinates: Coordinates,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    /// Average rating reported by the provider, typically 1.0-5.0
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    /// Relative expensiveness bucket, 0 (free) to 4 (very expensive)
    pub price_level: Option<u8>,
    pub category: Option<String>,
}

impl Place {
    pub fn new(id: PlaceId, name: String, coordinates: Coordinates) -> Self {
        Place {
            id,
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

    /// Derive a stable [`PlaceId`] from a provider-assigned identifier.
    /// The same seed always yields the same id, so a place keeps its identity
    /// across consecutive searches and the pin diff can recognize it.
    pub fn id_from_provider(provider_id: &str) -> PlaceId {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, provider_id.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_provider_is_stable() {
        let a = Place::id_from_provider("ChIJ51cu8IcbXWARiRtXIothAS4");
        let b = Place::id_from_provider("ChIJ51cu8IcbXWARiRtXIothAS4");
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_from_provider_distinguishes_seeds() {
        let a = Place::id_from_provider("place-a");
        let b = Place::id_from_provider("place-b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_place_construction() {
        let coords = Coordinates::new(35.6812, 139.7671).unwrap();
        let place = Place::new(Place::id_from_provider("p1"), "Ramen Yokocho".to_string(), coords);

        assert_eq!(place.name, "Ramen Yokocho");
        assert!(place.phone.is_none());
        assert!(place.rating.is_none());
    }
}
