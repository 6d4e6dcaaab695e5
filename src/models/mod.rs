pub mod coordinates;
pub mod distance;
pub mod heading;
pub mod place;
pub mod search;

pub use coordinates::Coordinates;
pub use distance::{DistanceKm, DistanceMeters, RadiusMeters};
pub use heading::{HeadingSample, MapOrientation};
pub use place::{Place, PlaceId};
pub use search::{RankedResult, SearchRequest};
