//! Geocoding lookups against an external mapping provider.
//!
//! The [`GeoLookup`] trait is the seam between the HTTP handlers and the
//! provider. [`MapboxGeoService`] is the only implementation today.

mod error;
mod feature;
mod mapbox;

pub use error::{GeoError, GeoResult};
pub use feature::Feature;
pub use mapbox::MapboxGeoService;

use async_trait::async_trait;

/// Results requested for a free-text search.
pub const LOCATION_LIMIT: u8 = 5;
/// Results requested for a coordinate search.
pub const COORDS_LIMIT: u8 = 1;

/// A single geocoding query.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeQuery {
    /// Forward search by free text.
    Location(String),
    /// Reverse search by coordinate pair.
    Coords { lat: f64, lng: f64 },
}

impl GeocodeQuery {
    /// Unencoded text that becomes the provider path segment.
    ///
    /// Coordinates are rendered longitude first.
    pub fn path_segment(&self) -> String {
        match self {
            GeocodeQuery::Location(text) => text.clone(),
            GeocodeQuery::Coords { lat, lng } => format!("{},{}", lng, lat),
        }
    }

    /// Maximum number of features to ask the provider for.
    pub fn limit(&self) -> u8 {
        match self {
            GeocodeQuery::Location(_) => LOCATION_LIMIT,
            GeocodeQuery::Coords { .. } => COORDS_LIMIT,
        }
    }

    /// Reject queries that cannot produce a meaningful provider URL.
    ///
    /// Coordinates are not range checked; the provider enforces its own bounds.
    pub fn validate(&self) -> GeoResult<()> {
        match self {
            GeocodeQuery::Location(text) if text.trim().is_empty() => Err(
                GeoError::InvalidQuery("location must not be empty".to_string()),
            ),
            GeocodeQuery::Coords { lat, lng } if !lat.is_finite() || !lng.is_finite() => Err(
                GeoError::InvalidQuery(format!("coordinates must be finite: {}, {}", lat, lng)),
            ),
            _ => Ok(()),
        }
    }
}

/// A geocoding provider that resolves text and coordinates to features.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Forward search. Features come back in provider relevance order.
    async fn search_by_location(&self, location: &str) -> GeoResult<Vec<Feature>>;

    /// Reverse search returning at most one feature.
    async fn search_by_coords(&self, lat: f64, lng: f64) -> GeoResult<Vec<Feature>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_segment_is_longitude_first() {
        let query = GeocodeQuery::Coords {
            lat: 41.8,
            lng: -87.6,
        };
        assert_eq!(query.path_segment(), "-87.6,41.8");
    }

    #[test]
    fn test_coords_segment_drops_trailing_zero() {
        let query = GeocodeQuery::Coords { lat: 1.0, lng: 2.5 };
        assert_eq!(query.path_segment(), "2.5,1");
    }

    #[test]
    fn test_limits() {
        assert_eq!(GeocodeQuery::Location("Chicago".into()).limit(), 5);
        assert_eq!(GeocodeQuery::Coords { lat: 0.0, lng: 0.0 }.limit(), 1);
    }

    #[test]
    fn test_validate_rejects_blank_location() {
        let err = GeocodeQuery::Location("   ".into()).validate().unwrap_err();
        assert!(matches!(err, GeoError::InvalidQuery(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite_coords() {
        assert!(GeocodeQuery::Coords {
            lat: f64::NAN,
            lng: 0.0
        }
        .validate()
        .is_err());
        assert!(GeocodeQuery::Coords {
            lat: 0.0,
            lng: f64::INFINITY
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_validate_allows_out_of_range_coords() {
        let query = GeocodeQuery::Coords {
            lat: 123.0,
            lng: -500.0,
        };
        assert!(query.validate().is_ok());
    }
}
