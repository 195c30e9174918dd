//! Mapbox Geocoding API client.
//!
//! Both lookups go through the same URL builder and request executor; they
//! only differ in the query text and the result limit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::feature::FeatureCollection;
use super::{Feature, GeoError, GeoLookup, GeoResult, GeocodeQuery};
use crate::config::{ProviderConfig, Settings};

/// Geocoding backed by the Mapbox places endpoint.
#[derive(Clone)]
pub struct MapboxGeoService {
    config: ProviderConfig,
    client: Client,
}

impl MapboxGeoService {
    /// Create a service with its own pooled HTTP client.
    pub fn new(config: ProviderConfig, timeout: Duration, user_agent: &str) -> GeoResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Create a service around an existing HTTP client.
    pub fn with_client(config: ProviderConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Create a service from application settings.
    pub fn from_settings(settings: &Settings) -> GeoResult<Self> {
        Self::new(
            settings.provider.clone(),
            settings.request_timeout(),
            &settings.user_agent,
        )
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Provider URL for a query, without the query string.
    ///
    /// The text is percent-encoded as a single path segment so reserved
    /// characters like `/` and `&` cannot change the resource.
    fn construct_api_url(&self, query: &GeocodeQuery) -> String {
        let segment = query.path_segment();
        let encoded = urlencoding::encode(&segment);
        format!("{}{}.json", self.config.api_url, encoded)
    }

    async fn search(&self, query: GeocodeQuery) -> GeoResult<Vec<Feature>> {
        query.validate()?;

        let url = self.construct_api_url(&query);
        let limit = query.limit().to_string();
        debug!("Geocoding request: {} (limit={})", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_token", self.config.api_key.as_str()),
                ("autocomplete", "true"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Geocoding provider returned {} for {}", status, url);
            return Err(GeoError::from_status(status));
        }

        let body = response.bytes().await?;
        let collection: FeatureCollection = serde_json::from_slice(&body)?;
        debug!("Geocoding provider returned {} features", collection.features.len());

        Ok(collection.features)
    }
}

#[async_trait]
impl GeoLookup for MapboxGeoService {
    async fn search_by_location(&self, location: &str) -> GeoResult<Vec<Feature>> {
        self.search(GeocodeQuery::Location(location.to_string()))
            .await
    }

    async fn search_by_coords(&self, lat: f64, lng: f64) -> GeoResult<Vec<Feature>> {
        self.search(GeocodeQuery::Coords { lat, lng }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MapboxGeoService {
        MapboxGeoService::new(
            ProviderConfig {
                api_key: "pk.test".to_string(),
                api_url: "https://api.mapbox.com/geocoding/v5/mapbox.places/".to_string(),
            },
            Duration::from_secs(5),
            "geoproxy-test",
        )
        .unwrap()
    }

    #[test]
    fn test_url_encodes_reserved_characters() {
        let url = service().construct_api_url(&GeocodeQuery::Location(
            "Main St & 5th / Apt 2?".to_string(),
        ));
        assert_eq!(
            url,
            "https://api.mapbox.com/geocoding/v5/mapbox.places/Main%20St%20%26%205th%20%2F%20Apt%202%3F.json"
        );
    }

    #[test]
    fn test_url_keeps_unreserved_characters() {
        let url =
            service().construct_api_url(&GeocodeQuery::Location("a-b_c.d~e".to_string()));
        assert!(url.ends_with("/a-b_c.d~e.json"));
    }

    #[test]
    fn test_url_for_coords() {
        let url = service().construct_api_url(&GeocodeQuery::Coords {
            lat: 41.8,
            lng: -87.6,
        });
        assert!(url.ends_with("/-87.6%2C41.8.json"));
    }

    #[test]
    fn test_url_omits_access_token() {
        let url = service().construct_api_url(&GeocodeQuery::Location("Berlin".to_string()));
        assert!(!url.contains("pk.test"));
    }

    #[tokio::test]
    async fn test_blank_location_fails_without_request() {
        let err = service().search_by_location("  ").await.unwrap_err();
        assert!(matches!(err, GeoError::InvalidQuery(_)));
    }
}
