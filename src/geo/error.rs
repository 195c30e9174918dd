//! Error types for geocoding lookups.

use thiserror::Error;

/// Result type for geocoding operations.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors that can occur while talking to a geocoding provider.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The query could not be sent (empty text, non-finite coordinate).
    #[error("Invalid geocoding query: {0}")]
    InvalidQuery(String),

    /// The provider answered with a 4xx status.
    #[error("Provider rejected request: HTTP {status}")]
    ProviderRejected { status: u16 },

    /// The provider answered with a non-success status outside the 4xx range.
    #[error("Provider error: HTTP {status}")]
    Upstream { status: u16 },

    /// Connection, timeout or body read failure. The request URL is
    /// stripped since its query string carries the access token.
    #[error("Transport failure: {0}")]
    Transport(reqwest::Error),

    /// The response body was not a feature collection.
    #[error("Malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GeoError {
    fn from(err: reqwest::Error) -> Self {
        GeoError::Transport(err.without_url())
    }
}

impl GeoError {
    /// Map a non-success HTTP status to the matching error kind.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status.is_client_error() {
            GeoError::ProviderRejected {
                status: status.as_u16(),
            }
        } else {
            GeoError::Upstream {
                status: status.as_u16(),
            }
        }
    }

    /// Whether the provider itself refused the request.
    pub fn is_provider_rejected(&self) -> bool {
        matches!(self, GeoError::ProviderRejected { .. })
    }
}
