//! Response envelope and error mapping for the JSON API.
//!
//! Every response has the shape `{success, data?, message?}`.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::validation::ValidationErrors;
use crate::geo::GeoError;

/// Message sent when the provider refuses a lookup.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";
/// Message sent for failures without a dedicated mapping.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";
/// Message sent alongside per-field validation errors.
pub const VALIDATION_MESSAGE: &str = "The given data was invalid.";

/// Uniform API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Wrap a payload in a success envelope.
pub fn send_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Build an error envelope with the given status.
pub fn send_error(message: impl Into<String>, status: StatusCode) -> Response {
    (status, Json(ApiResponse::error(message))).into_response()
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// Request parameters failed validation.
    Validation(ValidationErrors),
    /// The query could not be sent to the provider.
    InvalidQuery(String),
    /// The provider rejected the lookup.
    Forbidden,
    /// Anything else.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse {
                    success: false,
                    data: Some(errors),
                    message: Some(VALIDATION_MESSAGE.to_string()),
                }),
            )
                .into_response(),
            ApiError::InvalidQuery(message) => {
                send_error(message, StatusCode::UNPROCESSABLE_ENTITY)
            }
            ApiError::Forbidden => send_error(FORBIDDEN_MESSAGE, StatusCode::FORBIDDEN),
            ApiError::Internal => {
                send_error(SERVER_ERROR_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<GeoError> for ApiError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::ProviderRejected { status } => {
                tracing::debug!("Geocoding provider rejected request with HTTP {}", status);
                ApiError::Forbidden
            }
            GeoError::InvalidQuery(message) => ApiError::InvalidQuery(message),
            other => {
                tracing::error!("Geocoding lookup failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add("query", rejection.body_text());
        ApiError::Validation(errors)
    }
}
