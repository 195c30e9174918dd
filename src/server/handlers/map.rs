//! Geocoding endpoints.

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Serialize;

use super::super::response::{send_response, ApiResult};
use super::super::validation::{CoordsParams, LocationParams};
use super::super::AppState;
use crate::geo::Feature;

/// Payload of `GET /map/locations`.
#[derive(Debug, Serialize)]
pub struct LocationsData {
    pub locations: Vec<Feature>,
}

/// Payload of `GET /map/coords`.
///
/// The key is singular even though the value is a list; clients depend on it.
#[derive(Debug, Serialize)]
pub struct CoordsData {
    pub location: Vec<Feature>,
}

/// Forward geocode free text.
pub async fn search_by_location(
    State(state): State<AppState>,
    params: Result<Query<LocationParams>, QueryRejection>,
) -> ApiResult<LocationsData> {
    let Query(params) = params?;
    let location = params.validate()?;

    tracing::debug!("Searching locations for {:?}", location);
    let locations = state.geo.search_by_location(&location).await?;

    Ok(send_response(LocationsData { locations }))
}

/// Reverse geocode a coordinate pair.
pub async fn search_by_coords(
    State(state): State<AppState>,
    params: Result<Query<CoordsParams>, QueryRejection>,
) -> ApiResult<CoordsData> {
    let Query(params) = params?;
    let (lat, lng) = params.validate()?;

    tracing::debug!("Searching location at lat={} lng={}", lat, lng);
    let location = state.geo.search_by_coords(lat, lng).await?;

    Ok(send_response(CoordsData { location }))
}
