//! Web server exposing the geocoding API.
//!
//! - `GET /map/locations?location=..&access_token=..` forward search
//! - `GET /map/coords?lat=..&lng=..&access_token=..` reverse search
//! - `GET /health`

mod handlers;
mod response;
mod routes;
mod validation;

pub use handlers::{CoordsData, LocationsData};
pub use response::{ApiError, ApiResponse};
pub use routes::create_router;
pub use validation::{CoordsParams, LocationParams, ValidationErrors};

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::geo::{GeoLookup, MapboxGeoService};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub geo: Arc<dyn GeoLookup>,
}

impl AppState {
    pub fn new(geo: Arc<dyn GeoLookup>) -> Self {
        Self { geo }
    }

    /// State backed by the Mapbox provider.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let geo = MapboxGeoService::from_settings(settings)?;
        Ok(Self::new(Arc::new(geo)))
    }
}

/// Start the web server.
///
/// `host` may be an IP literal or a name to resolve.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let app = create_router(state);

    let listener = bind_listener(host, port).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn bind_listener(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
