//! HTTP request handlers for the web server.

mod api;
mod map;

// Re-export handlers for use by the router
pub use api::health;
pub use map::{search_by_coords, search_by_location, CoordsData, LocationsData};
