//! geoproxy - geocoding proxy backend.
//!
//! Forwards free-text and coordinate lookups to Mapbox and returns the
//! provider's features inside a uniform JSON envelope.

pub mod config;
pub mod geo;
pub mod server;
