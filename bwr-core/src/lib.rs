//! Core types and UI state machines for the Bulgarian water reservoir apps.
//!
//! This crate provides:
//! - reservoir, measurement, route and forecast types decoded from the data API
//! - `wizard`: the three-step complaint wizard
//! - `map_mode`: map mode selection and per-mode overlays
//! - `trend`, `geojson`, `time_cursor`: pure derivations used by the map page
//! - `client` (feature `api`): HTTP client for the data and tile services

pub mod address;
pub mod complaint;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geo;
pub mod geojson;
pub mod map_mode;
pub mod measurement;
pub mod request;
pub mod reservoir;
pub mod route;
pub mod time_cursor;
pub mod trend;
pub mod wizard;
mod wire;

#[cfg(feature = "api")]
pub mod client;

pub use error::{BwrError, Result};
