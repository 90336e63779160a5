//! Shared Dioxus components and Leaflet bridge for BWR web apps.
//!
//! This crate provides:
//! - `map_bridge`: the `MapHandle` over a Leaflet map, plus the places autocomplete hook
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (pickers, panels, wizard steps, etc.)

pub mod components;
pub mod map_bridge;
pub mod state;
