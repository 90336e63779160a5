//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use bwr_core::client::ApiClient;
use bwr_core::config::ApiConfig;
use bwr_core::geojson::Polyline;
use bwr_core::map_mode::{MapSelection, ModeKind};
use bwr_core::request::RequestTracker;
use bwr_core::reservoir::ReservoirDetail;
use bwr_core::time_cursor::TimeControl;
use bwr_core::wizard::ComplaintWizard;
use dioxus::prelude::*;

/// Shared application state for the map and complaint pages.
#[derive(Clone, Copy)]
pub struct AppState {
    /// API client built from the compile-time config
    pub client: Signal<ApiClient>,
    /// Whether the reservoir list is still loading
    pub loading: Signal<bool>,
    /// Error message if the reservoir list could not be loaded
    pub error_msg: Signal<Option<String>>,
    /// Reservoirs from `GET /dams`
    pub reservoirs: Signal<Vec<ReservoirDetail>>,
    /// Active map mode and selection
    pub selection: Signal<MapSelection>,
    /// Detail of the selected reservoir, refreshed by the secondary fetch
    pub detail: Signal<Option<ReservoirDetail>>,
    /// Tokens for detail/forecast fetches
    pub detail_requests: Signal<RequestTracker>,
    /// Tokens for route fetches
    pub route_requests: Signal<RequestTracker>,
    /// Committed time slider value
    pub time_control: Signal<TimeControl>,
    /// GeoJSON overlay for the committed month
    pub time_overlay: Signal<Polyline>,
    /// Complaint wizard state
    pub wizard: Signal<ComplaintWizard>,
    /// Shown on the confirmation step when sending the complaint failed
    pub submit_notice: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self::with_mode(ModeKind::Overview)
    }

    /// Create a new AppState with the map starting in `mode`.
    pub fn with_mode(mode: ModeKind) -> Self {
        Self {
            client: Signal::new(ApiClient::new(ApiConfig::from_build_env())),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            reservoirs: Signal::new(Vec::new()),
            selection: Signal::new(MapSelection::new(mode)),
            detail: Signal::new(None),
            detail_requests: Signal::new(RequestTracker::new()),
            route_requests: Signal::new(RequestTracker::new()),
            time_control: Signal::new(TimeControl::new()),
            time_overlay: Signal::new(Polyline::default()),
            wizard: Signal::new(ComplaintWizard::new()),
            submit_notice: Signal::new(None),
        }
    }

    pub fn config(&self) -> ApiConfig {
        self.client.read().config().clone()
    }
}
