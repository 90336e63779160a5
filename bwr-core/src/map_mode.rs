//! Map page state: the active mode, the selected reservoir and what to draw.
//!
//! Exactly one mode is active. Switching modes always drops the selected
//! reservoir and hides the detail panel.

use crate::address::Address;
use crate::config::ApiConfig;
use crate::geo::{LatLng, MapView};
use crate::reservoir::{find_reservoir, ReservoirSummary};
use crate::route::RoutePath;
use crate::time_cursor::TimeCursor;
use crate::trend::TrendSource;
use log::{debug, warn};
use serde::Serialize;

/// Mode identifiers as used in menus and `?type=map-N` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Overview,
    RouteTracing,
    HistoricalForecast,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [
        ModeKind::Overview,
        ModeKind::RouteTracing,
        ModeKind::HistoricalForecast,
    ];

    pub fn id(&self) -> u8 {
        match self {
            ModeKind::Overview => 1,
            ModeKind::RouteTracing => 2,
            ModeKind::HistoricalForecast => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Parse a home page deep link value such as `map-2`.
    pub fn from_query(value: &str) -> Option<Self> {
        value
            .trim()
            .strip_prefix("map-")
            .and_then(|n| n.parse().ok())
            .and_then(Self::from_id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModeKind::Overview => "Карта на България с язовири",
            ModeKind::RouteTracing => "Открий пътя на твоята вода",
            ModeKind::HistoricalForecast => "Статистика за изменението на пълноводието",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModeKind::Overview => "Разгледай язовирите в България и тяхното текущо състояние.",
            ModeKind::RouteTracing => {
                "Въведи адреса си и виж през кои язовири и селища минава водата до теб."
            }
            ModeKind::HistoricalForecast => {
                "Проследи как се е променяло пълноводието във времето и каква е прогнозата."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteTracing {
    pub dialog_open: bool,
    pub address: Option<Address>,
    pub route: Option<RoutePath>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalForecast {
    pub cursor: TimeCursor,
}

/// The active mode with its own state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapMode {
    #[default]
    Overview,
    RouteTracing(RouteTracing),
    HistoricalForecast(HistoricalForecast),
}

impl MapMode {
    /// Fresh state for a mode. Route tracing starts with the address dialog open.
    pub fn enter(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Overview => MapMode::Overview,
            ModeKind::RouteTracing => MapMode::RouteTracing(RouteTracing {
                dialog_open: true,
                ..Default::default()
            }),
            ModeKind::HistoricalForecast => {
                MapMode::HistoricalForecast(HistoricalForecast::default())
            }
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            MapMode::Overview => ModeKind::Overview,
            MapMode::RouteTracing(_) => ModeKind::RouteTracing,
            MapMode::HistoricalForecast(_) => ModeKind::HistoricalForecast,
        }
    }

    /// Which trend rule the detail panel uses in this mode.
    pub fn trend_source(&self) -> TrendSource {
        match self {
            MapMode::HistoricalForecast(_) => TrendSource::Forecast,
            _ => TrendSource::Measurements,
        }
    }

    fn shows_reservoir_polygons(&self) -> bool {
        !matches!(self, MapMode::RouteTracing(_))
    }
}

/// Something drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    ReservoirPolygon {
        reservoir_id: String,
        ring: Vec<LatLng>,
    },
    RoutePolyline {
        points: Vec<LatLng>,
    },
    TileLayer {
        url_template: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapSelection {
    mode: MapMode,
    selected_reservoir: Option<String>,
    panel_visible: bool,
    goto_target: Option<String>,
}

impl MapSelection {
    pub fn new(kind: ModeKind) -> Self {
        Self {
            mode: MapMode::enter(kind),
            ..Default::default()
        }
    }

    pub fn mode(&self) -> &MapMode {
        &self.mode
    }

    pub fn selected_reservoir(&self) -> Option<&str> {
        self.selected_reservoir.as_deref()
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn goto_target(&self) -> Option<&str> {
        self.goto_target.as_deref()
    }

    pub fn trend_source(&self) -> TrendSource {
        self.mode.trend_source()
    }

    /// Switch modes. Always resets the selection, even when re-selecting the
    /// active mode.
    pub fn select_mode(&mut self, kind: ModeKind) {
        debug!("Map mode {} -> {}", self.mode.kind().id(), kind.id());
        self.mode = MapMode::enter(kind);
        self.selected_reservoir = None;
        self.panel_visible = false;
        self.goto_target = None;
    }

    /// Polygon click. Ignored in route tracing, which draws no polygons.
    pub fn click_reservoir(&mut self, id: &str) -> bool {
        if !self.mode.shows_reservoir_polygons() {
            return false;
        }
        self.selected_reservoir = Some(id.to_string());
        self.panel_visible = true;
        true
    }

    pub fn close_panel(&mut self) {
        self.panel_visible = false;
        self.selected_reservoir = None;
    }

    pub fn set_goto_target(&mut self, id: &str) {
        self.goto_target = Some(id.to_string());
    }

    /// "Go to" in overview: the view centred on the picked reservoir.
    pub fn goto<R: AsRef<ReservoirSummary>>(&self, reservoirs: &[R]) -> Option<MapView> {
        if self.mode != MapMode::Overview {
            return None;
        }
        let id = self.goto_target.as_deref()?;
        match find_reservoir(reservoirs, id) {
            Some(reservoir) => Some(MapView::fly_to(reservoir.as_ref().position())),
            None => {
                warn!("Go-to target {} is not in the reservoir list", id);
                None
            }
        }
    }

    /// Address picked in the route dialog. Returns the view to fly to.
    pub fn address_chosen(&mut self, address: Address) -> Option<MapView> {
        let MapMode::RouteTracing(state) = &mut self.mode else {
            return None;
        };
        let view = MapView::fly_to(address.position);
        state.dialog_open = false;
        state.address = Some(address);
        state.route = None;
        Some(view)
    }

    pub fn dismiss_address_dialog(&mut self) {
        if let MapMode::RouteTracing(state) = &mut self.mode {
            state.dialog_open = false;
        }
    }

    pub fn address_dialog_open(&self) -> bool {
        matches!(&self.mode, MapMode::RouteTracing(state) if state.dialog_open)
    }

    pub fn address(&self) -> Option<&Address> {
        match &self.mode {
            MapMode::RouteTracing(state) => state.address.as_ref(),
            _ => None,
        }
    }

    /// Store a completed route. Dropped if the user already left route tracing.
    pub fn set_route(&mut self, route: RoutePath) -> bool {
        match &mut self.mode {
            MapMode::RouteTracing(state) => {
                state.route = Some(route);
                true
            }
            _ => false,
        }
    }

    pub fn route(&self) -> Option<&RoutePath> {
        match &self.mode {
            MapMode::RouteTracing(state) => state.route.as_ref(),
            _ => None,
        }
    }

    pub fn set_cursor(&mut self, cursor: TimeCursor) -> bool {
        match &mut self.mode {
            MapMode::HistoricalForecast(state) => {
                state.cursor = cursor;
                true
            }
            _ => false,
        }
    }

    pub fn cursor(&self) -> Option<TimeCursor> {
        match &self.mode {
            MapMode::HistoricalForecast(state) => Some(state.cursor),
            _ => None,
        }
    }

    /// What the map draws for the active mode, and nothing for the others.
    pub fn overlays<R: AsRef<ReservoirSummary>>(
        &self,
        reservoirs: &[R],
        config: &ApiConfig,
    ) -> Vec<Overlay> {
        let mut overlays = Vec::new();
        if self.mode.shows_reservoir_polygons() {
            overlays.extend(reservoir_polygons(reservoirs));
        }
        match &self.mode {
            MapMode::Overview => {}
            MapMode::RouteTracing(state) => {
                if let Some(route) = state.route.as_ref().filter(|r| !r.is_empty()) {
                    overlays.push(Overlay::RoutePolyline {
                        points: route.polyline(),
                    });
                }
            }
            MapMode::HistoricalForecast(state) => overlays.push(Overlay::TileLayer {
                url_template: state.cursor.tile_template(config),
            }),
        }
        overlays
    }
}

/// One polygon per reservoir that has boundary geometry.
fn reservoir_polygons<R: AsRef<ReservoirSummary>>(reservoirs: &[R]) -> Vec<Overlay> {
    reservoirs
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|r| {
            r.border_geometry
                .as_ref()
                .map(|ring| Overlay::ReservoirPolygon {
                    reservoir_id: r.id.clone(),
                    ring: ring.clone(),
                })
        })
        .collect()
}
