//! Interactive Water Map
//!
//! One page, three mutually exclusive modes:
//! - overview: every reservoir as a clickable polygon, plus a "go to" picker
//! - route tracing: asks for an address, then draws the route water takes to it
//! - historical/forecast: polygons plus a month slider driving tile and
//!   GeoJSON overlays
//!
//! The starting mode comes from `?type=map-N` (N = 1, 2, 3), defaulting to the
//! overview.
//!
//! Data flow:
//! 1. On mount the reservoir list is fetched from `GET /dams`.
//! 2. `MapSelection` decides what is drawn; an effect pushes its overlays to
//!    the Leaflet map through the page's `MapHandle`.
//! 3. A polygon click shows the listed data at once, then replaces it with
//!    `GET /dams/{id}`, whose body also carries the forecast series. Every
//!    fetch carries a request token; responses for an older token are dropped.

use bwr_core::address::Address;
use bwr_core::geo::MapView;
use bwr_core::geojson::Polyline;
use bwr_core::map_mode::ModeKind;
use bwr_core::reservoir::find_reservoir;
use bwr_core::time_cursor::{TimeCursor, TimeFetch};
use bwr_ui::components::{
    AddressDialog, ErrorDisplay, MapContainer, ModeMenu, PageHeader, ReservoirDetailPanel,
    ReservoirSelector, RouteInfoPanel, TimeSlider,
};
use bwr_ui::map_bridge::{self, MapHandle};
use bwr_ui::state::AppState;
use dioxus::prelude::*;

/// Map container DOM element ID used by Leaflet to render into.
const MAP_ID: &str = "water-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("water-map-root"))
        .launch(App);
}

/// Mode requested by the home page link, if any.
fn mode_from_location() -> Option<ModeKind> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    ModeKind::from_query(&params.get("type")?)
}

/// Select a reservoir and load its detail and forecast.
fn show_detail(mut state: AppState, id: String) {
    if !state.selection.write().click_reservoir(&id) {
        return;
    }
    let listed = find_reservoir(state.reservoirs.peek().as_slice(), &id).cloned();
    state.detail.set(listed);
    let token = state.detail_requests.write().issue();
    let client = state.client.peek().clone();

    spawn(async move {
        match client.get_dam_with_forecast(&id).await {
            Ok(detail) if state.detail_requests.peek().is_current(token) => {
                state.detail.set(Some(detail));
            }
            Ok(_) => log::info!("Dropping stale detail for {}", id),
            Err(e) => log::warn!("Failed to load reservoir {}: {}", id, e),
        }
    });
}

/// Fetch the GeoJSON overlay for a committed month. Failures draw nothing.
fn load_time_overlay(mut state: AppState, fetch: TimeFetch) {
    let client = state.client.peek().clone();
    spawn(async move {
        let polyline = match client.fetch_time_overlay(&fetch).await {
            Ok(polyline) => polyline,
            Err(e) => {
                log::warn!("No overlay for {}: {}", fetch.cursor.label(), e);
                Polyline::default()
            }
        };
        if state.time_control.peek().is_current(fetch.token) {
            state.time_overlay.set(polyline);
        }
    });
}

/// Fly to the address and fetch the route to it.
fn trace_route(mut state: AppState, map: &MapHandle, address: Address) {
    let position = address.position;
    let Some(view) = state.selection.write().address_chosen(address) else {
        return;
    };
    map.fly_to(view);
    let token = state.route_requests.write().issue();
    let client = state.client.peek().clone();

    spawn(async move {
        match client.fetch_route(None, &position).await {
            Ok(route) if state.route_requests.peek().is_current(token) => {
                if !state.selection.write().set_route(route) {
                    log::info!("Route arrived after leaving route tracing");
                }
            }
            Ok(_) => log::info!("Dropping stale route"),
            Err(e) => log::warn!("Failed to load route: {}", e),
        }
    });
}

#[component]
fn App() -> Element {
    let initial_mode = mode_from_location().unwrap_or(ModeKind::Overview);
    let mut state = use_context_provider(move || AppState::with_mode(initial_mode));
    let mut clicked = use_signal(|| None::<String>);

    // The page owns the map handle; everything else goes through it
    let map = use_hook(move || {
        map_bridge::init_map_scripts();
        if let Some(key) = state.config().maps_api_key {
            map_bridge::load_places_script(&key);
        } else {
            log::warn!("MAPS_API_KEY not set, address search is unavailable");
        }
        let map = MapHandle::mount(MAP_ID, MapView::default());
        // Runs outside the Dioxus runtime: only record the click
        map.on_polygon_click(move |id| clicked.set(Some(id)));
        map
    });

    let drop_map = map.clone();
    use_drop(move || drop_map.destroy());

    // Load reservoirs on mount
    use_effect(move || {
        spawn(async move {
            let client = state.client.peek().clone();
            let limit = client.config().page_limit;
            match client.list_dams(0, limit).await {
                Ok(dams) => state.reservoirs.set(dams),
                Err(e) => {
                    log::error!("Failed to load reservoirs: {}", e);
                    state
                        .error_msg
                        .set(Some(format!("Неуспешно зареждане на язовирите: {}", e)));
                }
            }
            state.loading.set(false);
        });
    });

    // Polygon clicks
    use_effect(move || {
        if let Some(id) = clicked() {
            show_detail(state, id);
        }
    });

    // Redraw mode overlays whenever the selection or the reservoir list changes
    let overlay_map = map.clone();
    use_effect(move || {
        let config = state.config();
        let overlays = state
            .selection
            .read()
            .overlays(state.reservoirs.read().as_slice(), &config);
        log::info!("Drawing {} overlays", overlays.len());
        overlay_map.render(&overlays);
    });

    // One tile update and one GeoJSON fetch per committed month
    use_effect(move || {
        let cursor = state.selection.read().cursor();
        match cursor {
            Some(cursor) => {
                let config = state.config();
                let fetch = state.time_control.write().set(cursor, &config);
                if let Some(fetch) = fetch {
                    log::info!("Loading overlay for {}", cursor.label());
                    load_time_overlay(state, fetch);
                }
            }
            None => {
                state.time_control.write().reset();
                state.time_overlay.set(Polyline::default());
            }
        }
    });

    let time_map = map.clone();
    use_effect(move || {
        let polyline = state.time_overlay.read();
        time_map.set_time_overlay(&polyline);
    });

    let goto_map = map.clone();
    let on_goto = move |_: ()| {
        let view = state
            .selection
            .read()
            .goto(state.reservoirs.read().as_slice());
        if let Some(view) = view {
            goto_map.fly_to(view);
        }
    };

    let route_map = map.clone();
    let on_address = move |address: Address| trace_route(state, &route_map, address);

    let on_close_panel = move |_: ()| {
        state.selection.write().close_panel();
        state.detail.set(None);
        state.detail_requests.write().invalidate();
    };

    let on_commit = move |cursor: TimeCursor| {
        state.selection.write().set_cursor(cursor);
    };

    let selection = state.selection.read().clone();
    let kind = selection.mode().kind();
    let detail = state.detail.read().clone().filter(|_| selection.panel_visible());

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            PageHeader {
                title: kind.title().to_string(),
                description: kind.description().to_string(),
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
                ModeMenu {}
                if kind == ModeKind::Overview {
                    ReservoirSelector { on_goto }
                }
                if kind == ModeKind::RouteTracing && !selection.address_dialog_open() {
                    button {
                        onclick: move |_| {
                            state.selection.write().select_mode(ModeKind::RouteTracing);
                            state.route_requests.write().invalidate();
                        },
                        "Смени адреса"
                    }
                }
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay {
                    message: err,
                    on_dismiss: move |_: ()| state.error_msg.set(None),
                }
            }

            div {
                style: "position: relative;",
                MapContainer {
                    id: MAP_ID.to_string(),
                    loading: (state.loading)(),
                }
                if let Some(detail) = detail {
                    ReservoirDetailPanel {
                        detail,
                        trend_source: selection.trend_source(),
                        on_close: on_close_panel,
                    }
                }
                if let Some(route) = selection.route().cloned() {
                    RouteInfoPanel { route }
                }
                if let Some(cursor) = selection.cursor() {
                    TimeSlider { value: cursor, on_commit }
                }
            }

            if selection.address_dialog_open() {
                AddressDialog {
                    on_address,
                    on_dismiss: move |_: ()| state.selection.write().dismiss_address_dialog(),
                }
            }
        }
    }
}
