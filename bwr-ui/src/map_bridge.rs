//! Typed wrappers around the Leaflet and places autocomplete JS.
//!
//! The bridge functions live in `assets/js/*.js`; they are evaluated as
//! globals once Leaflet has loaded. The map page owns a [`MapHandle`] and
//! drives the map only through it.

use bwr_core::geo::MapView;
use bwr_core::geojson::Polyline;
use bwr_core::map_mode::Overlay;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

static LEAFLET_BRIDGE_JS: &str = include_str!("../assets/js/leaflet-bridge.js");
static PLACES_JS: &str = include_str!("../assets/js/places-autocomplete.js");

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('BWR JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// A JS string literal for `s`.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_json<T: Serialize + ?Sized>(value: &T) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("Failed to serialize map data: {}", e);
        "null".to_string()
    });
    js_str(&json)
}

/// Expose a Rust callback as `window[name]`, taking one string argument.
fn register_callback<F: FnMut(String) + 'static>(name: &str, callback: F) {
    let closure = Closure::<dyn FnMut(String)>::new(callback);
    if js_sys::Reflect::set(&js_sys::global(), &JsValue::from_str(name), closure.as_ref()).is_err()
    {
        warn!("Failed to register JS callback {}", name);
    }
    closure.forget();
}

/// Load Leaflet (if the page did not) and the bridge functions. Call once at
/// app startup.
pub fn init_map_scripts() {
    let store_js = format!("window.__bwrMapScripts = {};", js_str(LEAFLET_BRIDGE_JS));
    let _ = js_sys::eval(&store_js);

    call_js(&format!(
        r#"
        (function() {{
            if (typeof L === 'undefined' && !document.getElementById('bwr-leaflet-js')) {{
                var css = document.createElement('link');
                css.rel = 'stylesheet';
                css.href = {css};
                document.head.appendChild(css);
                var script = document.createElement('script');
                script.id = 'bwr-leaflet-js';
                script.src = {js};
                document.head.appendChild(script);
            }}
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined' && window.__bwrMapScripts) {{
                    clearInterval(waitForLeaflet);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__bwrMapScripts);
                    delete window.__bwrMapScripts;
                    window.bwrInitMap = bwrInitMap;
                    window.bwrFlyTo = bwrFlyTo;
                    window.bwrRenderOverlays = bwrRenderOverlays;
                    window.bwrSetTimeOverlay = bwrSetTimeOverlay;
                    window.bwrDestroyMap = bwrDestroyMap;
                    window.__bwrMapReady = true;
                    console.log('BWR map bridge initialized');
                }}
            }}, 100);
        }})();
        "#,
        css = js_str(LEAFLET_CSS),
        js = js_str(LEAFLET_JS),
    ));
}

/// Load the places library with `api_key` and the autocomplete bridge.
pub fn load_places_script(api_key: &str) {
    let src = format!(
        "https://maps.googleapis.com/maps/api/js?key={}&libraries=places",
        api_key
    );
    let store_js = format!("window.__bwrPlacesScript = {};", js_str(PLACES_JS));
    let _ = js_sys::eval(&store_js);
    call_js(&format!(
        r#"
        (function() {{
            if (!document.getElementById('bwr-places-js')) {{
                var script = document.createElement('script');
                script.id = 'bwr-places-js';
                script.src = {src};
                script.async = true;
                document.head.appendChild(script);
            }}
            if (window.__bwrPlacesScript) {{
                (0, eval)(window.__bwrPlacesScript);
                delete window.__bwrPlacesScript;
                window.bwrAttachAutocomplete = bwrAttachAutocomplete;
            }}
        }})();
        "#,
        src = js_str(&src),
    ));
}

/// Attach autocomplete to `input_id`; `on_place` receives the place as JSON.
///
/// Polls until the places library and the input both exist.
pub fn attach_places_autocomplete<F: FnMut(String) + 'static>(input_id: &str, on_place: F) {
    let callback_name = format!("__bwrPlaceChanged_{}", input_id.replace('-', "_"));
    register_callback(&callback_name, on_place);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof google !== 'undefined' && google.maps && google.maps.places &&
                    typeof window.bwrAttachAutocomplete !== 'undefined' &&
                    document.getElementById({input})) {{
                    clearInterval(poll);
                    try {{
                        window.bwrAttachAutocomplete({input}, {callback});
                    }} catch(e) {{ console.error('[BWR] bwrAttachAutocomplete error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        input = js_str(input_id),
        callback = js_str(&callback_name),
    ));
}

/// Handle to one Leaflet map instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MapHandle {
    container_id: String,
}

impl MapHandle {
    /// Create the map in `container_id` once Leaflet and the element exist.
    pub fn mount(container_id: &str, view: MapView) -> Self {
        call_js(&format!(
            r#"
            (function() {{
                var poll = setInterval(function() {{
                    if (window.__bwrMapReady && document.getElementById({id})) {{
                        clearInterval(poll);
                        try {{
                            window.bwrInitMap({id}, {view});
                        }} catch(e) {{ console.error('[BWR] bwrInitMap error:', e); }}
                    }}
                }}, 100);
            }})();
            "#,
            id = js_str(container_id),
            view = js_json(&view),
        ));
        Self {
            container_id: container_id.to_string(),
        }
    }

    /// Call a bridge function once this map exists.
    fn when_ready(&self, function: &str, argument: &str) {
        call_js(&format!(
            r#"
            (function() {{
                var poll = setInterval(function() {{
                    if (window.__bwrMaps && window.__bwrMaps[{id}]) {{
                        clearInterval(poll);
                        try {{
                            window.{function}({id}, {argument});
                        }} catch(e) {{ console.error('[BWR] {function} error:', e); }}
                    }}
                }}, 100);
            }})();
            "#,
            id = js_str(&self.container_id),
        ));
    }

    pub fn fly_to(&self, view: MapView) {
        self.when_ready("bwrFlyTo", &js_json(&view));
    }

    /// Replace the mode overlays with `overlays`.
    pub fn render(&self, overlays: &[Overlay]) {
        self.when_ready("bwrRenderOverlays", &js_json(overlays));
    }

    pub fn set_time_overlay(&self, polyline: &Polyline) {
        self.when_ready("bwrSetTimeOverlay", &js_json(polyline));
    }

    /// `on_click` receives the reservoir id of a clicked polygon.
    pub fn on_polygon_click<F: FnMut(String) + 'static>(&self, on_click: F) {
        register_callback(
            &format!("__bwrPolygonClick_{}", self.container_id),
            on_click,
        );
    }

    pub fn destroy(&self) {
        call_js(&format!(
            "window.bwrDestroyMap && window.bwrDestroyMap({});",
            js_str(&self.container_id)
        ));
    }
}
