//! Dropdown for switching the map mode.

use crate::state::AppState;
use bwr_core::map_mode::ModeKind;
use dioxus::prelude::*;

/// Mode selector. Every change resets the selected reservoir and panel.
#[component]
pub fn ModeMenu() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.selection.read().mode().kind();

    let on_change = move |evt: Event<FormData>| {
        let Some(kind) = evt.value().parse::<u8>().ok().and_then(ModeKind::from_id) else {
            return;
        };
        state.selection.write().select_mode(kind);
        state.detail.set(None);
        state.detail_requests.write().invalidate();
        state.route_requests.write().invalidate();
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "map-mode-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Изглед: "
            }
            select {
                id: "map-mode-select",
                onchange: on_change,
                for kind in ModeKind::ALL {
                    option {
                        value: "{kind.id()}",
                        selected: kind == current,
                        "{kind.title()}"
                    }
                }
            }
            p {
                style: "margin: 4px 0 0 0; font-size: 12px; color: #666;",
                "{current.description()}"
            }
        }
    }
}
