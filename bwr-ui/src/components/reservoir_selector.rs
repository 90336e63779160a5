//! Reservoir picker with a "go to" action for the overview map.

use crate::state::AppState;
use dioxus::prelude::*;

/// Reservoir dropdown plus a button that flies the map to the chosen one.
#[component]
pub fn ReservoirSelector(on_goto: EventHandler<()>) -> Element {
    let mut state = use_context::<AppState>();
    let reservoirs = state.reservoirs.read().clone();
    let selected = state
        .selection
        .read()
        .goto_target()
        .map(str::to_string)
        .unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        state.selection.write().set_goto_target(&evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 8px; align-items: center;",
            label {
                r#for: "reservoir-select",
                style: "font-weight: bold;",
                "Язовир: "
            }
            select {
                id: "reservoir-select",
                onchange: on_change,
                option { value: "", disabled: true, selected: selected.is_empty(), "Избери язовир" }
                for reservoir in reservoirs.iter() {
                    option {
                        value: "{reservoir.id()}",
                        selected: reservoir.id() == selected,
                        "{reservoir.display_name()}"
                    }
                }
            }
            button {
                disabled: selected.is_empty(),
                onclick: move |_| on_goto.call(()),
                "Отиди"
            }
        }
    }
}
