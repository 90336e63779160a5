//! Placeholder while the reservoir list loads.

use dioxus::prelude::*;

const DEFAULT_LABEL: &str = "Зареждане на данните...";

#[component]
pub fn LoadingSpinner(#[props(default = DEFAULT_LABEL.to_string())] label: String) -> Element {
    rsx! {
        div {
            role: "status",
            style: "text-align: center; padding: 32px; color: #555; font-style: italic;",
            "{label}"
        }
    }
}
