//! Map container component with loading state.

use dioxus::prelude::*;

/// Props for MapContainer
#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// The DOM id for the map container (Leaflet will render into this)
    pub id: String,
    /// Whether the reservoir list is still loading
    #[props(default = false)]
    pub loading: bool,
    /// Optional minimum height in pixels
    #[props(default = 560)]
    pub min_height: u32,
}

/// A container div for the Leaflet map with loading overlay.
#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "position: relative; width: 100%;",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666; z-index: 1000;",
                    "Зареждане на картата..."
                }
            }
            div {
                id: "{props.id}",
                style: "{style}",
            }
        }
    }
}
