//! Address capture dialog for the route tracing mode.

use crate::map_bridge;
use bwr_core::address::{Address, PlaceResult};
use dioxus::prelude::*;
use log::warn;

const ADDRESS_INPUT_ID: &str = "bwr-address-input";

/// Modal with a places autocomplete input. `on_address` fires once a place
/// with components and coordinates has been picked.
#[component]
pub fn AddressDialog(on_address: EventHandler<Address>, on_dismiss: EventHandler<()>) -> Element {
    let mut notice = use_signal(|| None::<String>);
    let mut picked = use_signal(|| None::<Address>);

    // The autocomplete callback runs outside the Dioxus runtime, so it only
    // writes signals; the effect below forwards the address.
    use_hook(move || {
        map_bridge::attach_places_autocomplete(ADDRESS_INPUT_ID, move |json: String| {
            let place = serde_json::from_str::<PlaceResult>(&json).map_err(|e| e.to_string());
            match place.and_then(|p| Address::from_place(&p).map_err(|e| e.to_string())) {
                Ok(address) => {
                    notice.set(None);
                    picked.set(Some(address));
                }
                Err(e) => {
                    warn!("Ignoring place selection: {}", e);
                    notice.set(Some("Моля, избери адрес от списъка.".to_string()));
                }
            }
        });
    });

    use_effect(move || {
        if let Some(address) = picked() {
            on_address.call(address);
        }
    });

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 2000;",
            div {
                style: "background: white; padding: 24px; border-radius: 8px; width: 420px;",
                h3 { style: "margin-top: 0;", "Въведи своя адрес" }
                p {
                    style: "font-size: 13px; color: #555;",
                    "Ще покажем пътя, по който водата стига до теб."
                }
                input {
                    id: ADDRESS_INPUT_ID,
                    r#type: "text",
                    placeholder: "ул. Шипка 6, София",
                    style: "width: 100%; padding: 8px; box-sizing: border-box;",
                }
                if let Some(message) = notice() {
                    p { style: "color: #C62828; font-size: 12px;", "{message}" }
                }
                div {
                    style: "text-align: right; margin-top: 12px;",
                    button { onclick: move |_| on_dismiss.call(()), "Затвори" }
                }
            }
        }
    }
}
