//! Popover list used by the complaint wizard for reservoirs and categories.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct OptionPickerProps {
    pub label: String,
    /// Button text when nothing is selected
    pub placeholder: String,
    /// Label of the current selection
    #[props(default)]
    pub selected: Option<String>,
    /// `(key, label)` pairs
    pub options: Vec<(String, String)>,
    pub open: bool,
    pub on_toggle: EventHandler<()>,
    /// Receives the key of the chosen option
    pub on_select: EventHandler<String>,
}

#[component]
pub fn OptionPicker(props: OptionPickerProps) -> Element {
    let button_text = props
        .selected
        .clone()
        .unwrap_or_else(|| props.placeholder.clone());
    let on_toggle = props.on_toggle;
    let on_select = props.on_select;

    rsx! {
        div {
            style: "margin: 12px 0; position: relative;",
            label { style: "display: block; font-weight: 600; margin-bottom: 4px;", "{props.label}" }
            button {
                r#type: "button",
                style: "width: 100%; text-align: left; padding: 8px; background: white; border: 1px solid #ccc; border-radius: 4px;",
                onclick: move |_| on_toggle.call(()),
                "{button_text}"
            }
            if props.open {
                div {
                    style: "position: absolute; left: 0; right: 0; max-height: 240px; overflow-y: auto; background: white; border: 1px solid #ccc; border-radius: 4px; box-shadow: 0 2px 8px rgba(0,0,0,0.15); z-index: 10;",
                    for (key, label) in props.options.iter().cloned() {
                        div {
                            key: "{key}",
                            style: "padding: 8px; cursor: pointer;",
                            onclick: {
                                let key = key.clone();
                                move |_| on_select.call(key.clone())
                            },
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
