//! Error banner shown above the page content.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shows a close button when set
    #[props(default)]
    pub on_dismiss: Option<EventHandler<()>>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "display: flex; justify-content: space-between; gap: 8px; padding: 10px 14px; margin: 8px 0; background: #FDECEA; color: #B71C1C; border-left: 4px solid #C62828;",
            span {
                strong { "Грешка: " }
                "{props.message}"
            }
            if let Some(on_dismiss) = props.on_dismiss {
                button {
                    style: "border: none; background: none; color: inherit; cursor: pointer;",
                    title: "Затвори",
                    onclick: move |_| on_dismiss.call(()),
                    "✕"
                }
            }
        }
    }
}
