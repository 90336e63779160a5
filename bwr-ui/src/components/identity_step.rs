//! First wizard step: who is submitting.

use crate::state::AppState;
use bwr_core::complaint::IdentityField;
use bwr_core::wizard::WizardError;
use dioxus::prelude::*;
use log::info;

#[component]
fn IdentityInput(field: IdentityField, value: String, invalid: bool) -> Element {
    let mut state = use_context::<AppState>();
    let border = if invalid { "#C62828" } else { "#ccc" };

    rsx! {
        div {
            style: "margin: 12px 0;",
            label {
                r#for: "{field.key()}",
                style: "display: block; font-weight: 600; margin-bottom: 4px;",
                "{field.label()}"
            }
            input {
                id: "{field.key()}",
                name: "{field.key()}",
                r#type: "{field.input_type()}",
                required: true,
                value: "{value}",
                style: "width: 100%; padding: 8px; box-sizing: border-box; border: 1px solid {border}; border-radius: 4px;",
                oninput: move |evt: Event<FormData>| {
                    state.wizard.write().set_identity(field, evt.value());
                },
            }
        }
    }
}

/// Name, phone, email and address, all required before moving on.
#[component]
pub fn IdentityStep() -> Element {
    let mut state = use_context::<AppState>();
    let mut missing = use_signal(|| None::<IdentityField>);
    let draft = state.wizard.read().draft().clone();

    let on_next = move |_: Event<MouseData>| {
        let result = state.wizard.write().advance();
        match result {
            Ok(step) => {
                info!("Complaint wizard moved to {}", step);
                missing.set(None);
            }
            Err(WizardError::MissingIdentityField(field)) => missing.set(Some(field)),
            Err(e) => log::warn!("{}", e),
        }
    };

    rsx! {
        div {
            for field in IdentityField::ALL {
                IdentityInput {
                    key: "{field.key()}",
                    field,
                    value: draft.identity(field).to_string(),
                    invalid: missing() == Some(field),
                }
            }
            if let Some(field) = missing() {
                p { style: "color: #C62828; font-size: 13px;", "Попълни полето „{field.label()}“." }
            }
            button {
                r#type: "button",
                style: "margin-top: 12px; padding: 8px 24px; background: #C62828; color: white; border: none; border-radius: 4px;",
                onclick: on_next,
                "Напред"
            }
        }
    }
}
