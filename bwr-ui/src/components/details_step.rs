//! Second wizard step: which reservoir and what kind of problem.

use crate::components::OptionPicker;
use crate::state::AppState;
use bwr_core::complaint::{ComplaintCategory, ComplaintSubmission};
use bwr_core::wizard::{Picker, WizardError};
use dioxus::prelude::*;
use log::warn;

/// Reservoir and category pickers plus the free-text field for "other".
/// A successful submit hands the payload to `on_submit`.
#[component]
pub fn DetailsStep(on_submit: EventHandler<ComplaintSubmission>) -> Element {
    let mut state = use_context::<AppState>();
    let mut error = use_signal(|| None::<String>);

    let wizard = state.wizard.read().clone();
    let draft = wizard.draft();
    let reservoir_options: Vec<(String, String)> = state
        .reservoirs
        .read()
        .iter()
        .map(|r| (r.id().to_string(), r.display_name().to_string()))
        .collect();
    let category_options: Vec<(String, String)> = ComplaintCategory::ALL
        .iter()
        .map(|c| (c.key().to_string(), c.label().to_string()))
        .collect();
    let selected_reservoir = draft.reservoir.as_ref().map(|r| r.name.clone());
    let selected_category = draft.category.map(|c| c.label().to_string());
    let needs_text = wizard.requires_complaint_text();
    let complaint_text = draft.complaint_text.clone();

    let on_reservoir = move |id: String| {
        let name = state
            .reservoirs
            .read()
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| id.clone());
        if let Err(e) = state.wizard.write().select_reservoir(&id, &name) {
            warn!("{}", e);
        }
    };

    let on_category = move |key: String| match ComplaintCategory::from_key(&key) {
        Some(category) => {
            if let Err(e) = state.wizard.write().select_category(category) {
                warn!("{}", e);
            }
        }
        None => warn!("Unknown complaint category {}", key),
    };

    let on_form_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        let result = state.wizard.write().submit();
        match result {
            Ok(submission) => {
                error.set(None);
                on_submit.call(submission);
            }
            Err(WizardError::MissingComplaintText) => {
                error.set(Some("Опиши сигнала, който искаш да подадеш.".to_string()));
            }
            Err(e) => warn!("{}", e),
        }
    };

    rsx! {
        form {
            onsubmit: on_form_submit,
            OptionPicker {
                label: "Язовир, за който искаш да подадеш сигнал:".to_string(),
                placeholder: "Избери язовир".to_string(),
                selected: selected_reservoir,
                options: reservoir_options,
                open: wizard.open_picker() == Some(Picker::Reservoir),
                on_toggle: move |_| {
                    if let Err(e) = state.wizard.write().toggle_picker(Picker::Reservoir) {
                        warn!("{}", e);
                    }
                },
                on_select: on_reservoir,
            }
            OptionPicker {
                label: "За какво подаваш сигнал?".to_string(),
                placeholder: "Избери вид сигнал".to_string(),
                selected: selected_category,
                options: category_options,
                open: wizard.open_picker() == Some(Picker::Category),
                on_toggle: move |_| {
                    if let Err(e) = state.wizard.write().toggle_picker(Picker::Category) {
                        warn!("{}", e);
                    }
                },
                on_select: on_category,
            }
            if needs_text {
                div {
                    style: "margin: 12px 0;",
                    label {
                        r#for: "complaint_text",
                        style: "display: block; font-weight: 600; margin-bottom: 4px;",
                        "Опиши сигнала, който искаш да подадеш:"
                    }
                    textarea {
                        id: "complaint_text",
                        name: "complaint_text",
                        required: true,
                        rows: "4",
                        style: "width: 100%; padding: 8px; box-sizing: border-box;",
                        value: "{complaint_text}",
                        oninput: move |evt: Event<FormData>| {
                            state.wizard.write().set_complaint_text(evt.value());
                        },
                    }
                }
            }
            if let Some(message) = error() {
                p { style: "color: #C62828; font-size: 13px;", "{message}" }
            }
            button {
                r#type: "submit",
                style: "margin-top: 12px; padding: 8px 24px; background: #C62828; color: white; border: none; border-radius: 4px;",
                "Подай сигнал"
            }
        }
    }
}
