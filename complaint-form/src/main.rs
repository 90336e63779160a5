//! Complaint Form
//!
//! A three-step form for reporting a problem around a reservoir: who you are,
//! which reservoir and what kind of problem, then a confirmation screen with
//! share links.
//!
//! Data flow:
//! 1. On mount the reservoir list is fetched from `GET /dams` for the picker.
//! 2. `ComplaintWizard` holds the draft and decides when a step may advance.
//! 3. On submit the wizard clears the draft and moves to the confirmation step
//!    right away; the payload is POSTed to `/complaints` in the background.
//!    A failed POST is logged and shown as a notice on the confirmation step.

use bwr_core::complaint::ComplaintSubmission;
use bwr_core::wizard::WizardStep;
use bwr_ui::components::{
    ConfirmationStep, DetailsStep, ErrorDisplay, IdentityStep, LoadingSpinner, StepIndicator,
};
use bwr_ui::state::AppState;
use dioxus::prelude::*;

const SUBMIT_FAILED: &str =
    "Сигналът не можа да бъде изпратен до сървъра. Моля, опитай отново по-късно.";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("complaint-form-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load reservoirs for the picker on mount
    use_effect(move || {
        spawn(async move {
            let client = state.client.read().clone();
            let limit = client.config().page_limit;
            match client.list_dams(0, limit).await {
                Ok(dams) => state.reservoirs.set(dams),
                Err(e) => {
                    log::error!("Failed to load reservoirs: {}", e);
                    state
                        .error_msg
                        .set(Some(format!("Неуспешно зареждане на язовирите: {}", e)));
                }
            }
            state.loading.set(false);
        });
    });

    // Send in the background; the wizard has already moved on
    let on_submit = move |submission: ComplaintSubmission| {
        state.submit_notice.set(None);
        spawn(async move {
            let client = state.client.read().clone();
            match client.submit_complaint(&submission).await {
                Ok(_) => log::info!("Complaint accepted by the server"),
                Err(e) => {
                    log::error!("Error submitting complaint: {}", e);
                    state.submit_notice.set(Some(SUBMIT_FAILED.to_string()));
                }
            }
        });
    };

    let step = state.wizard.read().step();
    let body = match step {
        WizardStep::Identity => rsx! { IdentityStep {} },
        WizardStep::Details => {
            if (state.loading)() {
                rsx! { LoadingSpinner { label: "Зареждане на язовирите..." } }
            } else {
                rsx! { DetailsStep { on_submit } }
            }
        }
        WizardStep::Confirmation => rsx! { ConfirmationStep {} },
    };

    rsx! {
        div {
            style: "max-width: 640px; margin: 0 auto; padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h1 {
                style: "text-align: center; font-size: 32px;",
                span { style: "color: #C62828;", "Подай сигнал" }
                ", подобри своето бъдеще!"
            }

            StepIndicator {}

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay {
                    message: err,
                    on_dismiss: move |_: ()| state.error_msg.set(None),
                }
            }

            div {
                style: "background: white; border: 1px solid #eee; border-radius: 8px; padding: 16px;",
                h3 { style: "margin-top: 0;", "{step.title()}" }
                {body}
            }
        }
    }
}
