//! Progress bar and numbered circles above the complaint wizard.

use crate::state::AppState;
use bwr_core::wizard::WizardStep;
use dioxus::prelude::*;

#[component]
pub fn StepIndicator() -> Element {
    let state = use_context::<AppState>();
    let wizard = state.wizard.read();
    let current = wizard.step().number();
    let width = format!("width: {}%;", wizard.progress_percent());

    rsx! {
        div {
            style: "position: relative; margin-bottom: 24px;",
            div {
                style: "position: absolute; top: 15px; left: 0; right: 0; height: 2px; background: #ddd;",
                div { style: "height: 2px; background: #C62828; {width}" }
            }
            div {
                style: "position: relative; display: flex; justify-content: space-between;",
                for step in WizardStep::ALL {
                    div {
                        key: "{step.number()}",
                        title: "{step.title()}",
                        style: if current >= step.number() {
                            "width: 32px; height: 32px; border-radius: 50%; display: flex; align-items: center; justify-content: center; background: #C62828; color: white; font-weight: 600;"
                        } else {
                            "width: 32px; height: 32px; border-radius: 50%; display: flex; align-items: center; justify-content: center; background: white; border: 2px solid #ccc; font-weight: 600;"
                        },
                        if current > step.number() { "✓" } else { "{step.number()}" }
                    }
                }
            }
        }
    }
}
