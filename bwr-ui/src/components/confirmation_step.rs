//! Last wizard step: thanks, share buttons and "skip".

use crate::state::AppState;
use bwr_core::complaint::ShareTarget;
use dioxus::prelude::*;
use log::warn;

fn current_page_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

#[component]
pub fn ConfirmationStep() -> Element {
    let mut state = use_context::<AppState>();
    let page_url = current_page_url();
    let notice = (state.submit_notice)();

    let on_skip = move |_: Event<MouseData>| {
        if let Err(e) = state.wizard.write().restart() {
            warn!("{}", e);
        }
        state.submit_notice.set(None);
    };

    rsx! {
        div {
            style: "text-align: center; padding: 8px;",
            p {
                style: "font-size: 18px;",
                "Благодарим ти за подаденият сигнал. Благодарение на теб, всички сме една стъпка по-близо до решаването на проблема!"
            }
            if let Some(message) = notice {
                p {
                    style: "padding: 8px; background: #FFF8E1; color: #8D6E63; border-radius: 4px; font-size: 13px;",
                    "{message}"
                }
            }
            p {
                style: "font-size: 13px; color: #666;",
                "Помогни ни да разпространим информацията, като я споделиш със своите познати и приятели:"
            }
            div {
                style: "display: flex; justify-content: center; gap: 16px; margin: 12px 0;",
                for target in ShareTarget::ALL {
                    a {
                        key: "{target.name()}",
                        href: "{target.share_url(&page_url)}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        style: "padding: 8px 12px; border: 1px solid #ccc; border-radius: 4px; text-decoration: none; color: #333;",
                        "{target.name()}"
                    }
                }
            }
            button {
                r#type: "button",
                style: "background: none; border: none; color: #666; text-decoration: underline; cursor: pointer;",
                onclick: on_skip,
                "Пропусни"
            }
        }
    }
}
