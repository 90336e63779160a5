//! Month slider for the historical and forecast mode.

use bwr_core::time_cursor::{TimeCursor, MAX_YEAR, MIN_YEAR, PIVOT_YEAR, SLIDER_UNITS};
use dioxus::prelude::*;

/// Range input over every month from January 2020 to January 2026.
///
/// Dragging only updates the label; `on_commit` fires when the thumb is
/// released, so one drag issues one fetch.
#[component]
pub fn TimeSlider(value: TimeCursor, on_commit: EventHandler<TimeCursor>) -> Element {
    let mut preview = use_signal(|| value);
    let shown = preview();
    let label = shown.label();
    let max_index = SLIDER_UNITS - 1;
    let index = shown.index();

    let parse = |evt: &Event<FormData>| evt.value().parse::<usize>().ok().and_then(TimeCursor::from_index);

    let on_input = move |evt: Event<FormData>| {
        if let Some(cursor) = parse(&evt) {
            preview.set(cursor);
        }
    };

    let on_change = move |evt: Event<FormData>| {
        if let Some(cursor) = parse(&evt) {
            preview.set(cursor);
            on_commit.call(cursor);
        }
    };

    rsx! {
        div {
            style: "position: absolute; bottom: 16px; left: 50%; transform: translateX(-50%); width: 70%; background: white; padding: 12px 16px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.2); z-index: 1000;",
            div {
                style: "text-align: center; font-weight: bold; margin-bottom: 4px;",
                "{label}"
            }
            input {
                r#type: "range",
                min: "0",
                max: "{max_index}",
                step: "1",
                value: "{index}",
                style: "width: 100%;",
                oninput: on_input,
                onchange: on_change,
            }
            div {
                style: "display: flex; justify-content: space-between; font-size: 11px; color: #666;",
                for year in MIN_YEAR..=MAX_YEAR {
                    span {
                        key: "{year}",
                        style: if year == PIVOT_YEAR { "font-weight: bold; color: #1565C0;" } else { "" },
                        "{year}"
                    }
                }
            }
        }
    }
}
