//! Detail panel for a clicked reservoir.

use bwr_core::measurement::Measurement;
use bwr_core::reservoir::ReservoirDetail;
use bwr_core::trend::{CtaPolicy, TrendSource};
use bwr_utils::dates::format_timestamp_bg;
use bwr_utils::numbers::{format_flow, format_volume};
use dioxus::prelude::*;

const NO_DESCRIPTION: &str = "Няма описание";
const NO_DATA: &str = "Няма данни";

/// Link target of the call-to-action.
pub const COMPLAINT_FORM_URL: &str = "/complaint-form";

#[derive(Props, Clone, PartialEq)]
pub struct ReservoirDetailPanelProps {
    pub detail: ReservoirDetail,
    /// Which rule fills the tendency row
    pub trend_source: TrendSource,
    #[props(default)]
    pub cta_policy: CtaPolicy,
    pub on_close: EventHandler<()>,
}

fn or_no_data(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NO_DATA)
        .to_string()
}

fn flow(value: Option<f64>) -> String {
    value
        .map(|v| format!("{} m³/s", format_flow(v)))
        .unwrap_or_else(|| NO_DATA.to_string())
}

/// Number of past measurements listed under the latest one.
const HISTORY_ROWS: usize = 5;

fn volume(value: Option<f64>) -> String {
    value
        .map(|v| format!("{} м³", format_volume(v)))
        .unwrap_or_else(|| NO_DATA.to_string())
}

fn dry_up_label(will_dry_up: Option<bool>) -> &'static str {
    match will_dry_up {
        Some(true) => "Да",
        Some(false) => "Не",
        None => NO_DATA,
    }
}

/// Date and volume of the measurements before the latest, newest first.
fn history_rows(detail: &ReservoirDetail) -> Vec<(String, String)> {
    detail
        .sorted_measurements()
        .iter()
        .skip(1)
        .take(HISTORY_ROWS)
        .map(|m| (format_timestamp_bg(&m.timestamp), volume(m.fill_volume)))
        .collect()
}

#[component]
fn LatestMeasurement(measurement: Measurement) -> Element {
    let date = format_timestamp_bg(&measurement.timestamp);
    let fill = volume(measurement.fill_volume);
    let incoming = flow(measurement.avg_incoming_flow);
    let outgoing = flow(measurement.avg_outgoing_flow);

    rsx! {
        table {
            style: "width: 100%; font-size: 13px; border-collapse: collapse;",
            tbody {
                tr { td { "Дата" } td { "{date}" } }
                tr { td { "Обем" } td { "{fill}" } }
                tr { td { "Входящ поток" } td { "{incoming}" } }
                tr { td { "Изходящ поток" } td { "{outgoing}" } }
            }
        }
    }
}

/// Identity, contacts, measurements, the tendency chosen by `trend_source`
/// and the dry-up flag.
#[component]
pub fn ReservoirDetailPanel(props: ReservoirDetailPanelProps) -> Element {
    let detail = &props.detail;
    let description = detail
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let municipality = or_no_data(detail.municipality.as_deref());
    let owner = or_no_data(detail.owner.as_deref());
    let owner_contact = or_no_data(detail.owner_contact.as_deref());
    let operator = or_no_data(detail.operator.as_deref());
    let operator_contact = or_no_data(detail.operator_contact.as_deref());
    let tendency = detail
        .tendency(props.trend_source)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| NO_DATA.to_string());
    let dry_up = dry_up_label(detail.will_dry_up());
    let latest = detail.latest_measurement().cloned();
    let history = history_rows(detail);
    let show_cta = detail.show_call_to_action(props.cta_policy);
    let on_close = props.on_close;

    rsx! {
        aside {
            style: "position: absolute; top: 12px; right: 12px; width: 320px; max-height: 90%; overflow-y: auto; background: white; padding: 16px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.2); z-index: 1000;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { style: "margin: 0;", "{detail.display_name()}" }
                button { onclick: move |_| on_close.call(()), "✕" }
            }
            p { style: "font-size: 13px; color: #444;", "{description}" }
            dl {
                style: "font-size: 13px;",
                dt { "Община" } dd { "{municipality}" }
                dt { "Собственик" } dd { "{owner} ({owner_contact})" }
                dt { "Оператор" } dd { "{operator} ({operator_contact})" }
            }
            if let Some(measurement) = latest {
                h4 { style: "margin: 12px 0 4px 0;", "Последно измерване" }
                LatestMeasurement { measurement }
            } else {
                p { style: "font-size: 13px; color: #666;", "Няма измервания" }
            }
            if !history.is_empty() {
                h4 { style: "margin: 12px 0 4px 0;", "Предишни измервания" }
                table {
                    style: "width: 100%; font-size: 12px; color: #444;",
                    tbody {
                        for (date, volume) in history {
                            tr { td { "{date}" } td { "{volume}" } }
                        }
                    }
                }
            }
            dl {
                style: "font-size: 13px; margin-top: 12px;",
                dt { "Тенденция" } dd { "{tendency}" }
                dt { "Ще пресъхне" } dd { "{dry_up}" }
            }
            if show_cta {
                a {
                    href: COMPLAINT_FORM_URL,
                    style: "display: block; margin-top: 12px; padding: 8px; text-align: center; background: #C62828; color: white; border-radius: 4px; text-decoration: none;",
                    "Подай сигнал"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_up_label() {
        assert_eq!(dry_up_label(Some(true)), "Да");
        assert_eq!(dry_up_label(Some(false)), "Не");
        assert_eq!(dry_up_label(None), NO_DATA);
    }

    #[test]
    fn test_history_skips_latest() {
        let detail: ReservoirDetail = serde_json::from_str(
            r#"{"id": "d1", "display_name": "Искър", "latitude": 42.5, "longitude": 23.25,
                "measurements": [
                    {"timestamp": "2024-04-19T08:00:00Z", "fill_volume": 290000000},
                    {"timestamp": "2024-04-21T08:00:00Z", "fill_volume": 310000000},
                    {"timestamp": "2024-04-20T08:00:00Z"}
                ]}"#,
        )
        .unwrap();
        assert_eq!(
            history_rows(&detail),
            vec![
                ("20.04.2024 г.".to_string(), NO_DATA.to_string()),
                ("19.04.2024 г.".to_string(), "290 000 000 м³".to_string()),
            ]
        );
    }

    #[test]
    fn test_dry_up_shown_without_measurements() {
        let detail: ReservoirDetail = serde_json::from_str(
            r#"{"id": "d2", "display_name": "Бели Искър", "latitude": 42.3, "longitude": 23.5,
                "max_volume": 1000}"#,
        )
        .unwrap();
        let series = serde_json::from_str(
            r#"[{"date": "2025-03-01", "forecasted_available_useful_volume": 500},
                {"date": "2025-04-01", "forecasted_available_useful_volume": 350}]"#,
        )
        .unwrap();
        let detail = detail.with_forecast(series);
        assert!(detail.latest_measurement().is_none());
        assert!(history_rows(&detail).is_empty());
        assert_eq!(dry_up_label(detail.will_dry_up()), "Да");
    }
}
