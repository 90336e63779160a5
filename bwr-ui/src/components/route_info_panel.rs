//! Route information for the route tracing mode.

use super::reservoir_detail_panel::COMPLAINT_FORM_URL;
use bwr_core::route::{NodePayload, PathNode, RoutePath};
use bwr_utils::numbers::format_volume;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct RouteInfoPanelProps {
    pub route: RoutePath,
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn node_details(payload: &NodePayload) -> Element {
    match payload {
        NodePayload::Settlement(place) => {
            let population = place
                .population
                .map(|p| format_volume(p as f64))
                .unwrap_or_else(|| "-".to_string());
            let consumption = place
                .consumption_per_capita
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            let price = place
                .water_price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string());
            rsx! {
                div {
                    style: "font-size: 12px; color: #555;",
                    p { "Население: {population} души" }
                    p { "Потребление: {consumption} м³/човек" }
                    p { "Цена на водата: {price} лв./м³" }
                }
            }
        }
        NodePayload::Reservoir(dam) => {
            let description = text(&dam.description);
            let municipality = text(&dam.municipality);
            let owner = text(&dam.owner);
            let operator = text(&dam.operator);
            rsx! {
                div {
                    style: "font-size: 12px; color: #555;",
                    p { "Описание: {description}" }
                    p { "Община: {municipality}" }
                    p { "Собственик: {owner}" }
                    p { "Оператор: {operator}" }
                }
            }
        }
        NodePayload::None => rsx! {},
    }
}

#[component]
fn RouteNode(node: PathNode) -> Element {
    let distance = format!("{:.2}", node.distance_from_start);
    let details = node_details(&node.payload);
    rsx! {
        div {
            style: "border-bottom: 1px solid #eee; padding-bottom: 6px; margin-bottom: 6px;",
            p { style: "font-weight: 600; margin: 0;", "{node.display_name}" }
            {details}
            p { style: "font-size: 11px; color: #888; margin: 0;", "Разстояние от началото: {distance} м" }
        }
    }
}

/// Source reservoir, every node on the way and the total distance.
#[component]
pub fn RouteInfoPanel(props: RouteInfoPanelProps) -> Element {
    let route = &props.route;
    let source = route.source().cloned();
    let max_volume = source.as_ref().and_then(|node| match &node.payload {
        NodePayload::Reservoir(dam) => dam.max_volume.map(|v| format!("{} м³", format_volume(v))),
        _ => None,
    });
    let total_km = format!("{:.2}", route.total_distance_km());

    rsx! {
        aside {
            style: "position: absolute; top: 12px; right: 12px; width: 360px; max-height: 90%; overflow-y: auto; background: white; padding: 16px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.2); z-index: 1000;",
            h3 { style: "margin: 0 0 12px 0; text-align: center;", "Информация за маршрута" }
            if let Some(source) = source {
                div {
                    span { style: "font-size: 12px; color: #555;", "Източник на водата:" }
                    p { style: "font-weight: 600; margin: 0 0 8px 0;", "{source.display_name}" }
                    if let Some(max_volume) = max_volume {
                        span { style: "font-size: 12px; color: #555;", "Максимален обем:" }
                        p { style: "margin: 0 0 8px 0;", "{max_volume}" }
                    }
                }
            }
            h4 { style: "margin: 12px 0 4px 0;", "Път на водата" }
            p {
                style: "font-size: 12px; color: #555;",
                "Водата преминава през следните места, като снабдява населението и индустрията:"
            }
            for node in route.path.iter() {
                RouteNode { key: "{node.id}", node: node.clone() }
            }
            h4 { style: "margin: 12px 0 4px 0;", "Общо разстояние" }
            p { "Водата е изминала {total_km} км до крайната точка." }
            p {
                style: "font-size: 11px; color: #888;",
                "Данните са приблизителни и подлежат на промяна според текущите условия."
            }
            div {
                style: "text-align: center;",
                a {
                    href: COMPLAINT_FORM_URL,
                    style: "display: inline-block; margin-top: 8px; padding: 8px 16px; background: #E53935; color: white; border-radius: 4px; text-decoration: none;",
                    "Предприеми действие!"
                }
            }
        }
    }
}
