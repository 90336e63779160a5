//! Route tracing and month overlay output.

use bwr_core::client::ApiClient;
use bwr_core::geo::LatLng;
use bwr_core::geojson::Polyline;
use bwr_core::route::RoutePath;
use bwr_core::time_cursor::{TimeControl, TimeCursor};
use log::{info, warn};

/// One line per node: distance in km, kind, name, position.
pub fn route_lines(route: &RoutePath) -> Vec<String> {
    let mut lines: Vec<String> = route
        .path
        .iter()
        .map(|node| {
            format!(
                "{:>8.2} km\t{:?}\t{}\t{:.5},{:.5}",
                node.distance_from_start / 1000.0,
                node.kind,
                node.display_name,
                node.position.lat,
                node.position.lng
            )
        })
        .collect();
    lines.push(format!("Общо разстояние: {:.2} km", route.total_distance_km()));
    lines
}

pub async fn run_route(
    client: &ApiClient,
    lat: f64,
    lng: f64,
    dam_id: Option<&str>,
) -> anyhow::Result<()> {
    let route = client.fetch_route(dam_id, &LatLng::new(lat, lng)).await?;
    if route.is_empty() {
        warn!("No route found for {:.5},{:.5}", lat, lng);
        return Ok(());
    }
    match route.source() {
        Some(source) => info!("Water comes from {}", source.display_name),
        None => warn!("Route has no reservoir node"),
    }
    for line in route_lines(&route) {
        println!("{}", line);
    }
    Ok(())
}

pub fn overlay_summary(polyline: &Polyline) -> String {
    format!(
        "{} segments, {} points",
        polyline.segments.len(),
        polyline.point_count()
    )
}

/// Print the tile template and fetch the GeoJSON overlay for one month,
/// exactly as a committed slider value would.
pub async fn run_overlay(client: &ApiClient, year: i32, month: u32) -> anyhow::Result<()> {
    let cursor = TimeCursor::new(year, month)?;
    let mut control = TimeControl::new();
    let Some(fetch) = control.set(cursor, client.config()) else {
        return Ok(());
    };
    println!("{}", cursor.label());
    println!("Tiles: {}", fetch.tile_template);
    println!("GeoJSON: {}", fetch.geojson_url);

    let polyline = client.fetch_time_overlay(&fetch).await?;
    println!("{}", overlay_summary(&polyline));
    Ok(())
}
