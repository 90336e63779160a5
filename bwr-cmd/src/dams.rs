//! Reservoir listing and detail output.

use bwr_core::client::ApiClient;
use bwr_core::forecast::ForecastPoint;
use bwr_core::reservoir::ReservoirDetail;
use bwr_core::trend::{CtaPolicy, TrendSource};
use bwr_utils::dates::format_timestamp_bg;
use bwr_utils::numbers::{format_flow, format_volume};
use log::{info, warn};

const NO_DATA: &str = "Няма данни";

fn or_no_data(value: Option<String>) -> String {
    value.unwrap_or_else(|| NO_DATA.to_string())
}

/// One line per reservoir: id, name, position, max volume.
pub fn summary_line(dam: &ReservoirDetail) -> String {
    let summary = &dam.summary;
    format!(
        "{}\t{}\t{:.5},{:.5}\t{}",
        summary.id,
        summary.display_name,
        summary.latitude,
        summary.longitude,
        or_no_data(summary.max_volume.map(format_volume))
    )
}

/// The same fields the detail panel shows, as text lines.
pub fn detail_lines(dam: &ReservoirDetail) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", dam.display_name(), dam.id()),
        format!(
            "Описание: {}",
            dam.description.clone().unwrap_or_else(|| "Няма описание".to_string())
        ),
        format!("Община: {}", or_no_data(dam.municipality.clone())),
        format!("Собственик: {}", or_no_data(dam.owner.clone())),
        format!("Оператор: {}", or_no_data(dam.operator.clone())),
    ];

    match dam.latest_measurement() {
        Some(m) => {
            lines.push(format!("Дата: {}", format_timestamp_bg(&m.timestamp)));
            lines.push(format!("Обем м³: {}", or_no_data(m.fill_volume.map(format_volume))));
            lines.push(format!(
                "Входящ поток m³/s: {}",
                or_no_data(m.avg_incoming_flow.map(format_flow))
            ));
            lines.push(format!(
                "Изходящ поток m³/s: {}",
                or_no_data(m.avg_outgoing_flow.map(format_flow))
            ));
        }
        None => lines.push(format!("Измервания: {}", NO_DATA)),
    }

    let tendency = |source| {
        dam.tendency(source)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| NO_DATA.to_string())
    };
    lines.push(format!(
        "Тенденция (измервания): {}",
        tendency(TrendSource::Measurements)
    ));
    lines.push(format!("Тенденция (прогноза): {}", tendency(TrendSource::Forecast)));

    let dry_up = match dam.will_dry_up() {
        Some(true) => "да",
        Some(false) => "не",
        None => NO_DATA,
    };
    lines.push(format!("Ще пресъхне: {}", dry_up));
    if dam.show_call_to_action(CtaPolicy::default()) {
        lines.push("Подай сигнал: /complaint-form".to_string());
    }

    let history = dam.sorted_measurements();
    if !history.is_empty() {
        lines.push("История:".to_string());
        lines.extend(history.iter().map(|m| {
            format!(
                "  {}\t{}",
                format_timestamp_bg(&m.timestamp),
                or_no_data(m.fill_volume.map(format_volume))
            )
        }));
    }
    lines
}

/// `GET /dams?skip=&limit=`, one summary line per reservoir.
pub async fn run_list(client: &ApiClient, skip: u32, limit: u32) -> anyhow::Result<()> {
    info!("Listing reservoirs (skip {}, limit {})", skip, limit);
    let dams = client.list_dams(skip, limit).await?;
    for dam in &dams {
        println!("{}", summary_line(dam));
    }
    info!("{} reservoirs listed", dams.len());
    Ok(())
}

/// Detail plus forecast for one reservoir, from a single request.
pub async fn run_show(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let dam = client.get_dam_with_forecast(id).await?;
    for line in detail_lines(&dam) {
        println!("{}", line);
    }
    Ok(())
}

/// The raw forecast series, one point per line.
pub async fn run_forecast(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let series = client.fetch_forecast(id).await?;
    if series.is_empty() {
        warn!("No forecast for {}", id);
    }
    for point in &series {
        println!("{}", forecast_line(point));
    }
    Ok(())
}

pub fn forecast_line(point: &ForecastPoint) -> String {
    format!(
        "{}\t{}",
        format_timestamp_bg(&point.timestamp),
        or_no_data(point.volume.map(format_volume))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAM_JSON: &str = r#"{
        "id": "d1",
        "display_name": "Искър",
        "latitude": 42.5,
        "longitude": 23.25,
        "max_volume": 673000000,
        "municipality": "Самоков",
        "measurements": [
            {"timestamp": "2024-04-20T08:00:00Z", "fill_volume": 300000000, "avg_incoming_flow": 4.2, "avg_outgoing_flow": 3.1},
            {"timestamp": "2024-04-21T08:00:00Z", "fill_volume": 310000000, "avg_incoming_flow": 5.0, "avg_outgoing_flow": 3.0}
        ]
    }"#;

    #[test]
    fn test_summary_line() {
        let dam: ReservoirDetail = serde_json::from_str(DAM_JSON).unwrap();
        assert_eq!(
            summary_line(&dam),
            "d1\tИскър\t42.50000,23.25000\t673 000 000"
        );
    }

    #[test]
    fn test_detail_lines_use_latest_measurement() {
        let dam: ReservoirDetail = serde_json::from_str(DAM_JSON).unwrap();
        let lines = detail_lines(&dam);
        assert_eq!(lines[0], "Искър (d1)");
        assert!(lines.contains(&"Описание: Няма описание".to_string()));
        assert!(lines.contains(&"Община: Самоков".to_string()));
        assert!(lines.contains(&"Собственик: Няма данни".to_string()));
        assert!(lines.contains(&"Дата: 21.04.2024 г.".to_string()));
        assert!(lines.contains(&"Обем м³: 310 000 000".to_string()));
        assert!(lines.contains(&"Входящ поток m³/s: 5.00".to_string()));
        assert!(lines.contains(&"Тенденция (измервания): Повишава се".to_string()));
        assert!(lines.contains(&"Тенденция (прогноза): Няма данни".to_string()));
        assert!(lines.contains(&"Ще пресъхне: Няма данни".to_string()));
    }

    #[test]
    fn test_detail_lines_history_newest_first() {
        let dam: ReservoirDetail = serde_json::from_str(DAM_JSON).unwrap();
        let lines = detail_lines(&dam);
        let start = lines.iter().position(|l| l == "История:").unwrap();
        assert_eq!(lines[start + 1], "  21.04.2024 г.\t310 000 000");
        assert_eq!(lines[start + 2], "  20.04.2024 г.\t300 000 000");
        assert_eq!(lines.len(), start + 3);
    }

    #[test]
    fn test_forecast_line() {
        let point: ForecastPoint =
            serde_json::from_str(r#"{"date": "2025-03-01", "forecasted_available_useful_volume": 1500}"#)
                .unwrap();
        assert_eq!(forecast_line(&point), "01.03.2025 г.\t1 500");
        let empty: ForecastPoint = serde_json::from_str(r#"{"timestamp": "2025-04-01"}"#).unwrap();
        assert_eq!(forecast_line(&empty), "01.04.2025 г.\tНяма данни");
    }
}
