//! Forecast series returned by the secondary per-reservoir fetch.

use crate::trend::{self, Tendency};
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single forecasted volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawForecastPoint")]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub volume: Option<f64>,
}

/// The volume key differs between the forecasting service and the data API.
#[derive(Deserialize)]
struct RawForecastPoint {
    #[serde(alias = "date", deserialize_with = "wire::timestamp")]
    timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    volume: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    forecasted_available_useful_volume: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    forecast: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    available_useful_volume: Option<f64>,
}

impl From<RawForecastPoint> for ForecastPoint {
    fn from(raw: RawForecastPoint) -> Self {
        Self {
            timestamp: raw.timestamp,
            volume: raw
                .volume
                .or(raw.forecasted_available_useful_volume)
                .or(raw.forecast)
                .or(raw.available_useful_volume),
        }
    }
}

/// Wire envelope of `GET /dams/{id}` when used for forecasts.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(not(feature = "api"), allow(dead_code))]
pub(crate) struct ForecastEnvelope {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub forecast: Vec<ForecastPoint>,
}

/// A forecast series with the values derived from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastOutlook {
    pub series: Vec<ForecastPoint>,
    pub tendency: Option<Tendency>,
    pub will_dry_up: Option<bool>,
}

impl ForecastOutlook {
    pub fn from_series(series: Vec<ForecastPoint>, max_volume: Option<f64>) -> Self {
        let tendency = trend::tendency_from_forecast(&series);
        let will_dry_up = max_volume.and_then(|max| trend::will_dry_up(&series, max));
        Self {
            series,
            tendency,
            will_dry_up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_missing_forecast() {
        let envelope: ForecastEnvelope =
            serde_json::from_str(r#"{"id": "d1", "display_name": "Искър"}"#).unwrap();
        assert!(envelope.forecast.is_empty());
        let envelope: ForecastEnvelope = serde_json::from_str(r#"{"forecast": null}"#).unwrap();
        assert!(envelope.forecast.is_empty());
    }

    #[test]
    fn test_outlook_from_series() {
        let series: Vec<ForecastPoint> = serde_json::from_str(
            r#"[
                {"date": "2025-03-02", "forecast": "500"},
                {"timestamp": "2025-03-09T00:00:00Z", "volume": 350}
            ]"#,
        )
        .unwrap();
        let outlook = ForecastOutlook::from_series(series, Some(1000.0));
        assert_eq!(outlook.tendency, Some(Tendency::Down));
        assert_eq!(outlook.will_dry_up, Some(true));

        let outlook = ForecastOutlook::from_series(outlook.series, None);
        assert_eq!(outlook.will_dry_up, None);
    }

    #[test]
    fn test_forecasting_service_records() {
        let series: Vec<ForecastPoint> = serde_json::from_str(
            r#"[
                {"timestamp": "2025-03-02T00:00:00", "forecasted_available_useful_volume": 500.0},
                {"timestamp": "2025-03-09T00:00:00", "forecasted_available_useful_volume": 350.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(series[0].volume, Some(500.0));
        assert_eq!(series[1].volume, Some(350.0));
        let outlook = ForecastOutlook::from_series(series, Some(1000.0));
        assert_eq!(outlook.tendency, Some(Tendency::Down));
        assert_eq!(outlook.will_dry_up, Some(true));
    }

    #[test]
    fn test_first_volume_key_wins() {
        let point: ForecastPoint = serde_json::from_str(
            r#"{"timestamp": "2025-03-02T00:00:00Z", "volume": 1.0, "forecast": 2.0}"#,
        )
        .unwrap();
        assert_eq!(point.volume, Some(1.0));

        let point: ForecastPoint = serde_json::from_str(
            r#"{"date": "2025-03-02", "volume": null, "forecast": "2"}"#,
        )
        .unwrap();
        assert_eq!(point.volume, Some(2.0));
    }
}
