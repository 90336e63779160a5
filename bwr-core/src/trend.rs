//! Tendency derivation for the reservoir detail panel.
//!
//! Two independent rules exist and the caller picks one explicitly through
//! [`TrendSource`]:
//! - latest vs. previous measured fill volume
//! - first vs. last forecasted volume

use crate::forecast::ForecastPoint;
use crate::measurement::{sorted_newest_first, Measurement};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Share of the maximum volume below which a reservoir is expected to dry up.
pub const DRY_UP_FRACTION: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tendency {
    #[serde(rename = "Повишава се", alias = "UP")]
    Up,
    #[serde(rename = "Без промяна", alias = "NO_CHANGE")]
    NoChange,
    #[serde(rename = "Понижава се", alias = "DOWN")]
    Down,
}

impl Tendency {
    pub fn label(&self) -> &'static str {
        match self {
            Tendency::Up => "Повишава се",
            Tendency::NoChange => "Без промяна",
            Tendency::Down => "Понижава се",
        }
    }

    fn from_change(latest: f64, previous: f64) -> Self {
        match latest.partial_cmp(&previous) {
            Some(Ordering::Greater) => Tendency::Up,
            Some(Ordering::Less) => Tendency::Down,
            _ => Tendency::NoChange,
        }
    }
}

/// Which rule the detail panel uses for its tendency row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendSource {
    #[default]
    Measurements,
    Forecast,
}

/// When the call-to-action link to the complaint form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CtaPolicy {
    #[default]
    WhenDryUp,
    WhenNotDryUp,
}

impl CtaPolicy {
    /// `None` (dry-up unknown) never shows the link.
    pub fn show(&self, will_dry_up: Option<bool>) -> bool {
        match (self, will_dry_up) {
            (CtaPolicy::WhenDryUp, Some(flag)) => flag,
            (CtaPolicy::WhenNotDryUp, Some(flag)) => !flag,
            (_, None) => false,
        }
    }
}

/// Compare the two most recent measurements by fill volume.
///
/// `None` with fewer than two measurements. A missing volume on either side
/// counts as no change.
pub fn tendency_from_measurements(measurements: &[Measurement]) -> Option<Tendency> {
    if measurements.len() < 2 {
        return None;
    }
    let sorted = sorted_newest_first(measurements);
    match (sorted[0].fill_volume, sorted[1].fill_volume) {
        (Some(latest), Some(previous)) => Some(Tendency::from_change(latest, previous)),
        _ => Some(Tendency::NoChange),
    }
}

/// Compare the first and last forecasted volumes, in series order.
pub fn tendency_from_forecast(series: &[ForecastPoint]) -> Option<Tendency> {
    let mut values = series.iter().filter_map(|p| p.volume);
    let first = values.next()?;
    let last = values.last()?;
    Some(Tendency::from_change(last, first))
}

/// True if any forecasted volume falls below [`DRY_UP_FRACTION`] of `max_volume`.
pub fn will_dry_up(series: &[ForecastPoint], max_volume: f64) -> Option<bool> {
    if max_volume <= 0.0 {
        return None;
    }
    let threshold = max_volume * DRY_UP_FRACTION;
    let mut values = series.iter().filter_map(|p| p.volume).peekable();
    values.peek()?;
    Some(values.any(|v| v < threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn measurement(y: i32, m: u32, d: u32, volume: Option<f64>) -> Measurement {
        Measurement {
            id: format!("{}-{}-{}", y, m, d),
            timestamp: Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap(),
            fill_volume: volume,
            avg_incoming_flow: None,
            avg_outgoing_flow: None,
        }
    }

    fn point(week: u32, volume: Option<f64>) -> ForecastPoint {
        ForecastPoint {
            timestamp: Utc.with_ymd_and_hms(2025, 1, week, 0, 0, 0).unwrap(),
            volume,
        }
    }

    #[test]
    fn test_latest_below_previous_is_down() {
        let measurements = vec![
            measurement(2024, 7, 15, Some(218260000.0)),
            measurement(2024, 4, 20, Some(305564000.0)),
        ];
        assert_eq!(tendency_from_measurements(&measurements), Some(Tendency::Down));
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let measurements = vec![
            measurement(2024, 4, 20, Some(305564000.0)),
            measurement(2024, 7, 15, Some(218260000.0)),
            measurement(2023, 1, 1, Some(1.0)),
        ];
        assert_eq!(tendency_from_measurements(&measurements), Some(Tendency::Down));
    }

    #[test]
    fn test_rising_and_unchanged() {
        let rising = vec![
            measurement(2024, 7, 15, Some(300.0)),
            measurement(2024, 4, 20, Some(200.0)),
        ];
        assert_eq!(tendency_from_measurements(&rising), Some(Tendency::Up));

        let flat = vec![
            measurement(2024, 7, 15, Some(200.0)),
            measurement(2024, 4, 20, Some(200.0)),
        ];
        assert_eq!(tendency_from_measurements(&flat), Some(Tendency::NoChange));

        let missing = vec![
            measurement(2024, 7, 15, None),
            measurement(2024, 4, 20, Some(200.0)),
        ];
        assert_eq!(tendency_from_measurements(&missing), Some(Tendency::NoChange));
    }

    #[test]
    fn test_fewer_than_two_is_undefined() {
        assert_eq!(tendency_from_measurements(&[]), None);
        assert_eq!(
            tendency_from_measurements(&[measurement(2024, 7, 15, Some(1.0))]),
            None
        );
    }

    #[test]
    fn test_forecast_first_vs_last() {
        let series = vec![
            point(1, Some(100.0)),
            point(8, None),
            point(15, Some(80.0)),
            point(22, Some(120.0)),
        ];
        assert_eq!(tendency_from_forecast(&series), Some(Tendency::Up));
        assert_eq!(tendency_from_forecast(&series[..1]), None);
        assert_eq!(tendency_from_forecast(&[point(1, None), point(8, None)]), None);
    }

    #[test]
    fn test_will_dry_up_threshold() {
        let series = vec![point(1, Some(500.0)), point(8, Some(399.0))];
        assert_eq!(will_dry_up(&series, 1000.0), Some(true));

        let series = vec![point(1, Some(500.0)), point(8, Some(400.0))];
        assert_eq!(will_dry_up(&series, 1000.0), Some(false));

        assert_eq!(will_dry_up(&[], 1000.0), None);
        assert_eq!(will_dry_up(&series, 0.0), None);
    }

    #[test]
    fn test_cta_policy_polarity() {
        assert!(CtaPolicy::WhenDryUp.show(Some(true)));
        assert!(!CtaPolicy::WhenDryUp.show(Some(false)));
        assert!(CtaPolicy::WhenNotDryUp.show(Some(false)));
        assert!(!CtaPolicy::WhenNotDryUp.show(None));
    }

    #[test]
    fn test_tendency_wire_labels() {
        let up: Tendency = serde_json::from_str(r#""UP""#).unwrap();
        assert_eq!(up, Tendency::Up);
        let down: Tendency = serde_json::from_str(r#""Понижава се""#).unwrap();
        assert_eq!(down, Tendency::Down);
        assert_eq!(
            serde_json::to_string(&Tendency::NoChange).unwrap(),
            r#""Без промяна""#
        );
    }
}
