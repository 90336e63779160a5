use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One bulletin reading for a reservoir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub id: String,
    #[serde(deserialize_with = "wire::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Fill volume in cubic metres
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub fill_volume: Option<f64>,
    /// Average inflow in m³/s
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub avg_incoming_flow: Option<f64>,
    /// Average outflow in m³/s
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub avg_outgoing_flow: Option<f64>,
}

impl Measurement {
    /// Newest first, the order used for display and trend computation.
    pub fn cmp_newest_first(a: &Measurement, b: &Measurement) -> Ordering {
        b.timestamp.cmp(&a.timestamp)
    }
}

/// Copy of `measurements` ordered by timestamp descending.
pub fn sorted_newest_first(measurements: &[Measurement]) -> Vec<Measurement> {
    let mut sorted = measurements.to_vec();
    sorted.sort_by(Measurement::cmp_newest_first);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEASUREMENTS_JSON: &str = r#"[
        {"id": "b1", "timestamp": "2024-04-20T08:00:00Z", "fill_volume": "305564000", "avg_incoming_flow": 18.3, "avg_outgoing_flow": 15.7},
        {"id": "b2", "timestamp": "2024-07-15T08:00:00Z", "fill_volume": 218260000, "avg_incoming_flow": "4.2", "avg_outgoing_flow": null}
    ]"#;

    #[test]
    fn test_decode_and_sort() {
        let measurements: Vec<Measurement> = serde_json::from_str(MEASUREMENTS_JSON).unwrap();
        assert_eq!(measurements[0].fill_volume, Some(305564000.0));
        assert_eq!(measurements[1].avg_incoming_flow, Some(4.2));
        assert_eq!(measurements[1].avg_outgoing_flow, None);

        let sorted = sorted_newest_first(&measurements);
        assert_eq!(sorted[0].id, "b2");
        assert_eq!(sorted[1].id, "b1");
    }
}
