use crate::forecast::{ForecastOutlook, ForecastPoint};
use crate::geo::LatLng;
use crate::measurement::{sorted_newest_first, Measurement};
use crate::trend::{self, CtaPolicy, Tendency, TrendSource};
use crate::wire;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Boundary geometry as it has been observed on the wire: either a bare ring
/// or an object wrapping the ring.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBorder {
    Ring(Vec<[f64; 2]>),
    Shape {
        coordinates: Vec<[f64; 2]>,
    },
    Other(serde_json::Value),
}

fn border_geometry<'de, D>(deserializer: D) -> Result<Option<Vec<LatLng>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ring = match Option::<RawBorder>::deserialize(deserializer)? {
        Some(RawBorder::Ring(ring)) | Some(RawBorder::Shape { coordinates: ring }) => ring,
        Some(RawBorder::Other(value)) => {
            warn!("Ignoring unsupported border geometry: {}", value);
            return Ok(None);
        }
        None => return Ok(None),
    };
    if ring.is_empty() {
        return Ok(None);
    }
    Ok(Some(ring.into_iter().map(LatLng::from).collect()))
}

fn default_node_type() -> String {
    "dam".to_string()
}

/// A reservoir as listed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirSummary {
    pub id: String,
    #[serde(alias = "displayName")]
    pub display_name: String,
    #[serde(deserialize_with = "wire::number")]
    pub latitude: f64,
    #[serde(deserialize_with = "wire::number")]
    pub longitude: f64,
    #[serde(default = "default_node_type")]
    pub node_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Boundary ring in display order (`[lat, lng]`), absent for some reservoirs
    #[serde(default, alias = "borderGeometry", deserialize_with = "border_geometry")]
    pub border_geometry: Option<Vec<LatLng>>,
    /// Maximum volume in cubic metres
    #[serde(default, alias = "maxVolume", deserialize_with = "wire::optional_number")]
    pub max_volume: Option<f64>,
}

impl ReservoirSummary {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl AsRef<ReservoirSummary> for ReservoirSummary {
    fn as_ref(&self) -> &ReservoirSummary {
        self
    }
}

/// Extended reservoir information for the detail panel.
///
/// `forecast` is never sent by the list endpoint; it is filled in after the
/// secondary per-reservoir fetch completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirDetail {
    #[serde(flatten)]
    pub summary: ReservoirSummary,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub owner_contact: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub operator_contact: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub places: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub measurements: Vec<Measurement>,
    /// Tendency as reported by the API, kept for reference only
    #[serde(default)]
    pub future_tendency: Option<Tendency>,
    /// Dry-up flag as reported by the API, kept for reference only
    #[serde(default)]
    pub will_it_dry_up: Option<bool>,
    #[serde(skip)]
    pub forecast: Option<ForecastOutlook>,
}

impl AsRef<ReservoirSummary> for ReservoirDetail {
    fn as_ref(&self) -> &ReservoirSummary {
        &self.summary
    }
}

impl From<ReservoirSummary> for ReservoirDetail {
    fn from(summary: ReservoirSummary) -> Self {
        Self {
            summary,
            description: None,
            municipality: None,
            owner: None,
            owner_contact: None,
            operator: None,
            operator_contact: None,
            places: BTreeMap::new(),
            measurements: Vec::new(),
            future_tendency: None,
            will_it_dry_up: None,
            forecast: None,
        }
    }
}

impl ReservoirDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn display_name(&self) -> &str {
        &self.summary.display_name
    }

    /// Measurements ordered by timestamp descending.
    pub fn sorted_measurements(&self) -> Vec<Measurement> {
        sorted_newest_first(&self.measurements)
    }

    pub fn latest_measurement(&self) -> Option<&Measurement> {
        self.measurements.iter().max_by_key(|m| m.timestamp)
    }

    /// Attach a forecast series, deriving its tendency and dry-up flag.
    pub fn with_forecast(mut self, series: Vec<ForecastPoint>) -> Self {
        self.forecast = Some(ForecastOutlook::from_series(series, self.summary.max_volume));
        self
    }

    /// Tendency according to the chosen rule; `None` when that rule has no data.
    pub fn tendency(&self, source: TrendSource) -> Option<Tendency> {
        match source {
            TrendSource::Measurements => trend::tendency_from_measurements(&self.measurements),
            TrendSource::Forecast => self.forecast.as_ref().and_then(|f| f.tendency),
        }
    }

    /// Dry-up flag derived from the fetched forecast.
    pub fn will_dry_up(&self) -> Option<bool> {
        self.forecast.as_ref().and_then(|f| f.will_dry_up)
    }

    pub fn show_call_to_action(&self, policy: CtaPolicy) -> bool {
        policy.show(self.will_dry_up())
    }
}

/// Look up a reservoir by id.
pub fn find_reservoir<'a, R: AsRef<ReservoirSummary>>(reservoirs: &'a [R], id: &str) -> Option<&'a R> {
    reservoirs.iter().find(|r| r.as_ref().id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAMS_JSON: &str = r#"[
        {
            "id": "1",
            "display_name": "Искър",
            "latitude": "42.43967",
            "longitude": 23.63365,
            "node_type": "dam",
            "created_at": "2021-08-09T12:00:00Z",
            "updated_at": null,
            "border_geometry": {"type": "Polygon", "coordinates": [[42.43967, 23.63365], [42.51703, 23.53495], [42.45196, 23.55984]]},
            "max_volume": "673000000",
            "description": "Най-големият язовир в България",
            "municipality": "Самоков",
            "owner": "НЕК",
            "places": null,
            "measurements": [
                {"id": "m1", "timestamp": "2024-04-20T08:00:00Z", "fill_volume": "305564000", "avg_incoming_flow": "18.3", "avg_outgoing_flow": "15.7"},
                {"id": "m2", "timestamp": "2024-07-15T08:00:00Z", "fill_volume": "218260000", "avg_incoming_flow": "4.2", "avg_outgoing_flow": "7.8"}
            ],
            "future_tendency": "DOWN",
            "will_it_dry_up": false
        },
        {
            "id": "2",
            "displayName": "Бистрица",
            "latitude": 42.52196,
            "longitude": 23.62249,
            "borderGeometry": [[42.52196, 23.62249], [42.53025, 23.59589]],
            "measurements": null
        },
        {
            "id": "3",
            "display_name": "Без граница",
            "latitude": 42.0,
            "longitude": 24.0,
            "border_geometry": null
        }
    ]"#;

    fn dams() -> Vec<ReservoirDetail> {
        serde_json::from_str(DAMS_JSON).unwrap()
    }

    #[test]
    fn test_decode_both_border_shapes() {
        let dams = dams();
        assert_eq!(dams.len(), 3);
        assert_eq!(dams[0].summary.latitude, 42.43967);
        assert_eq!(
            dams[0].summary.border_geometry.as_ref().map(Vec::len),
            Some(3)
        );
        assert_eq!(
            dams[1].summary.border_geometry.as_ref().map(|r| r[1]),
            Some(LatLng::new(42.53025, 23.59589))
        );
        assert_eq!(dams[2].summary.border_geometry, None);
        assert_eq!(dams[1].summary.node_type, "dam");
        assert!(dams[1].measurements.is_empty());
        assert_eq!(dams[0].summary.max_volume, Some(673000000.0));
    }

    #[test]
    fn test_unsupported_border_is_dropped() {
        let dam: ReservoirSummary = serde_json::from_str(
            r#"{"id": "9", "display_name": "X", "latitude": 1, "longitude": 2,
                "border_geometry": {"type": "MultiPolygon", "coordinates": [[[[1, 2]]]]}}"#,
        )
        .unwrap();
        assert_eq!(dam.border_geometry, None);
    }

    #[test]
    fn test_latest_measurement_and_trend() {
        let dam = dams().remove(0);
        assert_eq!(dam.latest_measurement().map(|m| m.id.as_str()), Some("m2"));
        assert_eq!(dam.sorted_measurements()[1].id, "m1");
        assert_eq!(dam.tendency(TrendSource::Measurements), Some(Tendency::Down));
        // No forecast fetched yet: the forecast rule has nothing to say.
        assert_eq!(dam.tendency(TrendSource::Forecast), None);
        assert_eq!(dam.future_tendency, Some(Tendency::Down));
    }

    #[test]
    fn test_forecast_attaches_without_overwriting_measurements() {
        let series: Vec<ForecastPoint> = serde_json::from_str(
            r#"[{"timestamp": "2025-01-05", "volume": 200000000},
                {"timestamp": "2025-03-30", "volume": 250000000}]"#,
        )
        .unwrap();
        let dam = dams().remove(0).with_forecast(series);
        assert_eq!(dam.tendency(TrendSource::Forecast), Some(Tendency::Up));
        assert_eq!(dam.tendency(TrendSource::Measurements), Some(Tendency::Down));
        // 200M < 0.4 * 673M
        assert_eq!(dam.will_dry_up(), Some(true));
        assert!(dam.show_call_to_action(CtaPolicy::WhenDryUp));
        assert!(!dam.show_call_to_action(CtaPolicy::WhenNotDryUp));
    }

    #[test]
    fn test_find_reservoir() {
        let dams = dams();
        assert_eq!(find_reservoir(&dams, "2").map(|d| d.display_name()), Some("Бистрица"));
        assert!(find_reservoir(&dams, "42").is_none());
    }
}
