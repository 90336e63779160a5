//! The route water takes from a reservoir to a consumer's address.

use crate::geo::LatLng;
use crate::wire;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DamData {
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub max_volume: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlaceData {
    #[serde(default)]
    pub population: Option<u64>,
    /// m³ per person
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub consumption_per_capita: Option<f64>,
    /// лв. per m³
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub water_price: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub non_dam_incoming_flow: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub radius: Option<f64>,
    #[serde(default)]
    pub municipality: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Reservoir,
    Settlement,
    Junction,
}

impl NodeKind {
    fn from_wire(node_type: &str) -> Self {
        match node_type {
            "dam" => NodeKind::Reservoir,
            "place" => NodeKind::Settlement,
            _ => NodeKind::Junction,
        }
    }
}

/// Data specific to the kind of node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    Reservoir(DamData),
    Settlement(PlaceData),
    None,
}

#[derive(Deserialize)]
struct RawPathNode {
    id: String,
    node_type: String,
    display_name: String,
    #[serde(deserialize_with = "wire::number")]
    latitude: f64,
    #[serde(deserialize_with = "wire::number")]
    longitude: f64,
    #[serde(default, deserialize_with = "wire::optional_number")]
    distance_from_start: Option<f64>,
    #[serde(default)]
    dam_data: Option<DamData>,
    #[serde(default)]
    place_data: Option<PlaceData>,
}

/// One stop on the route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPathNode")]
pub struct PathNode {
    pub id: String,
    pub kind: NodeKind,
    pub display_name: String,
    pub position: LatLng,
    /// Metres from the first node
    pub distance_from_start: f64,
    pub payload: NodePayload,
}

impl From<RawPathNode> for PathNode {
    fn from(raw: RawPathNode) -> Self {
        let kind = NodeKind::from_wire(&raw.node_type);
        let payload = match (kind, raw.dam_data, raw.place_data) {
            (NodeKind::Reservoir, Some(dam), _) => NodePayload::Reservoir(dam),
            (NodeKind::Settlement, _, Some(place)) => NodePayload::Settlement(place),
            _ => NodePayload::None,
        };
        Self {
            id: raw.id,
            kind,
            display_name: raw.display_name,
            position: LatLng::new(raw.latitude, raw.longitude),
            distance_from_start: raw.distance_from_start.unwrap_or_default(),
            payload,
        }
    }
}

/// Ordered chain of nodes plus the total distance in metres.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RoutePath {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub path: Vec<PathNode>,
    #[serde(default, deserialize_with = "wire::optional_number")]
    pub total_distance: Option<f64>,
}

impl RoutePath {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Node positions in route order.
    pub fn polyline(&self) -> Vec<LatLng> {
        self.path.iter().map(|node| node.position).collect()
    }

    /// Total distance in km; falls back to the last node's distance.
    pub fn total_distance_km(&self) -> f64 {
        let metres = self
            .total_distance
            .or_else(|| self.path.last().map(|n| n.distance_from_start))
            .unwrap_or_default();
        metres / 1000.0
    }

    /// The reservoir the water starts from.
    pub fn source(&self) -> Option<&PathNode> {
        self.path.iter().find(|n| n.kind == NodeKind::Reservoir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE_JSON: &str = r#"{
        "path": [
            {
                "id": "d1", "node_type": "dam", "display_name": "Язовир Искър",
                "latitude": "42.43967", "longitude": "23.63365", "distance_from_start": "0",
                "dam_data": {"max_volume": "673000000", "description": "Питейна вода", "municipality": "Самоков", "owner": "НЕК", "operator": "Софийска вода"}
            },
            {
                "id": "j1", "node_type": "junction", "display_name": "Разклон",
                "latitude": 42.6, "longitude": 23.4, "distance_from_start": "15250.5"
            },
            {
                "id": "p1", "node_type": "place", "display_name": "София",
                "latitude": "42.6977", "longitude": "23.3219", "distance_from_start": "31000.25",
                "place_data": {"population": 1236000, "consumption_per_capita": "52.1", "water_price": "2.90", "non_dam_incoming_flow": "0", "radius": "12000", "municipality": "Столична"}
            }
        ],
        "total_distance": 31000.25
    }"#;

    #[test]
    fn test_decode_route() {
        let route: RoutePath = serde_json::from_str(ROUTE_JSON).unwrap();
        assert_eq!(route.path.len(), 3);
        assert_eq!(route.path[0].kind, NodeKind::Reservoir);
        assert_eq!(route.path[1].kind, NodeKind::Junction);
        assert_eq!(route.path[1].payload, NodePayload::None);
        match &route.path[2].payload {
            NodePayload::Settlement(place) => {
                assert_eq!(place.population, Some(1236000));
                assert_eq!(place.water_price, Some(2.9));
            }
            other => panic!("expected settlement payload, got {:?}", other),
        }
        assert_eq!(route.source().map(|n| n.id.as_str()), Some("d1"));
        assert_eq!(route.polyline()[2], LatLng::new(42.6977, 23.3219));
        assert!((route.total_distance_km() - 31.00025).abs() < 1e-9);
    }

    #[test]
    fn test_missing_payload_for_kind() {
        let node: PathNode = serde_json::from_str(
            r#"{"id": "p2", "node_type": "place", "display_name": "Самоков",
                "latitude": 42.33, "longitude": 23.55, "place_data": null}"#,
        )
        .unwrap();
        assert_eq!(node.kind, NodeKind::Settlement);
        assert_eq!(node.payload, NodePayload::None);
        assert_eq!(node.distance_from_start, 0.0);
    }

    #[test]
    fn test_empty_route() {
        let route = RoutePath::default();
        assert!(route.is_empty());
        assert!(route.polyline().is_empty());
        assert_eq!(route.total_distance_km(), 0.0);
    }
}
