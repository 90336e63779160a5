//! GeoJSON overlays served per month by the tile server.
//!
//! GeoJSON positions are `[longitude, latitude]`; the map wants
//! `[latitude, longitude]`, so every position is swapped on conversion.

use crate::error::Result;
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

type Position = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

/// Line segments in display order, one per ring or line string.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Polyline {
    pub segments: Vec<Vec<LatLng>>,
}

impl Polyline {
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(Vec::is_empty)
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    fn push_ring(&mut self, ring: &[Position]) {
        let segment: Vec<LatLng> = ring.iter().filter_map(|p| LatLng::from_lng_lat(p)).collect();
        if !segment.is_empty() {
            self.segments.push(segment);
        }
    }
}

pub fn parse_feature_collection(body: &str) -> Result<FeatureCollection> {
    Ok(serde_json::from_str(body)?)
}

/// Flatten every line string and polygon ring into polyline segments.
/// Points and unknown geometries contribute nothing.
pub fn to_polyline(collection: &FeatureCollection) -> Polyline {
    let mut polyline = Polyline::default();
    for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
        match geometry {
            Geometry::LineString { coordinates } => polyline.push_ring(coordinates),
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                for ring in coordinates {
                    polyline.push_ring(ring);
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for ring in coordinates.iter().flatten() {
                    polyline.push_ring(ring);
                }
            }
            Geometry::Point { .. } | Geometry::Unsupported => {}
        }
    }
    polyline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_is_swapped_to_lat_lng() {
        let collection = parse_feature_collection(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[23.6, 42.4], [23.7, 42.5]]]}}
            ]}"#,
        )
        .unwrap();
        let polyline = to_polyline(&collection);
        assert_eq!(
            polyline.segments,
            vec![vec![LatLng::new(42.4, 23.6), LatLng::new(42.5, 23.7)]]
        );
        assert_eq!(
            serde_json::to_string(&polyline.segments[0]).unwrap(),
            "[[42.4,23.6],[42.5,23.7]]"
        );
    }

    #[test]
    fn test_mixed_geometries_flatten() {
        let collection = parse_feature_collection(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[23.0, 42.0], [23.1, 42.1], [23.2, 42.2]]}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [23.0, 42.0]}},
                {"type": "Feature", "geometry": {"type": "GeometryCollection", "geometries": []}},
                {"type": "Feature", "geometry": null},
                {"type": "Feature", "geometry": {"type": "MultiPolygon", "coordinates": [[[[24.0, 43.0], [24.1, 43.1]]], [[[25.0, 44.0]]]]}}
            ]}"#,
        )
        .unwrap();
        let polyline = to_polyline(&collection);
        assert_eq!(polyline.segments.len(), 3);
        assert_eq!(polyline.point_count(), 6);
        assert_eq!(polyline.segments[2], vec![LatLng::new(44.0, 25.0)]);
    }

    #[test]
    fn test_empty_collection_draws_nothing() {
        let collection = parse_feature_collection(r#"{"type": "FeatureCollection", "features": []}"#)
            .unwrap();
        assert!(to_polyline(&collection).is_empty());
        assert!(parse_feature_collection("not json").is_err());
    }
}
