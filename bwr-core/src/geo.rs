use serde::{Deserialize, Serialize};

/// Zoom level used when flying to a reservoir or an address.
pub const FLY_TO_ZOOM: u8 = 13;

/// Initial map centre.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 43.0436,
    lng: 26.7511,
};

/// A display coordinate. Serialized as `[lat, lng]`, the order Leaflet expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a GeoJSON position, which is `[longitude, latitude]`.
    pub fn from_lng_lat(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self::new(*lat, *lng)),
            _ => None,
        }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(point: LatLng) -> Self {
        [point.lat, point.lng]
    }
}

/// Where the map should be centred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub fn fly_to(center: LatLng) -> Self {
        Self {
            center,
            zoom: FLY_TO_ZOOM,
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::fly_to(DEFAULT_CENTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latlng_serializes_as_pair() {
        let point = LatLng::new(42.4, 23.6);
        assert_eq!(serde_json::to_string(&point).unwrap(), "[42.4,23.6]");
        let back: LatLng = serde_json::from_str("[42.4,23.6]").unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn test_from_lng_lat_swaps() {
        assert_eq!(
            LatLng::from_lng_lat(&[23.6, 42.4]),
            Some(LatLng::new(42.4, 23.6))
        );
        assert_eq!(
            LatLng::from_lng_lat(&[23.6, 42.4, 550.0]),
            Some(LatLng::new(42.4, 23.6))
        );
        assert_eq!(LatLng::from_lng_lat(&[23.6]), None);
    }
}
