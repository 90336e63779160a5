//! Addresses chosen through the places autocomplete widget.

use crate::error::{BwrError, Result};
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub street_number: String,
    pub city: String,
    pub position: LatLng,
}

impl Address {
    /// "street number, city", skipping empty parts.
    pub fn label(&self) -> String {
        let street = [self.street.as_str(), self.street_number.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        [street.as_str(), self.city.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Build an address from an autocomplete place result.
    pub fn from_place(place: &PlaceResult) -> Result<Self> {
        let components = place
            .address_components
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(BwrError::PlaceIncomplete)?;
        let location = place
            .geometry
            .as_ref()
            .and_then(|g| g.location)
            .ok_or(BwrError::PlaceIncomplete)?;

        let component = |kind: &str| {
            components
                .iter()
                .find(|c| c.types.iter().any(|t| t == kind))
                .map(|c| c.long_name.clone())
                .unwrap_or_default()
        };
        let mut city = component("locality");
        if city.is_empty() {
            city = component("administrative_area_level_1");
        }

        Ok(Self {
            street: component("route"),
            street_number: component("street_number"),
            city,
            position: LatLng::new(location.lat, location.lng),
        })
    }
}

/// The subset of a places autocomplete result the bridge forwards as JSON.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub address_components: Option<Vec<AddressComponent>>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceGeometry {
    #[serde(default)]
    pub location: Option<PlaceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}
