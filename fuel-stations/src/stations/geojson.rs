//! GeoJSON output types.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::record::PRICE_FIELDS;

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// A single station as a GeoJSON `Feature`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Point,
    pub properties: Properties,
}

/// A GeoJSON `Point`. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Point {
    pub coordinates: [f64; 2],
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: [longitude, latitude],
        }
    }
}

/// Station attributes shown on the map.
///
/// Serialized as `Rotulo`, `Direccion`, then one key per fuel in
/// [`PRICE_FIELDS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    pub label: String,
    pub address: String,
    pub prices: Prices,
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + PRICE_FIELDS.len()))?;
        map.serialize_entry("Rotulo", &self.label)?;
        map.serialize_entry("Direccion", &self.address)?;
        for (key, price) in self.prices.iter() {
            map.serialize_entry(key, &price)?;
        }
        map.end()
    }
}

/// Prices in euros per litre, indexed like [`PRICE_FIELDS`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Prices(pub [Option<f64>; PRICE_FIELDS.len()]);

impl Prices {
    /// `(output key, price)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        PRICE_FIELDS.iter().map(|(_, key)| *key).zip(self.0.iter().copied())
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }
}
