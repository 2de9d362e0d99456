//! Station records and their conversion to GeoJSON.
//!
//! The feed uses Spanish field names and decimal commas ("40,416775").
//! Records without usable coordinates or without a single usable price
//! are dropped; everything else becomes a GeoJSON point feature.

mod geojson;
mod record;
mod transform;

pub use geojson::{Feature, FeatureCollection, Point, Prices, Properties};
pub use record::{PRICE_FIELDS, STATION_LIST_KEY, StationRecord, parse_decimal_comma};
pub use transform::{TransformStats, Transformed, transform};
