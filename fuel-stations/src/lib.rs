//! Spanish fuel station prices as GeoJSON.
//!
//! Downloads the Ministry's daily price feed, cleans coordinates and
//! prices, and writes a `FeatureCollection` for map front-ends.

pub mod output;
pub mod pipeline;
pub mod source;
pub mod stations;
