//! Feed document → GeoJSON conversion.

use serde_json::Value;
use tracing::info;

use super::geojson::{Feature, FeatureCollection, Point, Prices, Properties};
use super::record::{PRICE_FIELDS, STATION_LIST_KEY, StationRecord};

/// Result of converting one feed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub collection: FeatureCollection,
    pub stats: TransformStats,
}

/// What happened to the records of one feed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Records seen in the station list
    pub processed: usize,
    /// Records turned into features
    pub emitted: usize,
    /// Dropped: latitude or longitude missing or unparseable
    pub invalid_coordinates: usize,
    /// Dropped: valid position but no usable price
    pub no_prices: usize,
}

/// Why a record did not become a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    InvalidCoordinates,
    NoPrices,
}

/// Convert a raw feed document into a feature collection.
///
/// A missing or non-list station key yields an empty collection. Features
/// keep the order of the station list.
pub fn transform(document: &Value) -> Transformed {
    let stations = document
        .get(STATION_LIST_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    info!(stations = stations.len(), "processing stations");

    let mut stats = TransformStats::default();
    let mut features = Vec::with_capacity(stations.len());

    for raw in stations {
        stats.processed += 1;
        match clean_station(&StationRecord::new(raw)) {
            Ok(feature) => {
                stats.emitted += 1;
                features.push(feature);
            }
            Err(Rejection::InvalidCoordinates) => stats.invalid_coordinates += 1,
            Err(Rejection::NoPrices) => stats.no_prices += 1,
        }
    }

    info!(
        processed = stats.processed,
        emitted = stats.emitted,
        invalid_coordinates = stats.invalid_coordinates,
        no_prices = stats.no_prices,
        "stations processed"
    );

    Transformed {
        collection: FeatureCollection { features },
        stats,
    }
}

fn clean_station(record: &StationRecord<'_>) -> Result<Feature, Rejection> {
    let (Some(latitude), Some(longitude)) = (record.latitude(), record.longitude()) else {
        return Err(Rejection::InvalidCoordinates);
    };

    let mut prices = Prices::default();
    for (slot, (feed_key, _)) in prices.0.iter_mut().zip(PRICE_FIELDS.iter()) {
        *slot = record.price(feed_key);
    }

    if !prices.any() {
        return Err(Rejection::NoPrices);
    }

    Ok(Feature {
        geometry: Point::new(latitude, longitude),
        properties: Properties {
            label: record.label().to_string(),
            address: record.address().to_string(),
            prices,
        },
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::stations::parse_decimal_comma;
    use proptest::prelude::*;
    use serde_json::json;

    /// Comma-decimal string with up to six fractional digits.
    fn comma_decimal(range: std::ops::Range<i32>) -> impl Strategy<Value = String> {
        (range, 0u32..1_000_000).prop_map(|(int, frac)| format!("{},{:06}", int, frac))
    }

    fn parse_dotted(s: &str) -> f64 {
        s.replace(',', ".").parse().unwrap()
    }

    /// Raw price: valid, empty or garbage.
    fn raw_price() -> impl Strategy<Value = String> {
        prop_oneof![
            comma_decimal(0..3),
            Just(String::new()),
            Just("  ".to_string()),
            "[A-Z/]{1,4}",
        ]
    }

    proptest! {
        /// Emitted coordinates are [longitude, latitude]
        #[test]
        fn coordinates_reversed(
            lat in comma_decimal(-89..90),
            lon in comma_decimal(-179..180),
            price in comma_decimal(0..3),
        ) {
            let doc = json!({"ListaEESSPrecio": [{
                "Latitud": lat.clone(),
                "Longitud (WGS84)": lon.clone(),
                "Precio Gasoleo A": price,
            }]});

            let out = transform(&doc);

            prop_assert_eq!(out.collection.features.len(), 1);
            prop_assert_eq!(
                out.collection.features[0].geometry.coordinates,
                [parse_dotted(&lon), parse_dotted(&lat)]
            );
        }

        /// Emitted iff coordinates parse and at least one price parses
        #[test]
        fn emission_rule(
            lat in prop_oneof![comma_decimal(-89..90), Just(String::new()), "[a-z]{1,5}"],
            lon in prop_oneof![comma_decimal(-179..180), Just(String::new()), "[a-z]{1,5}"],
            prices in proptest::collection::vec(raw_price(), PRICE_FIELDS.len()),
        ) {
            let mut station = serde_json::Map::new();
            station.insert("Latitud".into(), json!(lat));
            station.insert("Longitud (WGS84)".into(), json!(lon));
            for ((feed_key, _), price) in PRICE_FIELDS.iter().zip(&prices) {
                station.insert(feed_key.to_string(), json!(price));
            }
            let doc = json!({"ListaEESSPrecio": [station]});

            let coords_ok = parse_decimal_comma(&lat).is_some()
                && parse_decimal_comma(&lon).is_some();
            let any_price = prices.iter().any(|p| parse_decimal_comma(p).is_some());

            let out = transform(&doc);

            prop_assert_eq!(out.stats.processed, 1);
            prop_assert_eq!(out.collection.features.len() == 1, coords_ok && any_price);
            prop_assert_eq!(out.stats.invalid_coordinates == 1, !coords_ok);
            prop_assert_eq!(out.stats.no_prices == 1, coords_ok && !any_price);
        }
    }
}
