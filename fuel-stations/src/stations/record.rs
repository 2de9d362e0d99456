//! Raw station records as delivered by the feed.

use serde_json::{Map, Value};

/// Top-level key holding the list of stations.
pub const STATION_LIST_KEY: &str = "ListaEESSPrecio";

const LATITUDE_KEY: &str = "Latitud";
const LONGITUDE_KEY: &str = "Longitud (WGS84)";
const LABEL_KEY: &str = "Rótulo";
const ADDRESS_KEY: &str = "Dirección";

/// Label used when a station has no signage.
pub const UNLABELLED: &str = "S/N";

/// Price fields as `(feed key, output key)`, in output order.
pub const PRICE_FIELDS: [(&str, &str); 7] = [
    ("Precio Gasolina 95 E5", "Precio_95E5"),
    ("Precio Gasolina 98 E5", "Precio_98E5"),
    ("Precio Gasoleo A", "Precio_GasoilA"),
    ("Precio Gasoleo B", "Precio_GasoilB"),
    ("Precio Gasoleo Premium", "Precio_GasoilPremium"),
    ("Precio Gasolina 95 E10", "Precio_95E10"),
    ("Precio Gasolina 98 E10", "Precio_98E10"),
];

/// Read-only view over one element of the station list.
///
/// A field counts as present only when it holds a JSON string. Elements
/// that are not objects behave as records with no fields at all.
#[derive(Debug, Clone, Copy)]
pub struct StationRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> StationRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    /// Raw string value of a field, if present.
    ///
    /// `null` counts as absent, so a null `Rótulo` is labelled `"S/N"`.
    pub fn field(&self, key: &str) -> Option<&'a str> {
        self.fields?.get(key)?.as_str()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.field(LATITUDE_KEY).and_then(parse_decimal_comma)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.field(LONGITUDE_KEY).and_then(parse_decimal_comma)
    }

    /// Signage, or [`UNLABELLED`] when absent.
    pub fn label(&self) -> &'a str {
        self.field(LABEL_KEY).unwrap_or(UNLABELLED)
    }

    /// Street address, or empty when absent.
    pub fn address(&self) -> &'a str {
        self.field(ADDRESS_KEY).unwrap_or("")
    }

    /// Parsed price for a feed price key.
    pub fn price(&self, feed_key: &str) -> Option<f64> {
        self.field(feed_key).and_then(parse_decimal_comma)
    }
}

/// Parse a decimal-comma number such as `"1,639"` or `"-3,703790"`.
///
/// Returns `None` for empty or whitespace-only input, for anything that
/// does not parse, and for non-finite values (JSON has no NaN).
pub fn parse_decimal_comma(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}
