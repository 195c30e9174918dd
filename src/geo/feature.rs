//! Provider result records.
//!
//! Features are kept as opaque JSON so whatever the provider returns reaches
//! the API caller unchanged. Only the collection wrapper is typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single geocoded result, passed through as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(Value);

impl Feature {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Full result hierarchy, e.g. "Chicago, Illinois, United States".
    pub fn place_name(&self) -> Option<&str> {
        self.0.get("place_name").and_then(Value::as_str)
    }

    /// Match quality on a 0..=1 scale.
    pub fn relevance(&self) -> Option<f64> {
        self.0.get("relevance").and_then(Value::as_f64)
    }

    /// Center point as `(lng, lat)`, in the provider's order.
    pub fn center(&self) -> Option<(f64, f64)> {
        let center = self.0.get("center")?.as_array()?;
        match center.as_slice() {
            [lng, lat] => Some((lng.as_f64()?, lat.as_f64()?)),
            _ => None,
        }
    }
}

impl From<Value> for Feature {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Provider response body. `features` is required.
#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    pub features: Vec<Feature>,
}
