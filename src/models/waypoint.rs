use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use uuid::Uuid;

use crate::geo::Coordinate;

/// A numeric field as typed by a user: a JSON number, free text, or anything
/// else that cannot be read as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    /// Raw JSON of a value with an unusable type or magnitude, e.g. `true`,
    /// `{}` or `1e400`.
    Other(String),
}

impl NumericInput {
    fn from_raw_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Number(number)) => match number.as_f64() {
                Some(value) => NumericInput::Number(value),
                None => NumericInput::Other(raw.to_string()),
            },
            Ok(Value::String(text)) => NumericInput::Text(text),
            _ => NumericInput::Other(raw.to_string()),
        }
    }
}

// Never fails on a well-formed JSON value; only its own field is affected.
impl<'de> Deserialize<'de> for NumericInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(NumericInput::from_raw_json(raw.get()))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Raw waypoint input. Any field may be missing, blank or mistyped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WaypointCandidate {
    #[serde(default)]
    pub latitude: Option<NumericInput>,
    #[serde(default)]
    pub longitude: Option<NumericInput>,
    #[serde(default)]
    pub order: Option<NumericInput>,
}

impl WaypointCandidate {
    pub fn new(
        latitude: impl Into<NumericInput>,
        longitude: impl Into<NumericInput>,
        order: i64,
    ) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            order: Some(order.into()),
        }
    }
}

/// A waypoint that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    pub order: i64,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64, order: i64) -> Self {
        Self {
            latitude,
            longitude,
            order,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A persisted waypoint, owned by exactly one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWaypoint {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub order: i64,
}

impl From<Waypoint> for StoredWaypoint {
    fn from(waypoint: Waypoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            latitude: waypoint.latitude,
            longitude: waypoint.longitude,
            order: waypoint.order,
        }
    }
}

impl From<&StoredWaypoint> for Waypoint {
    fn from(stored: &StoredWaypoint) -> Self {
        Waypoint::new(stored.latitude, stored.longitude, stored.order)
    }
}
