//! Airport rows as read from the source table and as held in the base set.

use crate::region::Region;
use serde::{Deserialize, Serialize, Serializer};

/// A single row deserialized from the source CSV.
///
/// Only the columns the pipeline reads are named; any others are ignored.
/// Missing required columns make the whole file malformed.
#[derive(Debug, Deserialize)]
pub struct RawAirportRow {
    pub(crate) name: Option<String>,
    pub(crate) municipality: Option<String>,
    #[serde(rename = "type")]
    pub(crate) kind: Option<String>,
    pub(crate) iso_region: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub(crate) latitude_deg: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub(crate) longitude_deg: Option<f64>,
    pub(crate) elevation_ft: Option<String>,
    pub(crate) scheduled_service: Option<String>,
}

/// Elevation in feet, before or after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Elevation {
    Missing,
    /// Source text that has not been converted (yet, or because conversion failed).
    Raw(String),
    Feet(f64),
}

impl Elevation {
    /// Numeric elevation, if any.
    ///
    /// Raw text that parses is still usable; text that doesn't counts as absent.
    /// Non-finite values are never usable.
    pub fn feet(&self) -> Option<f64> {
        match self {
            Elevation::Feet(v) => Some(*v),
            Elevation::Raw(s) => s.trim().parse::<f64>().ok(),
            Elevation::Missing => None,
        }
        .filter(|v| v.is_finite())
    }

    pub fn is_coerced(&self) -> bool {
        !matches!(self, Elevation::Raw(_))
    }
}

impl From<Option<String>> for Elevation {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) if !s.trim().is_empty() => Elevation::Raw(s),
            _ => Elevation::Missing,
        }
    }
}

impl Serialize for Elevation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Elevation::Feet(v) => serializer.serialize_f64(*v),
            Elevation::Raw(s) => serializer.serialize_str(s),
            Elevation::Missing => serializer.serialize_none(),
        }
    }
}

/// One airport in the base set.
///
/// Coordinates and region are always present; rows lacking them never get here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportRecord {
    pub name: Option<String>,
    pub municipality: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub region: Region,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_ft: Elevation,
    pub scheduled_service: String,
}

impl AirportRecord {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn municipality(&self) -> &str {
        self.municipality.as_deref().unwrap_or("")
    }

    pub fn has_scheduled_service(&self) -> bool {
        self.scheduled_service == "yes"
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation_ft.feet()
    }
}
