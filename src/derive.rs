//! Derived fields and ordering for the filtered view.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::airport::AirportRecord;

/// Three-way elevation classification.
///
/// | Elevation (ft) | Category |
/// |----------------|----------|
/// | >= 2000        | High     |
/// | >= 1000        | Medium   |
/// | < 1000         | Low      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElevationCategory {
    High,
    Medium,
    Low,
}

impl ElevationCategory {
    pub const HIGH_FT: f64 = 2000.0;
    pub const MEDIUM_FT: f64 = 1000.0;

    pub fn from_feet(elevation_ft: f64) -> Self {
        match elevation_ft {
            e if e >= Self::HIGH_FT => ElevationCategory::High,
            e if e >= Self::MEDIUM_FT => ElevationCategory::Medium,
            _ => ElevationCategory::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElevationCategory::High => "High",
            ElevationCategory::Medium => "Medium",
            ElevationCategory::Low => "Low",
        }
    }
}

impl fmt::Display for ElevationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category for a record, or `None` when it has no usable elevation.
pub fn categorize(record: &AirportRecord) -> Option<ElevationCategory> {
    record.elevation().map(ElevationCategory::from_feet)
}

/// A filtered record paired with its derived category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedAirport<'a> {
    #[serde(flatten)]
    pub record: &'a AirportRecord,
    #[serde(skip)]
    pub elevation_ft: f64,
    #[serde(rename = "Elevation Category")]
    pub category: ElevationCategory,
}

/// Stable sort by elevation; records without elevation go last either way.
pub fn sort_by_elevation<'a>(mut view: Vec<&'a AirportRecord>, descending: bool) -> Vec<&'a AirportRecord> {
    view.sort_by(|a, b| match (a.elevation(), b.elevation()) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    view
}

/// Sorts descending by elevation and attaches categories.
pub fn derive_view<'a>(view: Vec<&'a AirportRecord>) -> Vec<CategorizedAirport<'a>> {
    sort_by_elevation(view, true)
        .into_iter()
        .filter_map(|record| {
            let elevation_ft = record.elevation()?;
            Some(CategorizedAirport {
                record,
                elevation_ft,
                category: ElevationCategory::from_feet(elevation_ft),
            })
        })
        .collect()
}
