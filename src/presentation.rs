//! Projections handed to the rendering side: map points, the table listing,
//! search hits, and headline scalars.

use serde::Serialize;

use crate::aggregate::{mean, round_to};
use crate::airport::{AirportRecord, Elevation};
use crate::derive::CategorizedAirport;
use crate::filter::distinct_types;

pub const MAP_ZOOM: u8 = 6;
pub const MAP_PITCH: u8 = 0;

/// One dot on the airport map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Airport Name")]
    pub airport_name: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Elevation (ft)")]
    pub elevation_ft: Elevation,
}

/// Initial camera for the map, centred on the points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub pitch: u8,
}

/// One row of the airport table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: Option<String>,
    pub municipality: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub elevation_ft: Elevation,
    pub scheduled_service: String,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub municipality: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A point on the elevation line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationPoint {
    pub name: String,
    pub elevation_ft: f64,
}

/// Headline numbers shown under the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub distinct_types: usize,
    /// Rounded to 4 decimals; `None` for an empty view.
    pub mean_latitude: Option<f64>,
}

pub fn map_points(view: &[CategorizedAirport<'_>]) -> Vec<MapPoint> {
    view.iter()
        .map(|c| MapPoint {
            lat: c.record.latitude_deg,
            lon: c.record.longitude_deg,
            airport_name: c.record.name.clone(),
            city: c.record.municipality.clone(),
            elevation_ft: c.record.elevation_ft.clone(),
        })
        .collect()
}

/// Centre of the points, or `None` when there is nothing to show.
pub fn map_view_state(points: &[MapPoint]) -> Option<MapViewState> {
    if points.is_empty() {
        return None;
    }
    let lats: Vec<f64> = points.iter().map(|p| p.lat).collect();
    let lons: Vec<f64> = points.iter().map(|p| p.lon).collect();
    Some(MapViewState {
        latitude: mean(&lats),
        longitude: mean(&lons),
        zoom: MAP_ZOOM,
        pitch: MAP_PITCH,
    })
}

/// First `rows` records of the view as table rows.
pub fn table_rows(view: &[CategorizedAirport<'_>], rows: usize) -> Vec<TableRow> {
    view.iter()
        .take(rows)
        .map(|c| TableRow {
            name: c.record.name.clone(),
            municipality: c.record.municipality.clone(),
            kind: c.record.kind.clone(),
            elevation_ft: c.record.elevation_ft.clone(),
            scheduled_service: c.record.scheduled_service.clone(),
        })
        .collect()
}

/// Case-insensitive substring match on the name.
///
/// An empty term means no search was asked for: `None`. Any other term,
/// whitespace included, is matched as given. Records without a name never
/// match.
pub fn search(view: &[CategorizedAirport<'_>], term: &str) -> Option<Vec<SearchHit>> {
    if term.is_empty() {
        return None;
    }
    let needle = term.to_lowercase();

    let hits = view
        .iter()
        .filter_map(|c| {
            let name = c.record.name.as_deref()?;
            name.to_lowercase().contains(&needle).then(|| SearchHit {
                name: name.to_string(),
                municipality: c.record.municipality.clone(),
                kind: c.record.kind.clone(),
            })
        })
        .collect();
    Some(hits)
}

/// Line chart series, lowest elevation first.
pub fn elevation_series(view: &[CategorizedAirport<'_>]) -> Vec<ElevationPoint> {
    let mut points: Vec<ElevationPoint> = view
        .iter()
        .map(|c| ElevationPoint {
            name: c.record.name().to_string(),
            elevation_ft: c.elevation_ft,
        })
        .collect();
    points.sort_by(|a, b| a.elevation_ft.total_cmp(&b.elevation_ft));
    points
}

/// "Sample Airport" line: the first record of the view.
pub fn sample_airport(view: &[CategorizedAirport<'_>]) -> Option<String> {
    view.first().map(|c| {
        format!(
            "Sample Airport: {} in {}",
            c.record.name(),
            c.record.municipality()
        )
    })
}

pub fn summary(view: &[&AirportRecord]) -> Summary {
    let lats: Vec<f64> = view.iter().map(|r| r.latitude_deg).collect();
    Summary {
        total: view.len(),
        distinct_types: distinct_types(view).len(),
        mean_latitude: (!lats.is_empty()).then(|| round_to(mean(&lats), 4)),
    }
}
