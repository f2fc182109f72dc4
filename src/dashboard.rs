//! One full pipeline run: base set + current parameters → everything the
//! views display.
//!
//! [`build_dashboard`] is pure over the immutable [`BaseSet`]; each parameter
//! change simply calls it again.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::aggregate::{
    ElevationStats, TypeCount, TypeDistribution, distribution_by_type, elevation_stats,
    group_count_by_type, type_shares,
};
use crate::airport::AirportRecord;
use crate::coerce::coerce_elevation;
use crate::derive::{CategorizedAirport, derive_view};
use crate::error::{CoercionError, ParamError};
use crate::filter::{FilterCriteria, distinct_types, filter, type_options};
use crate::loader::load;
use crate::presentation::{
    ElevationPoint, MapPoint, MapViewState, SearchHit, Summary, TableRow, elevation_series,
    map_points, map_view_state, sample_airport, search, summary, table_rows,
};
use crate::region::Region;

pub const NO_MATCHES: &str = "No airports match the current filters.";
pub const MAX_MIN_ELEVATION: u32 = 5000;
pub const MIN_ROWS: usize = 1;
pub const MAX_ROWS: usize = 20;
pub const DEFAULT_ROWS: usize = 5;

/// The loaded, cleaned, coerced record collection. Never mutated after
/// construction.
#[derive(Debug)]
pub struct BaseSet {
    records: Vec<AirportRecord>,
    coercion_error: Option<CoercionError>,
    type_options: Vec<String>,
    all_types: Vec<String>,
}

impl BaseSet {
    /// Loads and coerces the source at `location`.
    ///
    /// # Errors
    ///
    /// Only unreadable or malformed sources fail; a coercion problem is kept
    /// on the set and reported with every dashboard.
    pub fn load(location: &str) -> Result<Self> {
        Ok(Self::from_records(load(location)?))
    }

    pub fn from_records(records: Vec<AirportRecord>) -> Self {
        let coerced = coerce_elevation(records);
        let records = coerced.records;
        let all_types = distinct_types(&records.iter().collect::<Vec<_>>());
        let mut type_options = type_options(&records);
        // The default selection is every type, so every type must be offered.
        for kind in &all_types {
            if !type_options.contains(kind) {
                type_options.push(kind.clone());
            }
        }
        debug!(
            records = records.len(),
            types = all_types.len(),
            type_options = type_options.len(),
            "Base set ready"
        );

        Self {
            records,
            coercion_error: coerced.error,
            type_options,
            all_types,
        }
    }

    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    pub fn coercion_error(&self) -> Option<&CoercionError> {
        self.coercion_error.as_ref()
    }

    /// Choices offered by the type selector: types with scheduled service
    /// first, then the rest of the base set's types.
    pub fn type_options(&self) -> &[String] {
        &self.type_options
    }

    /// Every type in the base set; the selector's default.
    pub fn all_types(&self) -> &[String] {
        &self.all_types
    }
}

/// Allowed airport types.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TypeSelection {
    /// Every type present in the base set.
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl TypeSelection {
    pub fn resolve(&self, base: &BaseSet) -> BTreeSet<String> {
        match self {
            TypeSelection::All => base.all_types().iter().cloned().collect(),
            TypeSelection::Only(types) => types.clone(),
        }
    }
}

/// Current widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    pub region: Region,
    pub scheduled_only: bool,
    pub min_elevation: u32,
    pub types: TypeSelection,
    pub rows: usize,
    pub search: String,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            region: Region::default(),
            scheduled_only: false,
            min_elevation: 0,
            types: TypeSelection::All,
            rows: DEFAULT_ROWS,
            search: String::new(),
        }
    }
}

impl ViewParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.min_elevation > MAX_MIN_ELEVATION {
            return Err(ParamError::MinElevationOutOfRange(self.min_elevation));
        }
        if !(MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            return Err(ParamError::RowCountOutOfRange(self.rows));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus every selected type must be one
    /// `base` offers.
    pub fn validate_for(&self, base: &BaseSet) -> Result<(), ParamError> {
        self.validate()?;
        if let TypeSelection::Only(types) = &self.types {
            if let Some(unknown) = types.iter().find(|t| !base.type_options().contains(*t)) {
                return Err(ParamError::UnknownType(unknown.clone()));
            }
        }
        Ok(())
    }

    pub fn criteria(&self, base: &BaseSet) -> FilterCriteria {
        FilterCriteria {
            region: self.region,
            scheduled_only: self.scheduled_only,
            min_elevation: f64::from(self.min_elevation),
            allowed_types: self.types.resolve(base),
        }
    }
}

/// Chart and map inputs; absent when the view is empty.
#[derive(Debug, Serialize)]
pub struct Charts {
    pub type_counts: Vec<TypeCount>,
    pub elevation_series: Vec<ElevationPoint>,
    pub distribution: Vec<TypeDistribution>,
    pub map_points: Vec<MapPoint>,
    pub map_view: MapViewState,
}

/// Everything one run produces for the rendering side.
#[derive(Debug, Serialize)]
pub struct Dashboard<'a> {
    pub generated_at: DateTime<Utc>,
    pub region: Region,
    pub title: String,
    pub warnings: Vec<String>,
    pub type_options: &'a [String],
    pub airports: Vec<CategorizedAirport<'a>>,
    pub stats: Option<ElevationStats>,
    pub type_counts: Vec<TypeCount>,
    pub sample: Option<String>,
    pub charts: Option<Charts>,
    pub empty_message: Option<&'static str>,
    pub table: Vec<TableRow>,
    pub search: Option<Vec<SearchHit>>,
    pub summary: Summary,
}

impl Dashboard<'_> {
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

/// Runs filter → derive → aggregate → presentation for one set of parameters.
#[tracing::instrument(skip_all, fields(region = %params.region, min_elevation = params.min_elevation))]
pub fn build_dashboard<'a>(base: &'a BaseSet, params: &ViewParams) -> Dashboard<'a> {
    let criteria = params.criteria(base);
    let filtered = filter(base.records(), &criteria);

    let airports = derive_view(filtered);
    let view: Vec<&AirportRecord> = airports.iter().map(|c| c.record).collect();

    let stats = elevation_stats(&view);
    let type_counts = type_shares(&group_count_by_type(&view));

    let charts = if airports.is_empty() {
        None
    } else {
        let points = map_points(&airports);
        map_view_state(&points).map(|map_view| Charts {
            type_counts: type_counts.clone(),
            elevation_series: elevation_series(&airports),
            distribution: distribution_by_type(&view),
            map_points: points,
            map_view,
        })
    };

    let dashboard = Dashboard {
        generated_at: Utc::now(),
        region: params.region,
        title: format!("Types of Airports in {}", params.region),
        warnings: base
            .coercion_error()
            .map(|e| format!("Error converting elevation to float: {e}"))
            .into_iter()
            .collect(),
        type_options: base.type_options(),
        stats,
        type_counts,
        sample: sample_airport(&airports),
        empty_message: charts.is_none().then_some(NO_MATCHES),
        charts,
        table: table_rows(&airports, params.rows),
        search: search(&airports, &params.search),
        summary: summary(&view),
        airports,
    };

    info!(
        shown = dashboard.summary.total,
        types = dashboard.summary.distinct_types,
        "Dashboard built"
    );
    dashboard
}
