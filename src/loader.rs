//! Builds the base set from the source table.
//!
//! Rows missing latitude, longitude, or region code are dropped, as are rows
//! whose region code is not one of the supported regions. Everything else is
//! kept as-is; elevation stays raw text until [`crate::coerce`] runs.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use tracing::{debug, info};

use crate::airport::{AirportRecord, Elevation, RawAirportRow};
use crate::region::Region;
use crate::source::read_source;

/// Columns the source table must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "latitude_deg",
    "longitude_deg",
    "iso_region",
    "elevation_ft",
    "type",
    "scheduled_service",
    "name",
    "municipality",
];

/// Reads and cleans the source at `location`.
///
/// # Errors
///
/// Fails if the source cannot be read or is not a well-formed table with the
/// required columns. There is no recovery from this at startup.
#[tracing::instrument]
pub fn load(location: &str) -> Result<Vec<AirportRecord>> {
    let bytes = read_source(location)?;
    let records = load_from_reader(bytes.as_slice())
        .with_context(|| format!("malformed airport table '{location}'"))?;
    info!(records = records.len(), "Airport base set loaded");
    Ok(records)
}

/// Parses and cleans CSV content from any reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<AirportRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }

    let mut records = Vec::new();
    let mut rows = 0usize;
    let mut incomplete = 0usize;
    let mut unsupported = 0usize;

    for result in rdr.deserialize() {
        let row: RawAirportRow = result?;
        rows += 1;

        // `NaN` and `inf` parse as floats but are not coordinates.
        let (Some(latitude_deg), Some(longitude_deg), Some(code)) = (
            row.latitude_deg.filter(|v| v.is_finite()),
            row.longitude_deg.filter(|v| v.is_finite()),
            row.iso_region.as_deref(),
        ) else {
            incomplete += 1;
            continue;
        };
        if code.is_empty() {
            incomplete += 1;
            continue;
        }

        let Some(region) = Region::from_code(code) else {
            unsupported += 1;
            continue;
        };

        records.push(AirportRecord {
            name: row.name,
            municipality: row.municipality,
            kind: row.kind.unwrap_or_default(),
            region,
            latitude_deg,
            longitude_deg,
            elevation_ft: Elevation::from(row.elevation_ft),
            scheduled_service: row.scheduled_service.unwrap_or_default(),
        });
    }

    debug!(
        rows,
        kept = records.len(),
        incomplete,
        unsupported,
        "Source rows cleaned"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "ident,type,name,latitude_deg,longitude_deg,elevation_ft,iso_region,municipality,scheduled_service\n";

    fn load_str(body: &str) -> Result<Vec<AirportRecord>> {
        load_from_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn test_supported_regions_are_kept_and_named() {
        let records = load_str(
            "KBOS,large_airport,Boston Logan International Airport,42.36,-71.00,20,US-MA,Boston,yes\n\
             KBTV,medium_airport,Burlington International Airport,44.47,-73.15,335,US-VT,Burlington,yes\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, Region::Massachusetts);
        assert_eq!(records[0].region.display_name(), "Massachusetts");
        assert_eq!(records[1].region, Region::Vermont);
        assert_eq!(records[0].elevation_ft, Elevation::Raw("20".into()));
    }

    #[test]
    fn test_unsupported_regions_are_excluded() {
        let records = load_str(
            "KJFK,large_airport,John F Kennedy International Airport,40.64,-73.78,13,US-NY,New York,yes\n\
             KPWM,medium_airport,Portland International Jetport,43.65,-70.31,76,US-ME,Portland,yes\n",
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Portland International Jetport");
    }

    #[test]
    fn test_rows_missing_location_fields_are_dropped() {
        let records = load_str(
            "X1,small_airport,No Latitude,,-71.0,100,US-MA,Somewhere,no\n\
             X2,small_airport,No Longitude,42.0,,100,US-MA,Somewhere,no\n\
             X3,small_airport,No Region,42.0,-71.0,100,,Somewhere,no\n\
             X4,small_airport,Bad Latitude,north,-71.0,100,US-MA,Somewhere,no\n\
             X5,small_airport,Complete,42.0,-71.0,100,US-MA,Somewhere,no\n",
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Complete");
    }

    #[test]
    fn test_non_finite_coordinates_count_as_missing() {
        let records = load_str(
            "X1,small_airport,Nan Lat,NaN,-71.0,100,US-MA,Town,no\n\
             X2,small_airport,Inf Lon,42.0,inf,100,US-MA,Town,no\n\
             X3,heliport,Neg Inf Lat,-inf,-71.0,100,US-MA,Town,no\n\
             X4,small_airport,Complete,42.0,-71.0,100,US-MA,Town,no\n",
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Complete");
        assert!(records.iter().all(|r| r.latitude_deg.is_finite() && r.longitude_deg.is_finite()));
    }

    #[test]
    fn test_missing_optional_values_are_tolerated() {
        let records = load_str("X1,heliport,,42.0,-71.0,,US-RI,,\n").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, None);
        assert_eq!(records[0].municipality, None);
        assert_eq!(records[0].elevation_ft, Elevation::Missing);
        assert_eq!(records[0].scheduled_service, "");
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let result = load_from_reader("name,latitude_deg,longitude_deg\nA,1,2\n".as_bytes());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("iso_region"));
        assert!(err.contains("elevation_ft"));
    }

    #[test]
    fn test_ragged_rows_are_fatal() {
        let result = load_str("X1,small_airport,Short Row,42.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table_loads_empty() {
        let records = load_str("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        assert!(load("definitely/not/here/airports.csv").is_err());
    }
}
