//! Converts the elevation column to floating point.

use tracing::{debug, warn};

use crate::airport::{AirportRecord, Elevation};
use crate::error::CoercionError;

/// Result of converting the elevation column.
///
/// On failure `records` is the input untouched and `error` describes the
/// first bad value; the pipeline carries on with it.
#[derive(Debug)]
pub struct Coerced {
    pub records: Vec<AirportRecord>,
    pub error: Option<CoercionError>,
}

/// Replaces every raw elevation with its parsed float.
///
/// All-or-nothing: one value that fails to parse leaves the whole column as
/// it was and produces a single [`CoercionError`].
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn coerce_elevation(records: Vec<AirportRecord>) -> Coerced {
    let mut first_bad: Option<(usize, String)> = None;
    let mut bad_values = 0usize;
    let mut parsed = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        match &record.elevation_ft {
            Elevation::Raw(text) => match text.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => parsed.push(Some(Elevation::Feet(v))),
                // `NaN` is a null marker, not a bad value.
                Ok(_) => parsed.push(Some(Elevation::Missing)),
                Err(_) => {
                    bad_values += 1;
                    first_bad.get_or_insert_with(|| (idx + 1, text.clone()));
                    parsed.push(None);
                }
            },
            _ => parsed.push(None),
        }
    }

    if let Some((row, value)) = first_bad {
        let error = CoercionError {
            row,
            value,
            bad_values,
        };
        warn!(error = %error, "Elevation conversion failed, column left unconverted");
        return Coerced {
            records,
            error: Some(error),
        };
    }

    let records: Vec<AirportRecord> = records
        .into_iter()
        .zip(parsed)
        .map(|(mut record, value)| {
            if let Some(elevation) = value {
                record.elevation_ft = elevation;
            }
            record
        })
        .collect();

    debug!("Elevation column converted");
    Coerced {
        records,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    #[test]
    fn test_all_numeric_values_convert() {
        let coerced = coerce_elevation(vec![
            create_record(Elevation::Raw("120".into())),
            create_record(Elevation::Raw("-5.5".into())),
            create_record(Elevation::Missing),
        ]);

        assert!(coerced.error.is_none());
        assert_eq!(coerced.records[0].elevation_ft, Elevation::Feet(120.0));
        assert_eq!(coerced.records[1].elevation_ft, Elevation::Feet(-5.5));
        assert_eq!(coerced.records[2].elevation_ft, Elevation::Missing);
    }

    #[test]
    fn test_one_bad_value_reports_once_and_leaves_column_unconverted() {
        let coerced = coerce_elevation(vec![
            create_record(Elevation::Raw("120".into())),
            create_record(Elevation::Raw("n/a".into())),
            create_record(Elevation::Raw("high".into())),
        ]);

        let error = coerced.error.unwrap();
        assert_eq!(error.row, 2);
        assert_eq!(error.value, "n/a");
        assert_eq!(error.bad_values, 2);

        assert_eq!(coerced.records.len(), 3);
        assert!(coerced.records.iter().all(|r| !r.elevation_ft.is_coerced()));
        // Parseable text stays usable downstream.
        assert_eq!(coerced.records[0].elevation(), Some(120.0));
        assert_eq!(coerced.records[1].elevation(), None);
    }

    #[test]
    fn test_non_finite_text_becomes_missing() {
        let coerced = coerce_elevation(vec![
            create_record(Elevation::Raw("NaN".into())),
            create_record(Elevation::Raw("inf".into())),
            create_record(Elevation::Raw("100".into())),
        ]);

        assert!(coerced.error.is_none());
        assert_eq!(coerced.records[0].elevation_ft, Elevation::Missing);
        assert_eq!(coerced.records[1].elevation_ft, Elevation::Missing);
        assert_eq!(coerced.records[0].elevation(), None);
        assert_eq!(crate::derive::categorize(&coerced.records[0]), None);
        assert_eq!(coerced.records[2].elevation_ft, Elevation::Feet(100.0));
    }

    #[test]
    fn test_empty_input() {
        let coerced = coerce_elevation(Vec::new());
        assert!(coerced.records.is_empty());
        assert!(coerced.error.is_none());
    }

    fn create_record(elevation_ft: Elevation) -> AirportRecord {
        AirportRecord {
            name: Some("Test Field".into()),
            municipality: None,
            kind: "small_airport".into(),
            region: Region::Vermont,
            latitude_deg: 44.0,
            longitude_deg: -72.0,
            elevation_ft,
            scheduled_service: "no".into(),
        }
    }
}
