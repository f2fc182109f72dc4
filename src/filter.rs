//! The filter stage: five independent predicates over the base set.
//!
//! Each predicate takes the current view and returns the records that pass,
//! so the output of [`filter`] is always a subset of its input, in input
//! order.

use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::airport::AirportRecord;
use crate::region::Region;

/// Parameters for one run of the filter stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub region: Region,
    pub scheduled_only: bool,
    pub min_elevation: f64,
    pub allowed_types: BTreeSet<String>,
}

/// Applies all five predicates in order: region, scheduled service, minimum
/// elevation, type membership, coordinate completeness.
#[tracing::instrument(skip_all, fields(region = %criteria.region, scheduled_only = criteria.scheduled_only, min_elevation = criteria.min_elevation))]
pub fn filter<'a>(records: &'a [AirportRecord], criteria: &FilterCriteria) -> Vec<&'a AirportRecord> {
    let view: Vec<&AirportRecord> = records.iter().collect();
    let view = by_region(view, criteria.region);
    let view = filter_scheduled(view, criteria.scheduled_only);
    let view = by_min_elevation(view, criteria.min_elevation);
    let view = by_types(view, &criteria.allowed_types);
    let view = with_coordinates(view);

    debug!(input = records.len(), output = view.len(), "Filter stage complete");
    view
}

pub fn by_region(view: Vec<&AirportRecord>, region: Region) -> Vec<&AirportRecord> {
    view.into_iter().filter(|r| r.region == region).collect()
}

/// Keeps only airports with scheduled service when `scheduled` is set;
/// otherwise passes everything through.
pub fn filter_scheduled(view: Vec<&AirportRecord>, scheduled: bool) -> Vec<&AirportRecord> {
    if !scheduled {
        return view;
    }
    view.into_iter().filter(|r| r.has_scheduled_service()).collect()
}

/// Inclusive threshold. Records without a usable elevation never pass.
pub fn by_min_elevation(view: Vec<&AirportRecord>, min_elevation: f64) -> Vec<&AirportRecord> {
    view.into_iter()
        .filter(|r| r.elevation().is_some_and(|e| e >= min_elevation))
        .collect()
}

/// An empty allowed set lets nothing through.
pub fn by_types<'a>(view: Vec<&'a AirportRecord>, allowed: &BTreeSet<String>) -> Vec<&'a AirportRecord> {
    view.into_iter().filter(|r| allowed.contains(&r.kind)).collect()
}

pub fn with_coordinates(view: Vec<&AirportRecord>) -> Vec<&AirportRecord> {
    view.into_iter()
        .filter(|r| r.latitude_deg.is_finite() && r.longitude_deg.is_finite())
        .collect()
}

/// Options for the type selector, in first-seen order.
///
/// Drawn from the whole base set restricted to scheduled service, with no
/// other predicate applied.
pub fn type_options(records: &[AirportRecord]) -> Vec<String> {
    let filtered_all = filter_scheduled(records.iter().collect(), true);
    distinct_types(&filtered_all)
}

/// Distinct `type` values in first-seen order.
pub fn distinct_types(view: &[&AirportRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    view.iter()
        .filter(|r| seen.insert(r.kind.as_str()))
        .map(|r| r.kind.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::Elevation;

    #[test]
    fn test_filter_keeps_only_matching_region() {
        let base = create_base();
        let criteria = criteria_for(Region::Maine, false, 0.0, all_types(&base));

        let view = filter(&base, &criteria);

        assert_eq!(names(&view), vec!["Portland Jetport", "Bangor International", "Sugarloaf Strip"]);
    }

    #[test]
    fn test_filter_output_satisfies_every_predicate() {
        let base = create_base();
        let allowed: BTreeSet<String> = ["medium_airport".to_string()].into();
        let criteria = criteria_for(Region::Maine, true, 100.0, allowed.clone());

        let view = filter(&base, &criteria);

        assert!(view.len() <= base.len());
        for r in &view {
            assert_eq!(r.region, Region::Maine);
            assert!(r.has_scheduled_service());
            assert!(r.elevation().unwrap() >= 100.0);
            assert!(allowed.contains(&r.kind));
        }
        assert_eq!(names(&view), vec!["Bangor International"]);
    }

    #[test]
    fn test_scheduled_off_is_a_no_op() {
        let base = create_base();
        let view = filter_scheduled(base.iter().collect(), false);
        assert_eq!(view.len(), base.len());
    }

    #[test]
    fn test_scheduled_on_requires_yes() {
        let base = create_base();
        let view = filter_scheduled(base.iter().collect(), true);
        assert!(view.iter().all(|r| r.scheduled_service == "yes"));
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_min_elevation_is_inclusive_and_drops_absent() {
        let base = create_base();
        let view = by_min_elevation(base.iter().collect(), 192.0);
        let got = names(&view);
        assert!(got.contains(&"Bangor International"));
        assert!(!got.contains(&"Unknown Height"));
    }

    #[test]
    fn test_huge_min_elevation_yields_empty() {
        let base = create_base();
        let criteria = criteria_for(Region::Maine, false, 100_000.0, all_types(&base));
        assert!(filter(&base, &criteria).is_empty());
    }

    #[test]
    fn test_empty_allowed_types_yields_empty() {
        let base = create_base();
        let criteria = criteria_for(Region::Maine, false, 0.0, BTreeSet::new());
        assert!(filter(&base, &criteria).is_empty());
    }

    #[test]
    fn test_non_finite_coordinates_are_dropped() {
        let mut base = create_base();
        base[0].latitude_deg = f64::NAN;
        let view = with_coordinates(base.iter().collect());
        assert_eq!(view.len(), base.len() - 1);
    }

    #[test]
    fn test_empty_input_is_tolerated() {
        let criteria = criteria_for(Region::Vermont, true, 0.0, BTreeSet::new());
        assert!(filter(&[], &criteria).is_empty());
        assert!(type_options(&[]).is_empty());
    }

    #[test]
    fn test_type_options_come_from_scheduled_view() {
        let base = create_base();
        assert_eq!(type_options(&base), vec!["medium_airport", "large_airport"]);
        assert_eq!(
            distinct_types(&base.iter().collect::<Vec<_>>()),
            vec!["medium_airport", "small_airport", "large_airport", "heliport"]
        );
    }

    // Helper functions for tests
    fn names<'a>(view: &[&'a AirportRecord]) -> Vec<&'a str> {
        view.iter().map(|r| r.name()).collect()
    }

    fn all_types(base: &[AirportRecord]) -> BTreeSet<String> {
        base.iter().map(|r| r.kind.clone()).collect()
    }

    fn criteria_for(
        region: Region,
        scheduled_only: bool,
        min_elevation: f64,
        allowed_types: BTreeSet<String>,
    ) -> FilterCriteria {
        FilterCriteria {
            region,
            scheduled_only,
            min_elevation,
            allowed_types,
        }
    }

    fn create_base() -> Vec<AirportRecord> {
        vec![
            airport("Portland Jetport", "medium_airport", Region::Maine, 76.0, "yes"),
            airport("Bangor International", "medium_airport", Region::Maine, 192.0, "yes"),
            airport("Sugarloaf Strip", "small_airport", Region::Maine, 1300.0, "no"),
            airport("Boston Logan", "large_airport", Region::Massachusetts, 20.0, "yes"),
            AirportRecord {
                elevation_ft: Elevation::Missing,
                ..airport("Unknown Height", "heliport", Region::Massachusetts, 0.0, "no")
            },
        ]
    }

    fn airport(name: &str, kind: &str, region: Region, elevation: f64, scheduled: &str) -> AirportRecord {
        AirportRecord {
            name: Some(name.to_string()),
            municipality: Some("Town".to_string()),
            kind: kind.to_string(),
            region,
            latitude_deg: 44.0,
            longitude_deg: -70.0,
            elevation_ft: Elevation::Feet(elevation),
            scheduled_service: scheduled.to_string(),
        }
    }
}
