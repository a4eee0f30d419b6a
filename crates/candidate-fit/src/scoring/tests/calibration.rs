use std::collections::BTreeMap;

use super::common::*;
use crate::scoring::{CalibrationDelta, HardFilters, ScoringContext};

#[test]
fn empty_delta_leaves_job_unchanged() {
    let job = react_job();
    let delta = CalibrationDelta::default();

    assert!(delta.is_empty());
    assert_eq!(delta.apply(&job), job);
}

#[test]
fn weights_and_must_haves_match_names_case_insensitively() {
    let job = job(vec![
        competency("React", 0.8, true),
        competency("CSS", 0.2, false),
    ]);
    let delta = CalibrationDelta {
        weights: BTreeMap::from([("css".to_string(), 0.6), ("Unknown".to_string(), 0.9)]),
        must_haves: BTreeMap::from([("REACT".to_string(), false), ("css".to_string(), true)]),
        filters: None,
    };

    let calibrated = delta.apply(&job);

    assert_eq!(calibrated.competencies[0].weight, 0.8);
    assert!(!calibrated.competencies[0].must_have);
    assert_eq!(calibrated.competencies[1].weight, 0.6);
    assert!(calibrated.competencies[1].must_have);
    assert_eq!(calibrated.competencies.len(), 2);
    assert!(job.competencies[0].must_have);
}

#[test]
fn delta_weights_are_clamped() {
    let job = react_job();
    let delta = CalibrationDelta {
        weights: BTreeMap::from([("React".to_string(), 3.0)]),
        ..CalibrationDelta::default()
    };

    assert_eq!(delta.apply(&job).competencies[0].weight, 1.0);
}

#[test]
fn filter_fields_replace_only_when_present() {
    let job = with_filters(
        react_job(),
        HardFilters {
            min_total_experience_years: Some(5.0),
            allowed_work_auth: Some(vec!["Citizen".to_string()]),
            allowed_locations: None,
        },
    );
    let delta = CalibrationDelta {
        filters: Some(HardFilters {
            min_total_experience_years: Some(2.0),
            allowed_work_auth: None,
            allowed_locations: Some(vec!["Remote".to_string()]),
        }),
        ..CalibrationDelta::default()
    };

    let filters = delta
        .apply(&job)
        .hard_filters
        .expect("filters are present");

    assert_eq!(filters.min_total_experience_years, Some(2.0));
    assert_eq!(filters.allowed_work_auth, Some(vec!["Citizen".to_string()]));
    assert_eq!(filters.allowed_locations, Some(vec!["Remote".to_string()]));
}

#[test]
fn relaxing_a_must_have_lifts_the_cap_on_rescore() {
    let job = job(vec![
        competency("React", 0.5, true),
        competency("Node", 0.5, false),
    ]);
    let candidate = candidate(
        "c-node",
        vec![skill("Node", None, Some(CURRENT_YEAR), Some(5.0))],
    );
    let engine = engine();

    let before = engine
        .score_one(&ScoringContext::new(&job, &candidate, &[]))
        .expect("scored");
    let relaxed = CalibrationDelta {
        must_haves: BTreeMap::from([("react".to_string(), false)]),
        ..CalibrationDelta::default()
    }
    .apply(&job);
    let after = engine
        .score_one(&ScoringContext::new(&relaxed, &candidate, &[]))
        .expect("scored");

    assert_close(before.overall, 0.3);
    assert!(after.red_flags.is_empty());
    // Node: 0.5 * 1.0 + 0.5 * 0.7, weighted against an uncovered React
    assert_close(after.overall, 0.425);
}
