use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::clamp_unit;
use super::domain::{normalize_name, HardFilters, Job};

/// "What-if" adjustments to a job's competency model and hard filters.
///
/// Keys in `weights` and `must_haves` are competency names, matched case-insensitively.
/// Filter fields present in `filters` replace the job's; absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationDelta {
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default, alias = "mustHaves")]
    pub must_haves: BTreeMap<String, bool>,
    #[serde(default)]
    pub filters: Option<HardFilters>,
}

impl CalibrationDelta {
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty() && self.must_haves.is_empty() && self.filters.is_none()
    }

    /// Produce a recalibrated copy of `job`.
    pub fn apply(&self, job: &Job) -> Job {
        let weights = normalized_keys(&self.weights);
        let must_haves = normalized_keys(&self.must_haves);

        let mut calibrated = job.clone();
        for competency in &mut calibrated.competencies {
            let key = normalize_name(&competency.name);
            if let Some(weight) = weights.get(&key) {
                competency.weight = clamp_unit(*weight);
            }
            if let Some(must_have) = must_haves.get(&key) {
                competency.must_have = *must_have;
            }
        }

        if let Some(delta) = &self.filters {
            let mut filters = calibrated.hard_filters.take().unwrap_or_default();
            if delta.min_total_experience_years.is_some() {
                filters.min_total_experience_years = delta.min_total_experience_years;
            }
            if delta.allowed_work_auth.is_some() {
                filters.allowed_work_auth = delta.allowed_work_auth.clone();
            }
            if delta.allowed_locations.is_some() {
                filters.allowed_locations = delta.allowed_locations.clone();
            }
            calibrated.hard_filters = Some(filters);
        }

        calibrated
    }
}

// First key wins when two delta entries normalize to the same name.
fn normalized_keys<V: Copy>(entries: &BTreeMap<String, V>) -> BTreeMap<String, V> {
    let mut normalized = BTreeMap::new();
    for (name, value) in entries {
        normalized.entry(normalize_name(name)).or_insert(*value);
    }
    normalized
}
