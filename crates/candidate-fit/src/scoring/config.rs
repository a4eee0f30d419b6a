use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MUST_HAVE_CAP: f64 = 0.3;

/// Policy knobs for one scoring run. Passed into every call, never mutated mid-computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub current_year: i32,
    pub must_have_cap_score: f64,
    pub exclude_on_missing_must_have: bool,
    pub exclude_on_hard_filter_fail: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            current_year: Utc::now().year(),
            must_have_cap_score: DEFAULT_MUST_HAVE_CAP,
            exclude_on_missing_must_have: false,
            exclude_on_hard_filter_fail: true,
        }
    }
}

impl ScoringConfig {
    /// Merge optional overrides onto this configuration.
    pub fn with_overrides(mut self, overrides: &ScoringOverrides) -> Self {
        if let Some(year) = overrides.current_year {
            self.current_year = year;
        }
        if let Some(cap) = overrides.must_have_cap_score {
            self.must_have_cap_score = cap;
        }
        if let Some(exclude) = overrides.exclude_on_missing_must_have {
            self.exclude_on_missing_must_have = exclude;
        }
        if let Some(exclude) = overrides.exclude_on_hard_filter_fail {
            self.exclude_on_hard_filter_fail = exclude;
        }
        self.must_have_cap_score = clamp_unit(self.must_have_cap_score);
        self
    }
}

/// Partial configuration; unset fields fall back to the base config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringOverrides {
    pub current_year: Option<i32>,
    pub must_have_cap_score: Option<f64>,
    pub exclude_on_missing_must_have: Option<bool>,
    pub exclude_on_hard_filter_fail: Option<bool>,
}

impl ScoringOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Clamp into [0, 1]; NaN collapses to 0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cap_missing_must_haves_and_exclude_hard_filter_failures() {
        let config = ScoringConfig::default();
        assert_eq!(config.must_have_cap_score, 0.3);
        assert!(!config.exclude_on_missing_must_have);
        assert!(config.exclude_on_hard_filter_fail);
        assert_eq!(config.current_year, Utc::now().year());
    }

    #[test]
    fn overrides_only_replace_supplied_fields() {
        let overrides = ScoringOverrides {
            current_year: Some(2030),
            exclude_on_missing_must_have: Some(true),
            ..ScoringOverrides::default()
        };

        let config = ScoringConfig::default().with_overrides(&overrides);

        assert_eq!(config.current_year, 2030);
        assert!(config.exclude_on_missing_must_have);
        assert!(config.exclude_on_hard_filter_fail);
        assert_eq!(config.must_have_cap_score, DEFAULT_MUST_HAVE_CAP);
    }

    #[test]
    fn out_of_range_cap_is_clamped() {
        let overrides = ScoringOverrides {
            must_have_cap_score: Some(1.7),
            ..ScoringOverrides::default()
        };
        let config = ScoringConfig::default().with_overrides(&overrides);
        assert_eq!(config.must_have_cap_score, 1.0);

        let overrides = ScoringOverrides {
            must_have_cap_score: Some(f64::NAN),
            ..ScoringOverrides::default()
        };
        let config = ScoringConfig::default().with_overrides(&overrides);
        assert_eq!(config.must_have_cap_score, 0.0);
    }

    #[test]
    fn empty_overrides_are_detected() {
        assert!(ScoringOverrides::default().is_empty());
        assert!(!ScoringOverrides {
            current_year: Some(2024),
            ..ScoringOverrides::default()
        }
        .is_empty());
    }
}
