use super::config::{clamp_unit, ScoringConfig};
use super::domain::{names_match, CompetencyScore, Job};

/// Overall score plus the exclusion verdict for the must-have policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Aggregation {
    pub overall: f64,
    pub excluded: bool,
}

/// Weighted mean of competency scores with the must-have cap applied.
pub(crate) fn aggregate(
    job: &Job,
    by_competency: &[CompetencyScore],
    must_have_flags: &[String],
    config: &ScoringConfig,
) -> Aggregation {
    if !must_have_flags.is_empty() && config.exclude_on_missing_must_have {
        return Aggregation {
            overall: 0.0,
            excluded: true,
        };
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for competency in &job.competencies {
        let Some(score) = by_competency
            .iter()
            .find(|score| names_match(&score.name, &competency.name))
        else {
            continue;
        };
        let weight = clamp_unit(competency.weight);
        weighted_sum += clamp_unit(score.score) * weight;
        total_weight += weight;
    }

    let mut overall = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    if !must_have_flags.is_empty() {
        overall = overall.min(config.must_have_cap_score);
    }

    Aggregation {
        overall: clamp_unit(overall),
        excluded: false,
    }
}
