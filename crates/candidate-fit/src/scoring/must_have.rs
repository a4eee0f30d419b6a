use super::domain::{names_match, CompetencyScore, Job};

/// Flag every must-have competency whose computed score is absent or exactly zero.
///
/// Operates on scores only; a covered must-have with a poor score is not flagged.
pub(crate) fn check(job: &Job, by_competency: &[CompetencyScore]) -> Vec<String> {
    job.competencies
        .iter()
        .filter(|competency| competency.must_have)
        .filter(|competency| {
            by_competency
                .iter()
                .find(|score| names_match(&score.name, &competency.name))
                .map(|score| score.score == 0.0)
                .unwrap_or(true)
        })
        .map(|competency| format!("must-have competency missing: {}", competency.name))
        .collect()
}
