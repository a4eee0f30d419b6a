use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::scoring::{
    Assessment, AssessmentType, Candidate, CandidateId, Competency, CompetencyMapping,
    CompetencyScore, CompetencyScorer, FitScoringEngine, HardFilters, Job, JobId, ScoringConfig,
    Seniority, Skill, SkillEvidenceScorer, SkillLevel, Subscore,
};

pub(super) const CURRENT_YEAR: i32 = 2025;

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        current_year: CURRENT_YEAR,
        must_have_cap_score: 0.3,
        exclude_on_missing_must_have: false,
        exclude_on_hard_filter_fail: true,
    }
}

pub(super) fn engine() -> FitScoringEngine {
    FitScoringEngine::new(scoring_config())
}

pub(super) fn competency(name: &str, weight: f64, must_have: bool) -> Competency {
    Competency {
        name: name.to_string(),
        weight,
        must_have,
    }
}

pub(super) fn job(competencies: Vec<Competency>) -> Job {
    Job {
        id: JobId("job-frontend".to_string()),
        title: "Senior Frontend Engineer".to_string(),
        competencies,
        hard_filters: None,
    }
}

pub(super) fn react_job() -> Job {
    job(vec![competency("React", 1.0, true)])
}

pub(super) fn with_filters(mut job: Job, filters: HardFilters) -> Job {
    job.hard_filters = Some(filters);
    job
}

pub(super) fn skill(
    name: &str,
    level: Option<SkillLevel>,
    last_used_year: Option<i32>,
    years: Option<f64>,
) -> Skill {
    Skill {
        name: name.to_string(),
        level,
        last_used_year,
        years_of_experience: years,
    }
}

pub(super) fn candidate(id: &str, skills: Vec<Skill>) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: format!("Candidate {id}"),
        location: Some("Medellín, Colombia".to_string()),
        work_auth: Some("Citizen".to_string()),
        current_title: Some("Frontend Developer".to_string()),
        total_experience_years: Some(6.0),
        seniority: Some(Seniority::Senior),
        skills,
    }
}

pub(super) fn react_candidate() -> Candidate {
    candidate(
        "c-react",
        vec![skill(
            "React",
            Some(SkillLevel::Advanced),
            Some(CURRENT_YEAR),
            Some(4.0),
        )],
    )
}

pub(super) fn assessment(
    candidate_id: &str,
    kind: AssessmentType,
    score: f64,
    subscores: Vec<(&str, f64)>,
    competency_map: Vec<(&str, Option<f64>)>,
) -> Assessment {
    Assessment {
        candidate_id: CandidateId(candidate_id.to_string()),
        kind,
        score,
        subscores: subscores
            .into_iter()
            .map(|(name, score)| Subscore {
                name: name.to_string(),
                score,
            })
            .collect(),
        competency_map: competency_map
            .into_iter()
            .map(|(competency, weight)| CompetencyMapping {
                competency: competency.to_string(),
                weight,
            })
            .collect(),
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Delegates to the default scorer while counting invocations.
#[derive(Clone, Default)]
pub(super) struct CountingScorer {
    calls: Arc<AtomicUsize>,
}

impl CountingScorer {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompetencyScorer for CountingScorer {
    fn score(
        &self,
        competency: &str,
        candidate: &Candidate,
        assessments: &[Assessment],
        current_year: i32,
    ) -> CompetencyScore {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SkillEvidenceScorer.score(competency, candidate, assessments, current_year)
    }
}
