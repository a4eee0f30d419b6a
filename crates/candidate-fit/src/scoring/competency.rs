use super::config::clamp_unit;
use super::domain::{normalize_name, Assessment, Candidate, CompetencyScore, Skill, SkillLevel};

/// Recency decays linearly to zero over this many years.
pub const RECENCY_HORIZON_YEARS: f64 = 5.0;
/// Recency assumed when a skill carries no last-used year.
pub const NEUTRAL_RECENCY: f64 = 0.6;
/// Years of experience at which depth saturates.
pub const DEPTH_SATURATION_YEARS: f64 = 5.0;
/// Level factor when a skill does not declare its level.
pub const UNSPECIFIED_LEVEL_FACTOR: f64 = 0.7;
/// Assessment factor when no assessment references the competency.
pub const NEUTRAL_ASSESSMENT_FACTOR: f64 = 1.0;

/// Scores one named competency for a candidate.
///
/// Implementations must be pure: the engine calls `score` once per job competency,
/// in any order, with no state carried between calls.
pub trait CompetencyScorer: Send + Sync {
    fn score(
        &self,
        competency: &str,
        candidate: &Candidate,
        assessments: &[Assessment],
        current_year: i32,
    ) -> CompetencyScore;
}

/// Default scorer: coverage x skill quality x assessment factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillEvidenceScorer;

impl CompetencyScorer for SkillEvidenceScorer {
    fn score(
        &self,
        competency: &str,
        candidate: &Candidate,
        assessments: &[Assessment],
        current_year: i32,
    ) -> CompetencyScore {
        let signals = CompetencySignals::compute(competency, candidate, assessments, current_year);
        let skill = candidate.skill(competency);

        let mut evidence = Vec::new();
        if let Some(skill) = skill {
            evidence.push(skill_evidence(skill));
        }
        evidence.extend(assessment_evidence(competency, assessments));

        tracing::trace!(
            competency,
            coverage = signals.coverage,
            recency = signals.recency,
            depth = signals.depth,
            assessment_factor = signals.assessment_factor,
            "scored competency"
        );

        CompetencyScore {
            name: competency.to_string(),
            score: signals.score(),
            evidence,
        }
    }
}

/// Normalized sub-signals behind a competency score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetencySignals {
    pub coverage: f64,
    pub recency: f64,
    pub depth: f64,
    pub assessment_factor: f64,
}

impl CompetencySignals {
    pub fn compute(
        competency: &str,
        candidate: &Candidate,
        assessments: &[Assessment],
        current_year: i32,
    ) -> Self {
        let skill = candidate.skill(competency);
        Self {
            coverage: if skill.is_some() { 1.0 } else { 0.0 },
            recency: recency(skill, current_year),
            depth: depth(skill),
            assessment_factor: assessment_factor(competency, assessments),
        }
    }

    pub fn skill_quality(&self) -> f64 {
        0.5 * self.recency + 0.5 * self.depth
    }

    pub fn score(&self) -> f64 {
        clamp_unit(self.coverage * self.skill_quality() * self.assessment_factor)
    }
}

pub fn recency(skill: Option<&Skill>, current_year: i32) -> f64 {
    match skill.and_then(Skill::declared_last_used) {
        Some(last_used) => {
            let years_since = f64::from(current_year) - f64::from(last_used);
            clamp_unit(1.0 - years_since / RECENCY_HORIZON_YEARS)
        }
        None => NEUTRAL_RECENCY,
    }
}

pub fn depth(skill: Option<&Skill>) -> f64 {
    let Some(skill) = skill else {
        return 0.0;
    };
    let years = skill
        .years_of_experience
        .filter(|years| years.is_finite())
        .unwrap_or(0.0);
    let years_score = clamp_unit(years / DEPTH_SATURATION_YEARS);
    years_score * level_factor(skill.level)
}

pub fn level_factor(level: Option<SkillLevel>) -> f64 {
    match level {
        Some(SkillLevel::Basic) => 0.6,
        Some(SkillLevel::Intermediate) => 0.8,
        Some(SkillLevel::Advanced) => 1.0,
        None => UNSPECIFIED_LEVEL_FACTOR,
    }
}

/// Weighted mean of normalized assessment results that reference the competency.
///
/// Each assessment contributes at most its first matching `competency_map` entry (weighted)
/// and its first matching subscore (weight 1.0). Both land in the same running sum, so a
/// competency that is mapped and also named as a subscore is counted twice.
pub fn assessment_factor(competency: &str, assessments: &[Assessment]) -> f64 {
    let key = normalize_name(competency);
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for assessment in assessments {
        if let Some(mapping) = assessment
            .competency_map
            .iter()
            .find(|mapping| normalize_name(&mapping.competency) == key)
        {
            let weight = mapping
                .weight
                .filter(|weight| weight.is_finite() && *weight > 0.0)
                .unwrap_or(1.0);
            weighted_sum += normalize_percent(assessment.score) * weight;
            total_weight += weight;
        }

        if let Some(subscore) = assessment
            .subscores
            .iter()
            .find(|subscore| normalize_name(&subscore.name) == key)
        {
            weighted_sum += normalize_percent(subscore.score);
            total_weight += 1.0;
        }
    }

    if total_weight > 0.0 {
        clamp_unit(weighted_sum / total_weight)
    } else {
        NEUTRAL_ASSESSMENT_FACTOR
    }
}

fn normalize_percent(score: f64) -> f64 {
    clamp_unit(score / 100.0)
}

fn skill_evidence(skill: &Skill) -> String {
    let mut details = Vec::new();
    if let Some(level) = skill.level {
        details.push(format!("level={}", level.label()));
    }
    if let Some(last_used) = skill.declared_last_used() {
        details.push(format!("last_used={last_used}"));
    }
    if let Some(years) = skill.declared_years() {
        details.push(format!("years={years}"));
    }

    if details.is_empty() {
        format!("skills.{}", skill.name)
    } else {
        format!("skills.{}({})", skill.name, details.join(","))
    }
}

fn assessment_evidence(competency: &str, assessments: &[Assessment]) -> Vec<String> {
    let key = normalize_name(competency);
    let mut evidence = Vec::new();

    for assessment in assessments {
        let kind = assessment.kind.label();
        if assessment
            .competency_map
            .iter()
            .any(|mapping| normalize_name(&mapping.competency) == key)
        {
            evidence.push(format!(
                "assessment:{kind}.score={}",
                assessment.score.round() as i64
            ));
        }
        if let Some(subscore) = assessment
            .subscores
            .iter()
            .find(|subscore| normalize_name(&subscore.name) == key)
        {
            evidence.push(format!(
                "assessment:{kind}.{}={}",
                subscore.name,
                subscore.score.round() as i64
            ));
        }
    }

    evidence
}
