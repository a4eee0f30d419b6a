//! Fit scoring pipeline: hard filters, competency scoring, must-have check,
//! aggregation and explanation, run once per (job, candidate) pair.
//!
//! The engine holds no mutable state. Exclusions are business outcomes, not errors, and are
//! reported as `None`.

mod aggregate;
mod calibration;
pub mod competency;
mod config;
mod domain;
pub mod explain;
mod hard_filters;
mod must_have;
mod shortlist;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use calibration::CalibrationDelta;
pub use competency::{CompetencyScorer, CompetencySignals, SkillEvidenceScorer};
pub use config::{ScoringConfig, ScoringOverrides, DEFAULT_MUST_HAVE_CAP};
pub use domain::{
    normalize_name, Assessment, AssessmentType, Candidate, CandidateId, Competency,
    CompetencyMapping, CompetencyScore, FitSnapshot, HardFilters, Job, JobId, ScoringContext,
    Seniority, Skill, SkillLevel, Subscore, DEFAULT_CALIBRATION_VERSION,
};
pub use explain::FitBand;
pub use shortlist::{ShortlistEntry, ShortlistOrder, ShortlistQuery, ShortlistSort};

/// Why a candidate produced no snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    HardFilter,
    MissingMustHave,
}

/// Batch result: snapshots for scored candidates plus the excluded ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub snapshots: Vec<FitSnapshot>,
    pub excluded: Vec<CandidateId>,
    pub total: usize,
}

impl BatchOutcome {
    pub fn scored(&self) -> usize {
        self.snapshots.len()
    }
}

/// Stateless engine applying a [`ScoringConfig`] to scoring contexts.
pub struct FitScoringEngine<S = SkillEvidenceScorer> {
    config: ScoringConfig,
    scorer: S,
    calibration_version: String,
}

impl FitScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_scorer(config, SkillEvidenceScorer)
    }
}

impl Default for FitScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl<S: CompetencyScorer> FitScoringEngine<S> {
    pub fn with_scorer(config: ScoringConfig, scorer: S) -> Self {
        Self {
            config,
            scorer,
            calibration_version: DEFAULT_CALIBRATION_VERSION.to_string(),
        }
    }

    /// Calibration label applied to contexts that do not carry their own.
    pub fn with_calibration_version(mut self, version: impl Into<String>) -> Self {
        self.calibration_version = version.into();
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one candidate against one job; `None` when the exclusion policy triggers.
    pub fn score_one(&self, context: &ScoringContext<'_>) -> Option<FitSnapshot> {
        self.evaluate(context).ok()
    }

    /// Score a candidate pool, skipping excluded candidates.
    pub fn score_many(
        &self,
        job: &Job,
        candidates: &[Candidate],
        assessments_by_candidate: &HashMap<CandidateId, Vec<Assessment>>,
    ) -> Vec<FitSnapshot> {
        self.score_batch(job, candidates, assessments_by_candidate)
            .snapshots
    }

    /// Score a candidate pool and report which candidates were excluded.
    pub fn score_batch(
        &self,
        job: &Job,
        candidates: &[Candidate],
        assessments_by_candidate: &HashMap<CandidateId, Vec<Assessment>>,
    ) -> BatchOutcome {
        let mut snapshots = Vec::with_capacity(candidates.len());
        let mut excluded = Vec::new();

        for candidate in candidates {
            let assessments = assessments_by_candidate
                .get(&candidate.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let context = ScoringContext::new(job, candidate, assessments);
            match self.evaluate(&context) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(_) => excluded.push(candidate.id.clone()),
            }
        }

        info!(
            job_id = %job.id,
            scored = snapshots.len(),
            excluded = excluded.len(),
            total = candidates.len(),
            "scored candidate pool"
        );

        BatchOutcome {
            snapshots,
            excluded,
            total: candidates.len(),
        }
    }

    /// Run the pipeline, reporting why a candidate was excluded.
    pub fn evaluate(&self, context: &ScoringContext<'_>) -> Result<FitSnapshot, ExclusionReason> {
        let ScoringContext {
            job,
            candidate,
            assessments,
            calibration_version,
        } = *context;

        let hard_filter_flags = hard_filters::evaluate(job, candidate);
        if !hard_filter_flags.is_empty() && self.config.exclude_on_hard_filter_fail {
            debug!(
                job_id = %job.id,
                candidate_id = %candidate.id,
                flags = hard_filter_flags.len(),
                "candidate excluded by hard filters"
            );
            return Err(ExclusionReason::HardFilter);
        }

        let by_competency: Vec<CompetencyScore> = job
            .competencies
            .iter()
            .map(|competency| {
                self.scorer.score(
                    &competency.name,
                    candidate,
                    assessments,
                    self.config.current_year,
                )
            })
            .collect();

        let must_have_flags = must_have::check(job, &by_competency);
        let aggregation =
            aggregate::aggregate(job, &by_competency, &must_have_flags, &self.config);
        if aggregation.excluded {
            debug!(
                job_id = %job.id,
                candidate_id = %candidate.id,
                flags = must_have_flags.len(),
                "candidate excluded for missing must-have competencies"
            );
            return Err(ExclusionReason::MissingMustHave);
        }

        let mut red_flags = hard_filter_flags;
        red_flags.extend(must_have_flags);

        let explain_atoms =
            explain::explain(candidate, &by_competency, &red_flags, aggregation.overall);

        Ok(FitSnapshot {
            snapshot_id: None,
            job_id: job.id.clone(),
            candidate_id: candidate.id.clone(),
            overall: aggregation.overall,
            by_competency,
            red_flags,
            explain_atoms,
            calibration_version: calibration_version
                .map(str::to_string)
                .unwrap_or_else(|| self.calibration_version.clone()),
            created_at: Utc::now(),
        })
    }
}

/// Score one context with overrides merged onto the default configuration.
pub fn score_one(
    context: &ScoringContext<'_>,
    overrides: &ScoringOverrides,
) -> Option<FitSnapshot> {
    FitScoringEngine::new(ScoringConfig::default().with_overrides(overrides)).score_one(context)
}

/// Score a candidate pool with overrides merged onto the default configuration.
///
/// Snapshots are tagged with the overridden year as their calibration version, or
/// [`DEFAULT_CALIBRATION_VERSION`] when no year is supplied.
pub fn score_many(
    job: &Job,
    candidates: &[Candidate],
    assessments_by_candidate: &HashMap<CandidateId, Vec<Assessment>>,
    overrides: &ScoringOverrides,
) -> Vec<FitSnapshot> {
    let calibration_version = overrides
        .current_year
        .map(|year| year.to_string())
        .unwrap_or_else(|| DEFAULT_CALIBRATION_VERSION.to_string());

    FitScoringEngine::new(ScoringConfig::default().with_overrides(overrides))
        .with_calibration_version(calibration_version)
        .score_many(job, candidates, assessments_by_candidate)
}
