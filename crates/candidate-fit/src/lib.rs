//! Candidate-to-job fit scoring.
//!
//! The [`scoring`] module is a pure engine: a job's weighted competency model, a candidate
//! profile and that candidate's assessments go in, a [`FitSnapshot`] (or nothing, when the
//! exclusion policy triggers) comes out. The remaining modules are the process-level pieces
//! batch drivers share: configuration, telemetry, record loading and the application error.

pub mod config;
pub mod error;
pub mod records;
pub mod scoring;
pub mod telemetry;

pub use scoring::{
    score_many, score_one, Assessment, AssessmentType, BatchOutcome, CalibrationDelta,
    Candidate, CandidateId, Competency, CompetencyMapping, CompetencyScore, ExclusionReason,
    FitBand, FitScoringEngine, FitSnapshot, HardFilters, Job, JobId, ScoringConfig,
    ScoringContext, ScoringOverrides, Seniority, ShortlistEntry, ShortlistOrder, ShortlistQuery,
    ShortlistSort, Skill, SkillLevel, Subscore,
};
