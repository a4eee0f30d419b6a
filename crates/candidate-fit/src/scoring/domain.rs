use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Calibration label recorded when the caller does not supply one.
pub const DEFAULT_CALIBRATION_VERSION: &str = "v1";

/// Normalized lookup key shared by every name comparison in the engine
/// (competency to skill, assessment mapping and subscore).
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(crate) fn names_match(left: &str, right: &str) -> bool {
    normalize_name(left) == normalize_name(right)
}

/// Identifier wrapper for jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weighted capability a job asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competency {
    pub name: String,
    pub weight: f64,
    #[serde(default, alias = "mustHave")]
    pub must_have: bool,
}

/// Non-negotiable job constraints evaluated before any competency scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardFilters {
    #[serde(default, alias = "min_total_exp_years")]
    pub min_total_experience_years: Option<f64>,
    #[serde(default, alias = "work_auth")]
    pub allowed_work_auth: Option<Vec<String>>,
    #[serde(default, alias = "locations")]
    pub allowed_locations: Option<Vec<String>>,
}

/// Job posting with its competency model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(alias = "job_id")]
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub competencies: Vec<Competency>,
    #[serde(default, alias = "hardFilters")]
    pub hard_filters: Option<HardFilters>,
}

impl Job {
    /// First competency whose name matches; duplicates resolve to list order.
    pub fn competency(&self, name: &str) -> Option<&Competency> {
        self.competencies
            .iter()
            .find(|competency| names_match(&competency.name, name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Basic => "basic",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl Seniority {
    pub fn label(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
        }
    }
}

/// Self-reported skill on a candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: Option<SkillLevel>,
    #[serde(default, alias = "last_used")]
    pub last_used_year: Option<i32>,
    #[serde(default, alias = "years")]
    pub years_of_experience: Option<f64>,
}

impl Skill {
    /// Last-used year, with zero read as "not provided".
    pub(crate) fn declared_last_used(&self) -> Option<i32> {
        self.last_used_year.filter(|year| *year != 0)
    }

    /// Years of experience, with zero and NaN read as "not provided".
    pub(crate) fn declared_years(&self) -> Option<f64> {
        self.years_of_experience
            .filter(|years| *years != 0.0 && !years.is_nan())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(alias = "candidate_id")]
    pub id: CandidateId,
    #[serde(alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_auth: Option<String>,
    #[serde(default)]
    pub current_title: Option<String>,
    #[serde(default)]
    pub total_experience_years: Option<f64>,
    #[serde(default)]
    pub seniority: Option<Seniority>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Candidate {
    /// First skill whose name matches the competency name.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        let key = normalize_name(name);
        self.skills
            .iter()
            .find(|skill| normalize_name(&skill.name) == key)
    }

    pub(crate) fn declared_location(&self) -> Option<&str> {
        declared(self.location.as_deref())
    }

    pub(crate) fn declared_work_auth(&self) -> Option<&str> {
        declared(self.work_auth.as_deref())
    }
}

fn declared(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    Coding,
    Cognitive,
    Language,
    Domain,
}

impl AssessmentType {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentType::Coding => "coding",
            AssessmentType::Cognitive => "cognitive",
            AssessmentType::Language => "language",
            AssessmentType::Domain => "domain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscore {
    pub name: String,
    pub score: f64,
}

/// Links an assessment's headline score to a named competency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyMapping {
    pub competency: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// External assessment result (0..100) attached to one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub candidate_id: CandidateId,
    #[serde(rename = "type")]
    pub kind: AssessmentType,
    pub score: f64,
    #[serde(default)]
    pub subscores: Vec<Subscore>,
    #[serde(default)]
    pub competency_map: Vec<CompetencyMapping>,
}

/// Immutable inputs for one scoring invocation.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub job: &'a Job,
    pub candidate: &'a Candidate,
    pub assessments: &'a [Assessment],
    pub calibration_version: Option<&'a str>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(job: &'a Job, candidate: &'a Candidate, assessments: &'a [Assessment]) -> Self {
        Self {
            job,
            candidate,
            assessments,
            calibration_version: None,
        }
    }

    pub fn with_calibration_version(mut self, version: &'a str) -> Self {
        self.calibration_version = Some(version);
        self
    }
}

/// Score and provenance for a single job competency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyScore {
    pub name: String,
    pub score: f64,
    pub evidence: Vec<String>,
}

/// Result of scoring one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSnapshot {
    /// Assigned by the storage collaborator.
    pub snapshot_id: Option<String>,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub overall: f64,
    pub by_competency: Vec<CompetencyScore>,
    pub red_flags: Vec<String>,
    pub explain_atoms: Vec<String>,
    pub calibration_version: String,
    pub created_at: DateTime<Utc>,
}
