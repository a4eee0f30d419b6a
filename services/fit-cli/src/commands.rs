use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

use candidate_fit::config::AppConfig;
use candidate_fit::error::AppError;
use candidate_fit::records::{group_assessments, load_document, load_records};
use candidate_fit::{
    Assessment, Candidate, CandidateId, ExclusionReason, FitScoringEngine, Job, ScoringContext,
    ScoringOverrides, ShortlistQuery,
};
use clap::Args;
use tracing::info;

use crate::output::{write_atoms, write_csv, write_json, OutputFormat, ScoreReport};

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// Job record (JSON)
    #[arg(long)]
    pub(crate) job: PathBuf,
    /// Candidate pool (JSON array or JSON Lines)
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Assessment results (JSON array or JSON Lines)
    #[arg(long)]
    pub(crate) assessments: Option<PathBuf>,
    /// Calibration label recorded on every snapshot
    #[arg(long)]
    pub(crate) calibration_version: Option<String>,
    /// Year used for skill recency
    #[arg(long)]
    pub(crate) current_year: Option<i32>,
    /// Overall score ceiling when a must-have competency is missing, within [0, 1]
    #[arg(long, value_parser = parse_cap)]
    pub(crate) must_have_cap: Option<f64>,
    /// Exclude candidates missing a must-have instead of capping their score
    #[arg(long)]
    pub(crate) exclude_on_missing_must_have: bool,
    /// Score candidates that fail hard filters instead of excluding them
    #[arg(long)]
    pub(crate) keep_hard_filter_failures: bool,
}

impl InputArgs {
    fn overrides(&self, base: &ScoringOverrides) -> ScoringOverrides {
        ScoringOverrides {
            current_year: self.current_year.or(base.current_year),
            must_have_cap_score: self.must_have_cap.or(base.must_have_cap_score),
            exclude_on_missing_must_have: self
                .exclude_on_missing_must_have
                .then_some(true)
                .or(base.exclude_on_missing_must_have),
            exclude_on_hard_filter_fail: self
                .keep_hard_filter_failures
                .then_some(false)
                .or(base.exclude_on_hard_filter_fail),
        }
    }

    fn engine(&self, config: &AppConfig) -> FitScoringEngine {
        let overrides = self.overrides(&config.scoring.overrides);
        let scoring = config.scoring.scoring_config().with_overrides(&overrides);
        let version = self
            .calibration_version
            .clone()
            .unwrap_or_else(|| config.scoring.calibration_version.clone());
        FitScoringEngine::new(scoring).with_calibration_version(version)
    }

    fn load(&self) -> Result<LoadedInputs, AppError> {
        let job: Job = load_document(&self.job)?;
        let candidates: Vec<Candidate> = load_records(&self.candidates)?;
        let assessments: Vec<Assessment> = match &self.assessments {
            Some(path) => load_records(path)?,
            None => Vec::new(),
        };

        info!(
            job_id = %job.id,
            candidates = candidates.len(),
            assessments = assessments.len(),
            "loaded scoring inputs"
        );

        Ok(LoadedInputs {
            job,
            candidates,
            assessments: group_assessments(assessments),
        })
    }
}

fn parse_cap(raw: &str) -> Result<f64, String> {
    let cap: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&cap) {
        Ok(cap)
    } else {
        Err(format!("must be within [0, 1], got {cap}"))
    }
}

struct LoadedInputs {
    job: Job,
    candidates: Vec<Candidate>,
    assessments: HashMap<CandidateId, Vec<Assessment>>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub(crate) format: OutputFormat,
    /// Only report candidates at or above this overall fit
    #[arg(long)]
    pub(crate) min_fit: Option<f64>,
    /// Maximum number of snapshots to report
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Candidate identifier to explain
    #[arg(long)]
    pub(crate) candidate: String,
}

pub(crate) fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let engine = args.input.engine(config);
    let inputs = args.input.load()?;

    let outcome = engine.score_batch(&inputs.job, &inputs.candidates, &inputs.assessments);
    let query = ShortlistQuery {
        min_fit: args.min_fit,
        limit: args.limit,
        ..ShortlistQuery::default()
    };
    let snapshots = query
        .apply(&outcome.snapshots, &inputs.candidates, &inputs.assessments)
        .into_iter()
        .map(|entry| entry.snapshot)
        .collect();

    let report = ScoreReport {
        job_id: &inputs.job.id,
        total: outcome.total,
        scored: outcome.scored(),
        excluded: &outcome.excluded,
        snapshots,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        OutputFormat::Json => write_json(&mut handle, &report)?,
        OutputFormat::Csv => write_csv(&mut handle, &report.snapshots)?,
    }
    handle.flush()?;
    Ok(())
}

pub(crate) fn run_explain(config: &AppConfig, args: ExplainArgs) -> Result<(), AppError> {
    let engine = args.input.engine(config);
    let inputs = args.input.load()?;

    let candidate = inputs
        .candidates
        .iter()
        .find(|candidate| candidate.id.0 == args.candidate)
        .ok_or_else(|| AppError::UnknownCandidate(args.candidate.clone()))?;
    let assessments = inputs
        .assessments
        .get(&candidate.id)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match engine.evaluate(&ScoringContext::new(&inputs.job, candidate, assessments)) {
        Ok(snapshot) => write_atoms(&mut handle, &snapshot)?,
        Err(ExclusionReason::HardFilter) => {
            writeln!(handle, "{} excluded: failed hard filters", candidate.id)?
        }
        Err(ExclusionReason::MissingMustHave) => {
            writeln!(handle, "{} excluded: missing must-have competency", candidate.id)?
        }
    }
    handle.flush()?;
    Ok(())
}
