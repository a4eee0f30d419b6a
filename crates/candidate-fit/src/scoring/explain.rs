use super::domain::{Candidate, CompetencyScore};

/// Marker prepended to every red-flag atom.
pub const WARNING_MARKER: &str = "⚠️";

const STRENGTH_THRESHOLD: f64 = 0.5;
const WEAKNESS_THRESHOLD: f64 = 0.3;
const MAX_STRENGTHS: usize = 3;

/// Qualitative band for an overall fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl FitBand {
    pub fn classify(overall: f64) -> Self {
        if overall >= 0.8 {
            FitBand::Excellent
        } else if overall >= 0.6 {
            FitBand::Good
        } else if overall >= 0.4 {
            FitBand::Moderate
        } else {
            FitBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::Excellent => "excellent",
            FitBand::Good => "good",
            FitBand::Moderate => "moderate",
            FitBand::Low => "low",
        }
    }
}

/// Build the rationale atoms from already-computed values.
///
/// Order: fit band, strengths, development areas, experience, seniority, red flags.
pub(crate) fn explain(
    candidate: &Candidate,
    by_competency: &[CompetencyScore],
    red_flags: &[String],
    overall: f64,
) -> Vec<String> {
    let mut atoms = Vec::new();

    atoms.push(format!(
        "Overall fit: {} ({:.0}%)",
        FitBand::classify(overall).label(),
        (overall * 100.0).round()
    ));

    let mut ranked: Vec<&CompetencyScore> = by_competency.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    let strengths: Vec<&str> = ranked
        .into_iter()
        .take(MAX_STRENGTHS)
        .filter(|score| score.score > STRENGTH_THRESHOLD)
        .map(|score| score.name.as_str())
        .collect();
    if !strengths.is_empty() {
        atoms.push(format!("Strong in: {}", strengths.join(", ")));
    }

    let weaknesses: Vec<&str> = by_competency
        .iter()
        .filter(|score| score.score > 0.0 && score.score < WEAKNESS_THRESHOLD)
        .map(|score| score.name.as_str())
        .collect();
    if !weaknesses.is_empty() {
        atoms.push(format!("Needs development: {}", weaknesses.join(", ")));
    }

    if let Some(years) = candidate.total_experience_years {
        atoms.push(format!("{years} years total experience"));
    }

    if let Some(seniority) = candidate.seniority {
        atoms.push(format!("Seniority: {}", seniority.label()));
    }

    atoms.extend(
        red_flags
            .iter()
            .map(|flag| format!("{WARNING_MARKER} {flag}")),
    );

    atoms
}
