use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    names_match, normalize_name, Assessment, Candidate, CandidateId, FitSnapshot,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortlistSort {
    #[default]
    Overall,
    Name,
    Experience,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortlistOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters and ordering applied to already-scored candidates of one job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortlistQuery {
    #[serde(default)]
    pub min_fit: Option<f64>,
    #[serde(default)]
    pub min_experience: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_auth: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub min_assessment_score: Option<f64>,
    #[serde(default)]
    pub sort: ShortlistSort,
    #[serde(default)]
    pub order: ShortlistOrder,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A scored candidate surviving the shortlist filters.
#[derive(Debug, Clone, Copy)]
pub struct ShortlistEntry<'a> {
    pub candidate: &'a Candidate,
    pub snapshot: &'a FitSnapshot,
}

impl ShortlistQuery {
    /// Filter and sort snapshots; candidates are joined on `snapshot.candidate_id`.
    ///
    /// Snapshots whose candidate is not in `candidates` are dropped. Sorting is stable.
    pub fn apply<'a>(
        &self,
        snapshots: &'a [FitSnapshot],
        candidates: &'a [Candidate],
        assessments_by_candidate: &HashMap<CandidateId, Vec<Assessment>>,
    ) -> Vec<ShortlistEntry<'a>> {
        let by_id: HashMap<&CandidateId, &Candidate> = candidates
            .iter()
            .map(|candidate| (&candidate.id, candidate))
            .collect();

        let mut entries: Vec<ShortlistEntry<'a>> = snapshots
            .iter()
            .filter_map(|snapshot| {
                by_id
                    .get(&snapshot.candidate_id)
                    .copied()
                    .map(|candidate| ShortlistEntry {
                        candidate,
                        snapshot,
                    })
            })
            .filter(|entry| self.matches(entry, assessments_by_candidate))
            .collect();

        entries.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            match self.order {
                ShortlistOrder::Asc => ordering,
                ShortlistOrder::Desc => ordering.reverse(),
            }
        });

        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }
        entries
    }

    fn matches(
        &self,
        entry: &ShortlistEntry<'_>,
        assessments_by_candidate: &HashMap<CandidateId, Vec<Assessment>>,
    ) -> bool {
        let candidate = entry.candidate;

        if let Some(min_fit) = self.min_fit {
            if entry.snapshot.overall < min_fit {
                return false;
            }
        }

        if let Some(min_experience) = self.min_experience {
            if !candidate
                .total_experience_years
                .map(|years| years >= min_experience)
                .unwrap_or(false)
            {
                return false;
            }
        }

        if let Some(location) = self.location.as_deref() {
            let needle = normalize_name(location);
            if !candidate
                .declared_location()
                .map(|declared| normalize_name(declared).contains(&needle))
                .unwrap_or(false)
            {
                return false;
            }
        }

        if let Some(work_auth) = self.work_auth.as_deref() {
            if !candidate
                .declared_work_auth()
                .map(|declared| names_match(declared, work_auth))
                .unwrap_or(false)
            {
                return false;
            }
        }

        if !self.skills.is_empty()
            && !self
                .skills
                .iter()
                .any(|skill| candidate.skill(skill).is_some())
        {
            return false;
        }

        if let Some(min_score) = self.min_assessment_score {
            let best = assessments_by_candidate
                .get(&candidate.id)
                .and_then(|assessments| {
                    assessments
                        .iter()
                        .map(|assessment| assessment.score)
                        .max_by(f64::total_cmp)
                });
            if !best.map(|score| score >= min_score).unwrap_or(false) {
                return false;
            }
        }

        true
    }

    fn compare(&self, a: &ShortlistEntry<'_>, b: &ShortlistEntry<'_>) -> Ordering {
        match self.sort {
            ShortlistSort::Overall => a.snapshot.overall.total_cmp(&b.snapshot.overall),
            ShortlistSort::Name => a.candidate.name.cmp(&b.candidate.name),
            ShortlistSort::Experience => a
                .candidate
                .total_experience_years
                .unwrap_or(0.0)
                .total_cmp(&b.candidate.total_experience_years.unwrap_or(0.0)),
        }
    }
}
