//! Decoding of job, candidate and assessment records handed to batch drivers.
//!
//! Accepts either a JSON document or JSON Lines; the format is picked from the first
//! non-whitespace character. Record validation beyond decoding stays upstream.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::scoring::{Assessment, CandidateId};

#[derive(Debug, thiserror::Error)]
pub enum RecordLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {} line {line}: {source}", .path.display())]
    DecodeLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a single JSON document.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, RecordLoadError> {
    let raw = read(path)?;
    serde_json::from_str(&raw).map_err(|source| RecordLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a list of records from a JSON array or a JSON Lines file.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RecordLoadError> {
    let raw = read(path)?;
    parse_records(path, &raw)
}

pub(crate) fn parse_records<T: DeserializeOwned>(
    path: &Path,
    raw: &str,
) -> Result<Vec<T>, RecordLoadError> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).map_err(|source| RecordLoadError::Decode {
            path: path.to_path_buf(),
            source,
        });
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| RecordLoadError::DecodeLine {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Group assessments by candidate, preserving their order within each candidate.
pub fn group_assessments(assessments: Vec<Assessment>) -> HashMap<CandidateId, Vec<Assessment>> {
    let mut grouped: HashMap<CandidateId, Vec<Assessment>> = HashMap::new();
    for assessment in assessments {
        grouped
            .entry(assessment.candidate_id.clone())
            .or_default()
            .push(assessment);
    }
    grouped
}

fn read(path: &Path) -> Result<String, RecordLoadError> {
    fs::read_to_string(path).map_err(|source| RecordLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Candidate, SkillLevel};

    #[test]
    fn parses_json_arrays_and_json_lines() {
        let path = Path::new("candidates");
        let array = r#"[{"candidate_id": "c-1", "full_name": "Ana Ruiz", "skills": []}]"#;
        let lines = concat!(
            "{\"id\": \"c-1\", \"name\": \"Ana Ruiz\"}\n",
            "\n",
            "{\"id\": \"c-2\", \"name\": \"Ben Ortiz\", \"skills\": [{\"name\": \"React\", \"level\": \"advanced\", \"last_used\": 2024, \"years\": 3}]}\n",
        );

        let from_array: Vec<Candidate> = parse_records(path, array).expect("array decodes");
        let from_lines: Vec<Candidate> = parse_records(path, lines).expect("lines decode");

        assert_eq!(from_array.len(), 1);
        assert_eq!(from_array[0].id, CandidateId("c-1".to_string()));
        assert_eq!(from_lines.len(), 2);
        let skill = &from_lines[1].skills[0];
        assert_eq!(skill.level, Some(SkillLevel::Advanced));
        assert_eq!(skill.last_used_year, Some(2024));
        assert_eq!(skill.years_of_experience, Some(3.0));
    }

    #[test]
    fn reports_the_failing_line() {
        let lines = "{\"id\": \"c-1\", \"name\": \"Ana\"}\n{not json}\n";
        match parse_records::<Candidate>(Path::new("pool.jsonl"), lines) {
            Err(RecordLoadError::DecodeLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected line decode error, got {other:?}"),
        }
    }

    #[test]
    fn groups_assessments_per_candidate() {
        let raw = concat!(
            "{\"candidate_id\": \"c-1\", \"type\": \"coding\", \"score\": 80}\n",
            "{\"candidate_id\": \"c-2\", \"type\": \"language\", \"score\": 65}\n",
            "{\"candidate_id\": \"c-1\", \"type\": \"domain\", \"score\": 70}\n",
        );
        let assessments: Vec<Assessment> =
            parse_records(Path::new("assessments.jsonl"), raw).expect("assessments decode");

        let grouped = group_assessments(assessments);

        let first = &grouped[&CandidateId("c-1".to_string())];
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].score, 80.0);
        assert_eq!(first[1].score, 70.0);
        assert_eq!(grouped[&CandidateId("c-2".to_string())].len(), 1);
    }
}
