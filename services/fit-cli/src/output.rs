use std::io::{self, Write};

use candidate_fit::{CandidateId, FitSnapshot, JobId};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport<'a> {
    pub(crate) job_id: &'a JobId,
    pub(crate) total: usize,
    pub(crate) scored: usize,
    pub(crate) excluded: &'a [CandidateId],
    pub(crate) snapshots: Vec<&'a FitSnapshot>,
}

#[derive(Debug, Serialize)]
struct SnapshotRow<'a> {
    candidate_id: &'a str,
    overall: String,
    red_flags: String,
    explain: String,
}

pub(crate) fn write_json<W: Write>(writer: &mut W, report: &ScoreReport<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}

pub(crate) fn write_csv<W: Write>(writer: &mut W, snapshots: &[&FitSnapshot]) -> io::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for snapshot in snapshots {
        csv.serialize(SnapshotRow {
            candidate_id: &snapshot.candidate_id.0,
            overall: format!("{:.4}", snapshot.overall),
            red_flags: snapshot.red_flags.join("; "),
            explain: snapshot.explain_atoms.join(" | "),
        })
        .map_err(io::Error::from)?;
    }
    csv.flush()
}

pub(crate) fn write_atoms<W: Write>(writer: &mut W, snapshot: &FitSnapshot) -> io::Result<()> {
    writeln!(
        writer,
        "{} ({}): {:.1}%",
        snapshot.candidate_id,
        snapshot.calibration_version,
        snapshot.overall * 100.0
    )?;
    for atom in &snapshot.explain_atoms {
        writeln!(writer, "  - {atom}")?;
    }
    for score in &snapshot.by_competency {
        writeln!(
            writer,
            "  {}: {:.2} [{}]",
            score.name,
            score.score,
            score.evidence.join(", ")
        )?;
    }
    Ok(())
}
