use crate::commands::{run_explain, run_score, ExplainArgs, ScoreArgs};
use candidate_fit::config::AppConfig;
use candidate_fit::error::AppError;
use candidate_fit::telemetry;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fit-cli",
    about = "Score candidate pools against a job's competency model",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every candidate in a pool and print the resulting snapshots
    Score(ScoreArgs),
    /// Print the rationale for a single candidate
    Explain(ExplainArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(&config, args),
        Command::Explain(args) => run_explain(&config, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn parses_score_flags() {
        let cli = Cli::try_parse_from([
            "fit-cli",
            "score",
            "--job",
            "job.json",
            "--candidates",
            "pool.jsonl",
            "--current-year",
            "2025",
            "--exclude-on-missing-must-have",
            "--keep-hard-filter-failures",
            "--format",
            "csv",
            "--min-fit",
            "0.5",
        ])
        .expect("score args parse");

        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.input.current_year, Some(2025));
                assert!(args.input.exclude_on_missing_must_have);
                assert!(args.input.keep_hard_filter_failures);
                assert_eq!(args.format, OutputFormat::Csv);
                assert_eq!(args.min_fit, Some(0.5));
                assert!(args.input.assessments.is_none());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn must_have_cap_outside_unit_range_is_rejected() {
        for cap in ["1.5", "-0.1", "NaN", "high"] {
            assert!(
                Cli::try_parse_from([
                    "fit-cli",
                    "score",
                    "--job",
                    "job.json",
                    "--candidates",
                    "pool.json",
                    "--must-have-cap",
                    cap,
                ])
                .is_err(),
                "cap {cap} should be rejected"
            );
        }

        let cli = Cli::try_parse_from([
            "fit-cli",
            "score",
            "--job",
            "job.json",
            "--candidates",
            "pool.json",
            "--must-have-cap",
            "0.25",
        ])
        .expect("in-range cap parses");
        match cli.command {
            Command::Score(args) => assert_eq!(args.input.must_have_cap, Some(0.25)),
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn explain_requires_candidate() {
        assert!(Cli::try_parse_from([
            "fit-cli",
            "explain",
            "--job",
            "job.json",
            "--candidates",
            "pool.json",
        ])
        .is_err());
    }
}
