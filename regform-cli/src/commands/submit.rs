use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use regform::{FormConfig, FormSnapshot, Store, SubmitOutcome};

use super::build_form;
use crate::error::CliError;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// JSON object mapping field ids to values.
    pub file: PathBuf,
    /// Judge dates as if today were this day (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<String>,
}

pub async fn run(
    args: SubmitArgs,
    store: Store,
    config: FormConfig,
) -> Result<ExitCode, CliError> {
    let raw = std::fs::read_to_string(&args.file)?;
    let snapshot: FormSnapshot =
        serde_json::from_str(&raw).map_err(|source| CliError::Snapshot {
            path: args.file.clone(),
            source,
        })?;

    let mut form = build_form(store, config, args.today.as_deref())?;
    form.load_snapshot(&snapshot);

    match form.submit().await {
        SubmitOutcome::Accepted {
            snapshot,
            submitted_at,
        } => {
            println!("Submitted at {}", submitted_at.to_rfc3339());
            println!("{}", snapshot.to_pretty_json());
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected { report, .. } => {
            eprintln!("Submission rejected:");
            for error in report.errors() {
                eprintln!("  {} ({}): {}", error.label, error.field_id, error.message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
