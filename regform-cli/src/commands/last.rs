use std::process::ExitCode;

use regform::{FormConfig, FormSnapshot, Store};

use crate::error::CliError;

pub async fn run(store: Store, config: &FormConfig) -> Result<ExitCode, CliError> {
    let Some(snapshot) = store.get::<FormSnapshot>(&config.submission_key).await? else {
        println!("Nothing submitted yet.");
        return Ok(ExitCode::SUCCESS);
    };
    let submitted_at: Option<String> = store.get(&config.timestamp_key).await?;

    println!("Submitted at {}", submitted_at.as_deref().unwrap_or("unknown time"));
    println!("{}", snapshot.to_pretty_json());
    Ok(ExitCode::SUCCESS)
}
