use std::process::ExitCode;

use clap::Subcommand;
use regform::{FormConfig, FormSnapshot, Store};

use crate::error::CliError;

#[derive(Subcommand, Debug)]
pub enum DraftCommand {
    /// Print the saved draft.
    Show,
    /// Delete the saved draft.
    Clear,
}

pub async fn run(cmd: DraftCommand, store: Store, config: &FormConfig) -> Result<ExitCode, CliError> {
    match cmd {
        DraftCommand::Show => match store.get::<FormSnapshot>(&config.draft_key).await? {
            Some(draft) => println!("{}", draft.to_pretty_json()),
            None => println!("No draft saved."),
        },
        DraftCommand::Clear => {
            store.delete(&config.draft_key).await?;
            log::info!("Draft {} cleared", config.draft_key);
            println!("Draft cleared.");
        }
    }
    Ok(ExitCode::SUCCESS)
}
