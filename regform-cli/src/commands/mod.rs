mod check;
mod draft;
mod entries;
mod last;
mod submit;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Subcommand;
use regform::store::SqliteBackend;
use regform::validation::{format_phone_number, parse_date};
use regform::{FixedClock, FormConfig, RegistrationForm, Store, SystemClock};

use crate::error::CliError;
use crate::paths;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the form's fields.
    Fields,
    /// Validate one value against a field's rule.
    Check(check::CheckArgs),
    /// Print a phone number in canonical form.
    FormatPhone {
        /// Digits as typed, punctuation allowed.
        value: String,
    },
    /// Validate a snapshot file and, if it passes, record it as a submission.
    Submit(submit::SubmitArgs),
    /// Inspect or discard the autosaved draft.
    #[command(subcommand)]
    Draft(draft::DraftCommand),
    /// Print the last recorded submission.
    Last,
    /// List the keys stored under the current key prefix.
    Entries,
}

pub async fn run(
    command: Command,
    db: Option<PathBuf>,
    key_prefix: Option<String>,
) -> Result<ExitCode, CliError> {
    let config = form_config(key_prefix.as_deref());
    match command {
        Command::Fields => {
            check::list_fields();
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => check::run(args),
        Command::FormatPhone { value } => {
            println!("{}", format_phone_number(&value));
            Ok(ExitCode::SUCCESS)
        }
        Command::Submit(args) => submit::run(args, open_store(db).await?, config).await,
        Command::Draft(cmd) => draft::run(cmd, open_store(db).await?, &config).await,
        Command::Last => last::run(open_store(db).await?, &config).await,
        Command::Entries => {
            let prefix = key_prefix.unwrap_or_default();
            entries::run(open_store(db).await?, &prefix).await
        }
    }
}

/// Open the SQLite store at `db`, or at the platform default.
async fn open_store(db: Option<PathBuf>) -> Result<Store, CliError> {
    let path = match db {
        Some(path) => path,
        None => paths::store_db().ok_or(CliError::NoDataDir)?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Opening store at {}", path.display());
    Ok(Store::new(SqliteBackend::new(&path).await?))
}

/// Store keys for one form; the CLI never autosaves.
fn form_config(key_prefix: Option<&str>) -> FormConfig {
    let config = FormConfig::new().without_autosave();
    match key_prefix {
        Some(prefix) => config.key_prefix(prefix),
        None => config,
    }
}

/// Form judging dates against `today` when given.
fn build_form(
    store: Store,
    config: FormConfig,
    today: Option<&str>,
) -> Result<RegistrationForm, CliError> {
    let form = RegistrationForm::new(store).with_config(config);
    Ok(match today {
        Some(raw) => form.with_clock(FixedClock(parse_today(raw)?)),
        None => form.with_clock(SystemClock),
    })
}

fn parse_today(raw: &str) -> Result<NaiveDate, CliError> {
    parse_date(raw).ok_or_else(|| CliError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_today() {
        assert_eq!(parse_today("2024-01-15").ok(), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert!(matches!(parse_today("15/01/2024"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_form_config_prefixes_every_key() {
        let config = form_config(Some("spring:"));
        assert!(!config.autosave);
        assert_eq!(config.submission_key, "spring:registrationData");
        assert_eq!(config.timestamp_key, "spring:submissionTimestamp");
        assert_eq!(config.draft_key, "spring:formDraft");

        assert_eq!(form_config(None).draft_key, "formDraft");
    }
}
