mod commands;
mod error;
mod paths;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

/// Student registration form checker.
///
/// Validates single values, submits snapshot files to the local store, and
/// inspects drafts and past submissions.
#[derive(Parser, Debug)]
#[command(name = "regform", version, about)]
struct Cli {
    /// Store database (defaults to the platform data directory).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Prefix for every store key, so several forms can share one database.
    #[arg(long, global = true)]
    key_prefix: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: commands::Command,
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no cache directory available, logging disabled");
        return;
    };
    if let Some(Err(e)) = path.parent().map(fs::create_dir_all) {
        eprintln!("Warning: cannot create log directory for {}: {}", path.display(), e);
        return;
    }

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot write log file {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("Warning: cannot start logger: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::run(cli.command, cli.db, cli.key_prefix).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
