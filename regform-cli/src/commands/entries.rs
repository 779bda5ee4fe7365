use std::process::ExitCode;

use regform::Store;

use crate::error::CliError;

pub async fn run(store: Store, prefix: &str) -> Result<ExitCode, CliError> {
    let keys = store.keys_with_prefix(prefix).await?;
    if keys.is_empty() {
        println!("No entries.");
    }
    for key in keys {
        let size = store.get_raw(&key).await?.map_or(0, |json| json.len());
        println!("{:<40} {:>8} bytes", key, size);
    }
    Ok(ExitCode::SUCCESS)
}
