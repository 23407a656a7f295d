use crate::cli::commands::{find_record_or_fail, record_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Handle the `del` command: hide the record server-side.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { key, force } = cmd {
        let store = record_store(cfg)?;
        let record = find_record_or_fail(&store, key).await?;

        if !force {
            let prompt = format!("Delete record \"{}\"?", record.description);
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        if !store.delete_record(&record).await {
            return Err(AppError::Operation("Delete failed".to_string()));
        }

        success(format!("Record {} deleted", key));
    }
    Ok(())
}
