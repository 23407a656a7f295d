use crate::api::client::{ApiClient, RecordsApi};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `login` command: probe the server with the given credentials
/// and persist them on success.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login {
        url,
        token,
        no_verify,
    } = cmd
    {
        if !no_verify {
            let client = ApiClient::with_credentials(url, token)?;
            client.probe().await?;
        }

        let mut cfg = cfg.clone();
        cfg.set_connection(url, token);
        cfg.save()?;

        success(format!("Logged in to {}", cfg.server_url));
    }
    Ok(())
}

/// Handle the `logout` command: drop the token and every piece of session
/// state, including the zombie-alert cursor.
pub fn handle_logout(cfg: &Config) -> AppResult<()> {
    let mut cfg = cfg.clone();
    cfg.api_token = String::new();
    cfg.save()?;
    cfg.state().clear()?;

    info("Logged out.");
    Ok(())
}
