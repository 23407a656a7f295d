//! rtagger library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cfg),
        Commands::Login { .. } => cli::commands::login::handle(&cli.command, cfg).await,
        Commands::Logout => cli::commands::login::handle_logout(cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, cfg).await,
        Commands::Stop { .. } => cli::commands::stop::handle(&cli.command, cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg).await,
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, cfg).await,
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg).await,
        Commands::Tags { .. } => cli::commands::tags::handle(&cli.command, cfg).await,
        Commands::Check => cli::commands::check::handle(cfg).await,
        Commands::Watch { .. } => cli::commands::watch::handle(&cli.command, cfg).await,
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    // 1. parse CLI
    let cli = Cli::parse();

    // 2. resolve the config directory (global --config-dir wins)
    let dir = Config::resolve_dir(cli.config_dir.as_deref());

    // 3. load config once and hand everything to the dispatcher
    let cfg = Config::load_from(&dir)?;
    dispatch(&cli, &cfg).await
}
