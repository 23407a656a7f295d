use crate::cli::commands::{list::resolve_window, record_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projection::RecordsView;
use crate::errors::AppResult;

/// Handle the `tags` command: ranked tag suggestions for the window.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tags { limit, period } = cmd {
        let (start, end) = resolve_window(period, false, false, cfg)?;

        let store = record_store(cfg)?;
        let mut view = RecordsView::new(start, end);
        view.refresh(&store).await;

        let top = view.top_tags(*limit);
        if top.is_empty() {
            println!("No tags found in this window.");
        } else {
            for tag in top {
                println!("{}", tag);
            }
        }
    }
    Ok(())
}
