use crate::cli::commands::record_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projection::{RecordsUiState, RecordsView};
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::ui::messages;
use crate::utils::table::Table;
use crate::utils::time::{self, now_epoch};
use crate::utils::tags;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        today,
        month,
        search,
        keys,
    } = cmd
    {
        let (start, end) = resolve_window(period, *today, *month, cfg)?;

        let store = record_store(cfg)?;
        let mut view = RecordsView::new(start, end);
        view.refresh(&store).await;

        if let Some(query) = search {
            view.set_query(query);
        }

        match view.state() {
            RecordsUiState::Success(records) => {
                if records.is_empty() {
                    println!("No records in this window.");
                } else {
                    print_records(records, *keys);
                }
            }
            RecordsUiState::Error(message) => {
                return Err(AppError::Operation(message.clone()));
            }
            // refresh always settles the view
            RecordsUiState::Loading => {}
        }
    }
    Ok(())
}

/// Resolve the active window: explicit period > preset flags > configured
/// lookback.
pub(crate) fn resolve_window(
    period: &Option<String>,
    today: bool,
    month: bool,
    cfg: &Config,
) -> AppResult<(i64, i64)> {
    if let Some(p) = period {
        return time::parse_period(p);
    }
    if today {
        return Ok(time::today_window());
    }
    if month {
        return Ok(time::month_window());
    }
    Ok(time::last_days_window(cfg.lookback_days))
}

fn print_records(records: &[Record], with_keys: bool) {
    let now = now_epoch();

    let headers: &[&str] = if with_keys {
        &["DATE", "TIME", "DURATION", "KEY", "DESCRIPTION"]
    } else {
        &["DATE", "TIME", "DURATION", "DESCRIPTION"]
    };
    let mut table = Table::new(headers);

    for record in records {
        let time_range = if record.is_running() {
            format!("{}–…", time::clock(record.start_time))
        } else {
            format!(
                "{}–{}",
                time::clock(record.start_time),
                time::clock(record.end_time)
            )
        };

        // Keep this column free of ANSI codes so the table stays aligned.
        let duration = if record.is_running() {
            format!("{} ▶", time::duration_string(record.start_time, now))
        } else {
            time::duration_string(record.start_time, record.end_time)
        };

        let description = tags::colorize_tags(
            &record.description,
            messages::FG_CYAN,
            messages::RESET,
        );

        let mut row = vec![time::date_label(record.start_time), time_range, duration];
        if with_keys {
            row.push(record.key.clone());
        }
        row.push(description);
        table.add_row(row);
    }

    print!("{}", table.render());
}
