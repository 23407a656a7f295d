//! Time utilities: epoch windows, period parsing, duration formatting.
//!
//! All windows are inclusive `(start, end)` pairs in Unix seconds, computed
//! against the local timezone.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Current time in whole Unix seconds.
pub fn now_epoch() -> i64 {
    Local::now().timestamp()
}

fn start_of_day(date: NaiveDate) -> i64 {
    let dt = date.and_hms_opt(0, 0, 0).unwrap();
    // A DST gap at midnight leaves no 00:00; fall back to the naive UTC read.
    dt.and_local_timezone(Local)
        .earliest()
        .map(|t| t.timestamp())
        .unwrap_or_else(|| dt.and_utc().timestamp())
}

/// Window covering a single local day: start of day to one second before
/// the next day starts.
pub fn day_window(date: NaiveDate) -> (i64, i64) {
    let start = start_of_day(date);
    let end = start_of_day(date.succ_opt().unwrap_or(date)) - 1;
    (start, end)
}

pub fn today_window() -> (i64, i64) {
    day_window(Local::now().date_naive())
}

/// Window covering the last `days` local days, today included.
pub fn last_days_window(days: i64) -> (i64, i64) {
    let today = Local::now().date_naive();
    let first = today - chrono::Duration::days(days.max(1) - 1);
    (day_window(first).0, day_window(today).1)
}

/// Window covering the current local month.
pub fn month_window() -> (i64, i64) {
    let today = Local::now().date_naive();
    let first = today.with_day(1).unwrap();
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    };
    (start_of_day(first), start_of_day(next_month) - 1)
}

fn window_from_single(p: &str) -> Option<(i64, i64)> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Some(day_window(d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        let next = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
        };
        return Some((start_of_day(first), start_of_day(next) - 1));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let next = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
        return Some((start_of_day(first), start_of_day(next) - 1));
    }

    None
}

/// Parse a period expression into an inclusive epoch window.
///
/// Supported: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, ranges `start:end` in the
/// same formats, and `all` for the whole archive up to now.
pub fn parse_period(p: &str) -> AppResult<(i64, i64)> {
    if p == "all" {
        return Ok((0, now_epoch()));
    }

    if let Some((a, b)) = p.split_once(':') {
        let start = window_from_single(a).ok_or_else(|| AppError::InvalidPeriod(p.to_string()))?;
        let end = window_from_single(b).ok_or_else(|| AppError::InvalidPeriod(p.to_string()))?;
        if end.1 < start.0 {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }
        return Ok((start.0, end.1));
    }

    window_from_single(p).ok_or_else(|| AppError::InvalidPeriod(p.to_string()))
}

/// Parse a local datetime "YYYY-MM-DD HH:MM" into Unix seconds.
pub fn parse_local_datetime(s: &str) -> AppResult<i64> {
    let dt = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::InvalidTime(s.to_string()))?;
    dt.and_local_timezone(Local)
        .earliest()
        .map(|t| t.timestamp())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// Epoch seconds → "09:00" in local time.
pub fn clock(epoch: i64) -> String {
    match Local.timestamp_opt(epoch, 0) {
        chrono::LocalResult::Single(t) => t.format("%H:%M").to_string(),
        _ => "--:--".to_string(),
    }
}

/// Epoch seconds → "Mon, Nov 25" in local time.
pub fn date_label(epoch: i64) -> String {
    match Local.timestamp_opt(epoch, 0) {
        chrono::LocalResult::Single(t) => t.format("%a, %b %-d").to_string(),
        _ => "?".to_string(),
    }
}

/// Pretty duration between two epochs: "1h 30m", "45m". Negative spans
/// collapse to "0m".
pub fn duration_string(start: i64, end: i64) -> String {
    let secs = end - start;
    if secs < 0 {
        return "0m".to_string();
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
