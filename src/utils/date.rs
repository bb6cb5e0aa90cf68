// Time expression parsing for consultation completion

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone};
use anyhow::Result;

/// Parse a time expression relative to `now` and return a Unix timestamp.
///
/// Accepted forms:
/// - `now`
/// - `HH:MM` (today, local time)
/// - `YYYY-MM-DDTHH:MM` (local time)
pub fn parse_time_expr_at(expr: &str, now: DateTime<Local>) -> Result<i64> {
    let expr = expr.trim();

    if expr == "now" {
        return Ok(now.timestamp());
    }

    if let Ok(time) = NaiveTime::parse_from_str(expr, "%H:%M") {
        let datetime = now.date_naive().and_time(time);
        return local_timestamp(&datetime);
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(expr, "%Y-%m-%dT%H:%M") {
        return local_timestamp(&datetime);
    }

    anyhow::bail!("Invalid time: '{}'. Use HH:MM, YYYY-MM-DDTHH:MM or 'now'.", expr)
}

/// Parse a time expression relative to the current local time
pub fn parse_time_expr(expr: &str) -> Result<i64> {
    parse_time_expr_at(expr, Local::now())
}

fn local_timestamp(datetime: &NaiveDateTime) -> Result<i64> {
    let local_dt = Local.from_local_datetime(datetime)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Ambiguous or skipped local time: {}", datetime))?;
    Ok(local_dt.timestamp())
}
