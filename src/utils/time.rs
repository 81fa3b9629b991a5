use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Asia/Shanghai has no DST, a fixed +08:00 offset is exact
const SHANGHAI_OFFSET_SECONDS: i32 = 8 * 3600;

/// Format unix seconds as `HH:MM` in Shanghai time.
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_shanghai_time(timestamp_seconds: i64) -> Option<String> {
    let offset = FixedOffset::east_opt(SHANGHAI_OFFSET_SECONDS)?;
    let time = DateTime::<Utc>::from_timestamp(timestamp_seconds, 0)?;
    Some(time.with_timezone(&offset).format("%H:%M").to_string())
}

/// Suggested next refresh, `now` plus the refresh interval and offset
pub fn next_refresh(now: DateTime<Utc>, update_full_minutes: i64, offset_minutes: i64) -> DateTime<Utc> {
    now + Duration::minutes(update_full_minutes + offset_minutes)
}
