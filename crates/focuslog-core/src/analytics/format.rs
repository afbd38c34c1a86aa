//! Display formatting for timers and durations.

/// `M:SS`, e.g. `65 -> "1:05"`. Minutes are not capped at 59.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `Xm`, `Xh` or `Xh Ym`.
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    match minutes % 60 {
        0 => format!("{hours}h"),
        mins => format!("{hours}h {mins}m"),
    }
}
