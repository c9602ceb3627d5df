//! Formatting utilities
//!
//! Durations are whole, non-negative seconds unless a function says otherwise.

/// Countdown clock: `HH:MM:SS` from one hour up, `MM:SS` below
pub fn clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Compact duration: `1h 30m`, or `12m` under an hour
pub fn short(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Cumulative study time: `1d 01h` from one day up, otherwise `9h 5m`
pub fn total(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;

    if days > 0 {
        format!("{}d {:02}h", days, hours)
    } else {
        let minutes = (seconds % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    }
}

/// A duration setting given in minutes: `1h 05m` or `25m`
pub fn minutes_setting(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 {
        format!("{}h {:02}m", hours, mins)
    } else {
        format!("{}m", minutes)
    }
}

/// Time label under a day in the date strip: `0:00`, `2:05`
pub fn timeline_cell(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}:{:02}", hours, minutes)
}

/// Truncate a string to max length (in chars) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock() {
        assert_eq!(clock(3661), "01:01:01");
        assert_eq!(clock(59), "00:59");
        assert_eq!(clock(0), "00:00");
        assert_eq!(clock(25 * 60), "25:00");
        assert_eq!(clock(3600), "01:00:00");
        assert_eq!(clock(100 * 3600), "100:00:00");
    }

    #[test]
    fn test_short() {
        assert_eq!(short(90 * 60), "1h 30m");
        assert_eq!(short(90), "1m");
        assert_eq!(short(59), "0m");
        assert_eq!(short(3600), "1h 0m");
    }

    #[test]
    fn test_total() {
        assert_eq!(total(90_000), "1d 01h");
        assert_eq!(total(93_600), "1d 02h");
        assert_eq!(total(3660), "1h 1m");
        assert_eq!(total(0), "0h 0m");
        assert_eq!(total(86_399), "23h 59m");
    }

    #[test]
    fn test_minutes_setting() {
        assert_eq!(minutes_setting(25), "25m");
        assert_eq!(minutes_setting(60), "1h 00m");
        assert_eq!(minutes_setting(65), "1h 05m");
    }

    #[test]
    fn test_timeline_cell() {
        assert_eq!(timeline_cell(0), "0:00");
        assert_eq!(timeline_cell(125 * 60), "2:05");
        assert_eq!(timeline_cell(59), "0:00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Indian Economy", 20), "Indian Economy");
        assert_eq!(truncate("Indian and World Geography", 10), "Indian ...");
        assert_eq!(truncate("abc", 2), "...");
        assert_eq!(truncate("日本語のテキスト", 6), "日本語...");
    }
}
