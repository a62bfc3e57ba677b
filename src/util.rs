/// Render a second count the way the views show it: `45s`, `3m 05s`,
/// `1h 02m 03s`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, m) => format!("{m}m {seconds:02}s"),
        (h, m) => format!("{h}h {m:02}m {seconds:02}s"),
    }
}

/// Percentage for a 0.0..=1.0 ratio, rounded down so a goal never shows
/// 100% before it is met.
pub fn percent(ratio: f64) -> u16 {
    (ratio.clamp(0.0, 1.0) * 100.0).floor() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_only() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_duration(60), "1m 00s");
        assert_eq!(format_duration(185), "3m 05s");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_duration(3600), "1h 00m 00s");
        assert_eq!(format_duration(3723), "1h 02m 03s");
    }

    #[test]
    fn test_percent_rounds_down() {
        assert_eq!(percent(0.999), 99);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.0), 0);
    }

    #[test]
    fn test_percent_clamps() {
        assert_eq!(percent(2.0), 100);
        assert_eq!(percent(-1.0), 0);
    }
}
