//! Centisecond results as human-readable times.

/// Result code for "Did Not Finish"
pub const DNF: i64 = -1;

/// Result code for "Did Not Start"
pub const DNS: i64 = -2;

const CENTIS_PER_MINUTE: i64 = 6000;

/// Columns whose integer values are WCA times in centiseconds.
pub const TIME_FIELDS: &[&str] = &[
    "best",
    "average",
    "value1",
    "value2",
    "value3",
    "value4",
    "value5",
    "worldRecord",
    "continentalRecord",
    "nationalRecord",
];

/// Check if a column holds centisecond times (exact, case-sensitive match).
pub fn is_time_field(column: &str) -> bool {
    TIME_FIELDS.contains(&column)
}

/// Format a centisecond value.
///
/// Sentinels map to `DNF`, `DNS` and `-` (no result). Under a minute the
/// value prints as seconds with a trailing `s`; from a minute up it prints as
/// `m:ss.cc` with no cap on minutes. Other negative values print as-is.
///
/// ```rust
/// use wcabotlib::format::format_duration;
///
/// assert_eq!(format_duration(347), "3.47s");
/// assert_eq!(format_duration(7345), "1:13.45");
/// assert_eq!(format_duration(-1), "DNF");
/// ```
pub fn format_duration(centiseconds: i64) -> String {
    match centiseconds {
        DNF => "DNF".to_string(),
        DNS => "DNS".to_string(),
        0 => "-".to_string(),
        v if v < 0 => v.to_string(),
        v if v < CENTIS_PER_MINUTE => format!("{}.{:02}s", v / 100, v % 100),
        v => {
            let minutes = v / CENTIS_PER_MINUTE;
            let rest = v % CENTIS_PER_MINUTE;
            format!("{}:{:02}.{:02}", minutes, rest / 100, rest % 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(format_duration(0), "-");
        assert_eq!(format_duration(-1), "DNF");
        assert_eq!(format_duration(-2), "DNS");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(format_duration(1), "0.01s");
        assert_eq!(format_duration(1000), "10.00s");
        assert_eq!(format_duration(4690), "46.90s");
        assert_eq!(format_duration(5999), "59.99s");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(format_duration(6000), "1:00.00");
        assert_eq!(format_duration(6005), "1:00.05");
        assert_eq!(format_duration(7345), "1:13.45");
        assert_eq!(format_duration(72345), "12:03.45");
        assert_eq!(format_duration(366000), "61:00.00");
    }

    #[test]
    fn test_other_negatives_pass_through() {
        assert_eq!(format_duration(-3), "-3");
        assert_eq!(format_duration(-6000), "-6000");
    }

    #[test]
    fn test_time_fields() {
        assert!(is_time_field("best"));
        assert!(is_time_field("worldRecord"));
        assert!(!is_time_field("Best"));
        assert!(!is_time_field("world_rank"));
    }
}
