use chrono::Duration;

/// Renders a duration the way it's written in the journal, e.g. "2 hours 15 minutes". The duration
/// is rounded to the closest minute with exact halves going down; zero components are left out, so
/// anything up to 30 seconds becomes an empty string. Negative durations render as empty.
pub fn format_duration(duration: Duration) -> String {
    format_seconds(u64::try_from(duration.num_seconds()).unwrap_or(0))
}

/// Same as [format_duration] for an amount of seconds.
pub fn format_seconds(seconds: u64) -> String {
    let minutes = seconds / 60 + u64::from(seconds % 60 > 30);
    let hours = minutes / 60;
    let minutes = minutes % 60;

    let mut parts = vec![];
    if hours > 0 {
        parts.push(format_unit(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(format_unit(minutes, "minute"));
    }
    parts.join(" ")
}

fn format_unit(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Journal line for a single run. Category and class are wrapped as page links.
pub fn format_entry(category: &str, class: &str, duration_text: &str) -> String {
    format!("[[{category}]] [[{class}]] for {duration_text}")
}

#[cfg(test)]
mod format_tests {
    use chrono::Duration;

    use super::{format_duration, format_entry, format_seconds};

    fn seconds(v: i64) -> String {
        format_duration(Duration::seconds(v))
    }

    #[test]
    fn test_rounding() {
        assert_eq!(seconds(89), "1 minute");
        assert_eq!(seconds(91), "2 minutes");
        assert_eq!(seconds(90), "1 minute");
        assert_eq!(seconds(31), "1 minute");
        assert_eq!(seconds(30), "");
        assert_eq!(seconds(0), "");
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(seconds(3661), "1 hour 1 minute");
        assert_eq!(seconds(3600), "1 hour");
        assert_eq!(seconds(2 * 3600 + 15 * 60), "2 hours 15 minutes");
        assert_eq!(seconds(3599), "1 hour");
        assert_eq!(seconds(300), "5 minutes");
    }

    #[test]
    fn test_huge_and_negative() {
        assert_eq!(seconds(-600), "");
        assert_eq!(format_seconds(u64::MAX), "5124095576030431 hours");
    }

    #[test]
    fn test_entry() {
        assert_eq!(
            format_entry("Work", "Coding", "1 hour"),
            "[[Work]] [[Coding]] for 1 hour"
        );
    }
}
