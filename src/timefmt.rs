//! Time formatting for the presentation layer.

/// Format a time in seconds as `H:MM:SS`, `M:SS`, or two-digit `SS`.
///
/// `0 -> "00"`, `65 -> "1:05"`, `3661 -> "1:01:01"`.
pub fn format_time(time_in_seconds: f64) -> String {
    let t = time_in_seconds.max(0.0);
    let hours = (t / 3600.0).floor() as u64;
    let minutes = ((t % 3600.0) / 60.0).floor() as u64;
    let seconds = (t % 60.0).floor() as u64;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        format!("{:02}", seconds)
    }
}
