//! Formatting helpers for CLI and export output.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Hours with two decimals, the precision entries are stored with.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// `h:mm` rendering of a number of seconds (negative values clamp to zero).
pub fn secs2readable(secs: i64) -> String {
    let s = secs.max(0);
    format!("{}:{:02}", s / 3600, (s % 3600) / 60)
}

/// Truncate to `width` characters, marking the cut with "...".
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Repeat the configured separator char to draw a horizontal rule.
pub fn rule(separator: &str, width: usize) -> String {
    let ch = separator.chars().next().unwrap_or('-');
    std::iter::repeat_n(ch, width).collect()
}
