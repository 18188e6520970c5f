/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Entry state colour: open entries green, paused yellow, closed plain.
pub fn color_for_state(open: bool, paused: bool) -> &'static str {
    match (open, paused) {
        (true, true) => YELLOW,
        (true, false) => GREEN,
        _ => RESET,
    }
}

/// Grey out placeholders ("", "--", "0.00") so real values stand out.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "0.00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
