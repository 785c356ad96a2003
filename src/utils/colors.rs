/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Color for a derived status cell:
/// AVAILABLE → green, OUT → red, WAITING → yellow.
pub fn color_for_status(cell: &str) -> &'static str {
    match cell {
        "AVAILABLE" => GREEN,
        "OUT" => RED,
        "WAITING" => YELLOW,
        _ => RESET,
    }
}
