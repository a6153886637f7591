use chrono::{DateTime, Local, Utc};

use revsmart_lib::concepts::algorithm::format_interval;
use revsmart_lib::concepts::{ConceptStatus, ReviewProgress};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Calendar date in the local timezone
pub fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// "in 3d", "due now", "overdue 2w"
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (at - now).num_days();
    if at > now {
        format!("in {}", format_interval(days.max(1)))
    } else if days == 0 {
        "due now".to_string()
    } else {
        format!("overdue {}", format_interval(-days))
    }
}

pub fn status_color(status: ConceptStatus) -> &'static str {
    match status {
        ConceptStatus::New => Color::CYAN,
        ConceptStatus::Completed => Color::GREEN,
        ConceptStatus::Overdue => Color::RED,
    }
}

/// Fixed-width progress bar, e.g. `[#####-----]  50%`
pub fn progress_bar(progress: &ReviewProgress, width: usize) -> String {
    let percent = progress.percent();
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// Truncate to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > width && width > 3 {
        let cut: String = first_line.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}
