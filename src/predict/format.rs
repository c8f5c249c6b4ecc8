use chrono::Duration;
use serde::Serialize;

use crate::predict::types::PassSchedule;

/// `"—"` for nothing, `"42s"` under a minute, `"7m 05s"` otherwise.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.num_milliseconds();
    if millis <= 0 {
        return "—".to_string();
    }
    let total_seconds = (millis + 500) / 1000;
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    if minutes == 0 {
        format!("{}s", seconds)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}

/// Display strings for the first pass of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassSummary {
    pub next_pass: String,
    pub max_elevation: String,
    pub duration: String,
    pub pass_count: usize,
}

pub fn summarize(schedule: &PassSchedule) -> Option<PassSummary> {
    let next = schedule.next_pass()?;
    Some(PassSummary {
        next_pass: next.start.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        max_elevation: format!("{:.1}°", next.max_elevation_deg),
        duration: format_duration(next.duration()),
        pass_count: schedule.passes.len(),
    })
}
