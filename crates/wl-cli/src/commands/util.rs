//! Helpers shared by the subcommands: event loading and formatting.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use wl_core::{Analysis, AnalysisConfig, BuiltinReference, Event, analyze};

/// Parses JSON Lines into events. Blank lines are skipped.
///
/// Fails on the first malformed line, naming its (1-based) line number.
pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = serde_json::from_str(line)
            .with_context(|| format!("invalid event on line {}", index + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// Reads a JSON Lines event log.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events =
        parse_events(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), events = events.len(), "loaded event log");
    Ok(events)
}

/// Reads a log and runs the full analysis with the built-in reference tables.
pub fn load_analysis(path: &Path, config: &AnalysisConfig) -> Result<(Vec<Event>, Analysis)> {
    let events = read_events(path)?;
    let analysis = analyze(&events, &BuiltinReference, config, &config.subject());
    Ok((events, analysis))
}

/// Formats milliseconds as duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm Ys" otherwise.
/// Negative durations are treated as zero.
pub fn format_duration(ms: i64) -> String {
    if ms < 0 {
        return "0m 0s".to_string();
    }
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

/// Formats a log timestamp as `HH:MM:SS`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// A section title followed by a box-drawing underline of the same width.
pub fn heading(title: &str) -> String {
    format!("{title}\n{}", "─".repeat(title.chars().count()))
}
