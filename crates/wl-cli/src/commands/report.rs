//! Report command: aggregated statistics over every session domain.
//!
//! This module implements `wl report` with optional keep-type grouping for
//! sieges and output formats (human-readable, JSON).

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use wl_core::{AggregateStatistics, AnalysisConfig, AnalysisReport, OutcomeCounts};

use super::util::{format_duration, heading, load_analysis};

/// Computed report data.
#[derive(Debug, Serialize)]
pub struct ReportData {
    /// Number of events in the log.
    pub events: usize,
    #[serde(flatten)]
    pub report: AnalysisReport,
    /// Siege statistics keyed by keep type, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sieges_by_keep_type: Option<AggregateStatistics>,
}

fn or_none(key: Option<&str>) -> &str {
    key.unwrap_or("(none)")
}

fn write_section(output: &mut String, title: &str, stats: &AggregateStatistics) {
    writeln!(output).unwrap();
    writeln!(output, "{}", heading(title)).unwrap();

    if stats.is_empty() {
        writeln!(output, "No sessions.").unwrap();
        return;
    }

    let overall = &stats.overall;
    writeln!(
        output,
        "Sessions:  {}  (total {}, average {})",
        overall.sessions,
        format_duration(overall.total_duration_ms),
        format_duration(overall.average_duration_ms)
    )
    .unwrap();
    writeln!(
        output,
        "Kills:     {}  Deaths: {}  KDR: {:.2}",
        overall.kills, overall.deaths, overall.kdr
    )
    .unwrap();
    writeln!(
        output,
        "Damage:    {} dealt, {} taken",
        overall.damage_dealt, overall.damage_taken
    )
    .unwrap();
    writeln!(output, "Healing:   {}", overall.healing_done).unwrap();

    for group in stats.groups.values() {
        writeln!(
            output,
            "  {:<24} {:>3}  {:>3}/{:<3}  KDR {:>5.2}  avg {}",
            group.key,
            group.sessions,
            group.kills,
            group.deaths,
            group.kdr,
            format_duration(group.average_duration_ms)
        )
        .unwrap();
    }

    writeln!(
        output,
        "Best performing: {}",
        or_none(stats.best_performing.as_deref())
    )
    .unwrap();
    writeln!(output, "Most played:     {}", or_none(stats.most_played.as_deref())).unwrap();
}

fn write_siege_extras(output: &mut String, stats: &AggregateStatistics, outcomes: &OutcomeCounts) {
    if stats.is_empty() {
        return;
    }
    let overall = &stats.overall;
    writeln!(
        output,
        "Structure: {}  Guards: {}  Lords: {}",
        overall.structure_damage, overall.guard_kills, overall.lord_kills
    )
    .unwrap();
    writeln!(
        output,
        "Outcomes:  {} attack success, {} defense success, {} unknown",
        outcomes.attack_success, outcomes.defense_success, outcomes.unknown
    )
    .unwrap();
}

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();
    writeln!(output, "COMBAT REPORT: {} events", data.events).unwrap();

    if data.events == 0 {
        writeln!(output).unwrap();
        writeln!(output, "No events in log.").unwrap();
        return output;
    }

    let report = &data.report;
    write_section(&mut output, "COMBAT SESSIONS", &report.combat_sessions);
    write_section(&mut output, "COMBAT INSTANCES", &report.combat_instances);

    let (title, sieges) = data
        .sieges_by_keep_type
        .as_ref()
        .map_or(("SIEGES", &report.sieges), |by_type| {
            ("SIEGES BY KEEP TYPE", by_type)
        });
    write_section(&mut output, title, sieges);
    write_siege_extras(&mut output, sieges, &report.siege_outcomes);

    write_section(&mut output, "RELIC RAIDS", &report.relic_raids);
    write_section(&mut output, "BATTLEGROUNDS", &report.battlegrounds);

    output
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Runs the report command.
pub fn run(file: &Path, config: &AnalysisConfig, group_by_keep_type: bool, json: bool) -> Result<()> {
    let (events, analysis) = load_analysis(file, config)?;
    let data = ReportData {
        events: events.len(),
        report: analysis.report(&config.aggregate),
        sieges_by_keep_type: group_by_keep_type
            .then(|| analysis.sieges_by_keep_type(&config.aggregate)),
    };

    if json {
        let output = format_report_json(&data)?;
        println!("{output}");
    } else {
        let output = format_report(&data);
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use wl_core::{BuiltinReference, analyze};

    use super::*;
    use crate::commands::util::parse_events;

    const SAUVAGE: &str = r#"
{"timestamp":"20:00:00","type":"door_destroyed","keep":"Castle Sauvage","door_name":"Outer Door"}
{"timestamp":"20:01:00","type":"door_destroyed","keep":"Castle Sauvage","door_name":"Inner Door"}
{"timestamp":"20:01:30","type":"guard_kill","killer":"You","guard":"Lord Sauvage","keep":"Castle Sauvage","lord":true}
{"timestamp":"20:30:00","type":"structure_damage","source":"You","keep":"Caer Benowyc","structure":"Outer Door","amount":750}
"#;

    fn report_of(jsonl: &str, by_keep_type: bool) -> ReportData {
        let events = parse_events(jsonl).unwrap();
        let config = AnalysisConfig::default();
        let analysis = analyze(&events, &BuiltinReference, &config, &config.subject());
        ReportData {
            events: events.len(),
            report: analysis.report(&config.aggregate),
            sieges_by_keep_type: by_keep_type
                .then(|| analysis.sieges_by_keep_type(&config.aggregate)),
        }
    }

    #[test]
    fn test_report_empty_log() {
        let output = format_report(&report_of("", false));
        assert_snapshot!(output, @r"
        COMBAT REPORT: 0 events

        No events in log.
        ");
    }

    #[test]
    fn test_report_sieges() {
        let output = format_report(&report_of(SAUVAGE, false));
        assert_snapshot!(output, @r"
        COMBAT REPORT: 4 events

        COMBAT SESSIONS
        ───────────────
        No sessions.

        COMBAT INSTANCES
        ────────────────
        No sessions.

        SIEGES
        ──────
        Sessions:  2  (total 1m 30s, average 0m 45s)
        Kills:     0  Deaths: 0  KDR: 0.00
        Damage:    0 dealt, 0 taken
        Healing:   0
          Caer Benowyc               1    0/0    KDR  0.00  avg 0m 0s
          Castle Sauvage             1    0/0    KDR  0.00  avg 1m 30s
        Best performing: (none)
        Most played:     Caer Benowyc
        Structure: 750  Guards: 1  Lords: 1
        Outcomes:  1 attack success, 1 defense success, 0 unknown

        RELIC RAIDS
        ───────────
        No sessions.

        BATTLEGROUNDS
        ─────────────
        No sessions.
        ");
    }

    #[test]
    fn test_report_groups_sieges_by_keep_type() {
        let output = format_report(&report_of(SAUVAGE, true));
        assert!(output.contains("SIEGES BY KEEP TYPE\n"));
        assert!(output.contains("  border "));
        assert!(output.contains("  standard "));
        assert!(!output.contains("  Castle Sauvage "));
    }

    #[test]
    fn test_report_json_output() {
        let json = format_report_json(&report_of(SAUVAGE, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["events"], 4);
        assert_eq!(value["sieges"]["overall"]["sessions"], 2);
        assert_eq!(value["sieges"]["overall"]["lord_kills"], 1);
        assert_eq!(value["siege_outcomes"]["attack_success"], 1);
        assert_eq!(value["sieges"]["most_played"], "Caer Benowyc");
        assert!(value["sieges"]["best_performing"].is_null());
        assert!(value.get("sieges_by_keep_type").is_none());
    }
}
