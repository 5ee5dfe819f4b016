//! Sessions command: lists the closed sessions of one domain.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use wl_core::{
    Analysis, AnalysisConfig, BattlegroundSession, CombatSession, RelicRaidSession, SessionSpan,
    SiegeSession,
};

use super::util::{format_duration, format_time, heading, load_analysis};
use crate::cli::DomainArg;

const fn title(domain: DomainArg) -> &'static str {
    match domain {
        DomainArg::Combat => "COMBAT SESSIONS",
        DomainArg::Instances => "COMBAT INSTANCES",
        DomainArg::Sieges => "SIEGES",
        DomainArg::Relics => "RELIC RAIDS",
        DomainArg::Battlegrounds => "BATTLEGROUNDS",
    }
}

/// `HH:MM:SS - HH:MM:SS  duration`
fn span_columns(span: &SessionSpan) -> String {
    format!(
        "{} - {}  {:>8}",
        format_time(span.start),
        format_time(span.end),
        format_duration(span.duration_ms)
    )
}

fn combat_line(session: &CombatSession) -> String {
    let stats = &session.stats;
    format!(
        "  {}  dealt {:>7}  taken {:>7}  healed {:>7}  K/D {}/{}",
        span_columns(&session.span),
        stats.damage_dealt,
        stats.damage_taken,
        stats.healing_done,
        stats.player_kills,
        stats.deaths
    )
}

fn siege_line(session: &SiegeSession) -> String {
    format!(
        "  {}  {:<24} {:<8} {:<11} {}",
        span_columns(&session.span),
        session.keep(),
        session.keep_type.as_str(),
        session.phase.as_str(),
        session.outcome.as_str()
    )
}

fn relic_line(session: &RelicRaidSession) -> String {
    let carriers = if session.carriers.is_empty() {
        "-".to_string()
    } else {
        session.carriers.join(", ")
    };
    format!(
        "  {}  {:<24} {:<10} {carriers}",
        span_columns(&session.span),
        session.relic(),
        session.outcome.as_str()
    )
}

fn battleground_line(session: &BattlegroundSession) -> String {
    let bracket = session.bracket.as_ref().map_or_else(
        || "?".to_string(),
        |b| format!("{}-{}", b.min_level, b.max_level),
    );
    format!(
        "  {}  {:<16} {:<5}  K/D {}/{}",
        span_columns(&session.span),
        session.zone(),
        bracket,
        session.stats.player_kills,
        session.stats.deaths
    )
}

/// Formats the sessions of one domain as a human-readable list.
pub fn format_sessions(domain: DomainArg, analysis: &Analysis) -> String {
    let lines: Vec<String> = match domain {
        DomainArg::Combat => analysis.combat_sessions.iter().map(combat_line).collect(),
        DomainArg::Instances => analysis.combat_instances.iter().map(combat_line).collect(),
        DomainArg::Sieges => analysis.sieges.iter().map(siege_line).collect(),
        DomainArg::Relics => analysis.relic_raids.iter().map(relic_line).collect(),
        DomainArg::Battlegrounds => analysis.battlegrounds.iter().map(battleground_line).collect(),
    };

    let mut output = String::new();
    writeln!(output, "{}", heading(&format!("{} ({})", title(domain), lines.len()))).unwrap();

    if lines.is_empty() {
        writeln!(output, "No sessions found.").unwrap();
        return output;
    }

    for line in lines {
        writeln!(output, "{line}").unwrap();
    }
    output
}

/// Formats the sessions of one domain as JSON.
pub fn format_sessions_json(domain: DomainArg, analysis: &Analysis) -> Result<String> {
    let json = match domain {
        DomainArg::Combat => serde_json::to_string_pretty(&analysis.combat_sessions)?,
        DomainArg::Instances => serde_json::to_string_pretty(&analysis.combat_instances)?,
        DomainArg::Sieges => serde_json::to_string_pretty(&analysis.sieges)?,
        DomainArg::Relics => serde_json::to_string_pretty(&analysis.relic_raids)?,
        DomainArg::Battlegrounds => serde_json::to_string_pretty(&analysis.battlegrounds)?,
    };
    Ok(json)
}

/// Runs the sessions command.
pub fn run(file: &Path, config: &AnalysisConfig, domain: DomainArg, json: bool) -> Result<()> {
    let (_events, analysis) = load_analysis(file, config)?;

    if json {
        let output = format_sessions_json(domain, &analysis)?;
        println!("{output}");
    } else {
        let output = format_sessions(domain, &analysis);
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use wl_core::{BuiltinReference, Event, analyze};

    use super::*;
    use crate::commands::util::parse_events;

    fn analysis_of(jsonl: &str) -> Analysis {
        let events: Vec<Event> = parse_events(jsonl).unwrap();
        let config = AnalysisConfig::default();
        analyze(&events, &BuiltinReference, &config, &config.subject())
    }

    const SAUVAGE: &str = r#"
{"timestamp":"20:00:00","type":"door_destroyed","keep":"Castle Sauvage","door_name":"Outer Door"}
{"timestamp":"20:01:00","type":"door_destroyed","keep":"Castle Sauvage","door_name":"Inner Door"}
{"timestamp":"20:01:30","type":"guard_kill","killer":"You","guard":"Lord Sauvage","keep":"Castle Sauvage","lord":true}
"#;

    const FIGHTS: &str = r#"
{"timestamp":"21:00:00","type":"damage","source":"You","target":"Sven","amount":120}
{"timestamp":"21:00:10","type":"healing","source":"You","target":"You","amount":40}
{"timestamp":"21:00:20","type":"death","victim":"Sven","killer":"You"}
{"timestamp":"21:02:00","type":"damage","source":"Bjorn","target":"You","amount":300}
{"timestamp":"21:02:05","type":"death","victim":"You","killer":"Bjorn"}
"#;

    #[test]
    fn test_sieges_list() {
        let output = format_sessions(DomainArg::Sieges, &analysis_of(SAUVAGE));
        assert_snapshot!(output, @r"
        SIEGES (1)
        ──────────
          20:00:00 - 20:01:30    1m 30s  Castle Sauvage           border   lord_fight  attack_success
        ");
    }

    #[test]
    fn test_combat_instances_list() {
        let output = format_sessions(DomainArg::Instances, &analysis_of(FIGHTS));
        assert_snapshot!(output, @r"
        COMBAT INSTANCES (2)
        ────────────────────
          21:00:00 - 21:00:20    0m 20s  dealt     120  taken       0  healed      40  K/D 1/0
          21:02:00 - 21:02:05     0m 5s  dealt       0  taken     300  healed       0  K/D 0/1
        ");
    }

    #[test]
    fn test_combat_sessions_merge_fights() {
        let output = format_sessions(DomainArg::Combat, &analysis_of(FIGHTS));
        assert!(output.starts_with("COMBAT SESSIONS (1)\n"));
        assert!(output.contains("K/D 1/1"));
    }

    #[test]
    fn test_empty_domain() {
        let output = format_sessions(DomainArg::Relics, &analysis_of(SAUVAGE));
        assert_snapshot!(output, @r"
        RELIC RAIDS (0)
        ───────────────
        No sessions found.
        ");
    }

    #[test]
    fn test_sessions_json_is_an_array() {
        let json = format_sessions_json(DomainArg::Sieges, &analysis_of(SAUVAGE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let sieges = value.as_array().unwrap();
        assert_eq!(sieges.len(), 1);
        assert_eq!(sieges[0]["discriminator"], "Castle Sauvage");
        assert_eq!(sieges[0]["phase"], "lord_fight");
        assert_eq!(sieges[0]["outcome"], "attack_success");
        assert_eq!(sieges[0]["contribution"]["lord_kills"], 1);
        assert_eq!(sieges[0]["contribution"]["player_kills"], 0);
    }
}
