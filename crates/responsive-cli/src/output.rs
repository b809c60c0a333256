//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use responsive_core::Dimensions;
use responsive_core::breakpoints::Breakpoint;
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::probe::ProbeOutcome;
use crate::commands::replay::ReplayReport;
use crate::context::{CliError, CliResult};

pub(crate) fn render_probe(
    dims: Dimensions,
    outcomes: &[ProbeOutcome],
    format: OutputFormat,
) -> CliResult<()> {
    let text = match format {
        OutputFormat::Json => to_json(&json!({ "dimensions": dims, "results": outcomes }))?,
        OutputFormat::Table => probe_table(dims, outcomes),
    };
    println!("{text}");
    Ok(())
}

pub(crate) fn render_replay(report: &ReplayReport, format: OutputFormat) -> CliResult<()> {
    let text = match format {
        OutputFormat::Json => to_json(report)?,
        OutputFormat::Table => replay_table(report),
    };
    println!("{text}");
    Ok(())
}

pub(crate) fn render_breakpoints(breakpoints: &[Breakpoint], format: OutputFormat) -> CliResult<()> {
    let text = match format {
        OutputFormat::Json => {
            let rows: Vec<_> = breakpoints
                .iter()
                .map(|bp| json!({ "name": bp.name, "range": bp.range, "query": bp.query() }))
                .collect();
            to_json(&rows)?
        }
        OutputFormat::Table => breakpoint_table(breakpoints),
    };
    println!("{text}");
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

fn probe_table(dims: Dimensions, outcomes: &[ProbeOutcome]) -> String {
    let mut out = format!("viewport: {}x{}\n", dims.width, dims.height);
    let _ = writeln!(out, "{:<7} {:<16} QUERY", "MATCH", "RANGE");
    for outcome in outcomes {
        let _ = writeln!(
            out,
            "{:<7} {:<16} {}",
            if outcome.matched { "yes" } else { "no" },
            outcome.range.to_string(),
            outcome.query
        );
    }
    out.trim_end().to_string()
}

fn replay_table(report: &ReplayReport) -> String {
    let mut out = format!("debounce: {}ms\n", report.debounce_ms);
    let _ = writeln!(out, "{:>8} {:>6} {:>6} QUERY", "AT(ms)", "WIDTH", "HEIGHT");
    for fire in &report.fires {
        let _ = writeln!(
            out,
            "{:>8} {:>6} {:>6} {}",
            fire.elapsed_ms, fire.width, fire.height, fire.query
        );
    }
    let _ = write!(
        out,
        "events: {} dispatches: {} callbacks: {}",
        report.stats.resize_events, report.stats.dispatches, report.stats.callbacks
    );
    out
}

fn breakpoint_table(breakpoints: &[Breakpoint]) -> String {
    let mut out = format!("{:<5} {:<16} QUERY\n", "NAME", "RANGE");
    for bp in breakpoints {
        let _ = writeln!(out, "{:<5} {:<16} {}", bp.name, bp.range.to_string(), bp.query());
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use responsive_core::WidthRange;
    use responsive_core::breakpoints::BREAKPOINTS;

    #[test]
    fn probe_table_lists_each_query() {
        let table = probe_table(
            Dimensions::new(500, 800),
            &[ProbeOutcome {
                query: "(max-width: 767px)".to_string(),
                range: WidthRange::new(0, Some(767)),
                matched: true,
            }],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "viewport: 500x800");
        assert!(lines[2].starts_with("yes"));
        assert!(lines[2].ends_with("(max-width: 767px)"));
    }

    #[test]
    fn breakpoint_table_has_row_per_preset() {
        let table = breakpoint_table(&BREAKPOINTS);
        assert_eq!(table.lines().count(), BREAKPOINTS.len() + 1);
        assert!(table.contains("(min-width: 1920px)"));
    }
}
