//! `replay` command: drive a timed resize trace through the debounced dispatcher.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use responsive_core::{
    BindOptions, DebouncePolicy, Dimensions, DispatchStats, ManualDimensions, Registry,
    ResizeDispatcher, ResizeEvent, ResponsiveConfig, WidthRange,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, sleep_until};

use crate::cli::{OutputFormat, ReplayArgs};
use crate::context::{CliError, CliResult};
use crate::output::render_replay;

/// One resize in a replayed trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TraceStep {
    pub(crate) at_ms: u64,
    pub(crate) dimensions: Dimensions,
}

/// A listener invocation observed during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FireRecord {
    pub(crate) elapsed_ms: u64,
    pub(crate) query: String,
    pub(crate) range: WidthRange,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Outcome of a full replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReplayReport {
    pub(crate) debounce_ms: u32,
    pub(crate) stats: DispatchStats,
    pub(crate) fires: Vec<FireRecord>,
}

pub(crate) async fn handle_replay(
    args: ReplayArgs,
    config: &ResponsiveConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let steps = parse_trace(&args.trace, args.height)?;
    let mut config = config.clone();
    if let Some(debounce_ms) = args.debounce_ms {
        config.debounce_ms = debounce_ms;
        config
            .validate()
            .map_err(|err| CliError::validation(format!("invalid --debounce-ms: {err}")))?;
    }
    let report = replay(&args.queries, &steps, &config).await;
    render_replay(&report, format)
}

/// Parse `WIDTH[xHEIGHT]@MILLIS` steps separated by commas.
pub(crate) fn parse_trace(raw: &str, default_height: u32) -> CliResult<Vec<TraceStep>> {
    let mut steps = Vec::new();
    let mut last_at = 0;
    for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let invalid = || CliError::validation(format!("invalid trace step '{token}'"));
        let (size, at) = token.split_once('@').ok_or_else(invalid)?;
        let at_ms: u64 = at.trim().parse().map_err(|_| invalid())?;
        let (width, height) = match size.split_once('x') {
            Some((width, height)) => (width, height.trim().parse().map_err(|_| invalid())?),
            None => (size, default_height),
        };
        let width = width.trim().parse().map_err(|_| invalid())?;
        if at_ms < last_at {
            return Err(CliError::validation(format!(
                "trace step '{token}' goes back in time"
            )));
        }
        last_at = at_ms;
        steps.push(TraceStep {
            at_ms,
            dimensions: Dimensions::new(width, height),
        });
    }
    if steps.is_empty() {
        return Err(CliError::validation("trace must contain at least one step"));
    }
    Ok(steps)
}

/// Drive the debounced dispatcher with `steps`, recording every callback.
pub(crate) async fn replay(
    queries: &[String],
    steps: &[TraceStep],
    config: &ResponsiveConfig,
) -> ReplayReport {
    let source = ManualDimensions::default();
    let mut registry = Registry::with_config(config, source.clone());
    let fires = Rc::new(RefCell::new(Vec::new()));
    let start = Instant::now();

    for query in queries {
        let fires = Rc::clone(&fires);
        let label = query.clone();
        let range = WidthRange::parse(query);
        registry.bind(
            None,
            query,
            move |dims: Dimensions| {
                fires.borrow_mut().push(FireRecord {
                    elapsed_ms: elapsed_ms(start),
                    query: label.clone(),
                    range,
                    width: dims.width,
                    height: dims.height,
                });
            },
            Some(BindOptions::default().with_fire_now(false)),
        );
    }

    let policy: DebouncePolicy = config.debounce();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let producer = async move {
        for step in steps {
            sleep_until(start + Duration::from_millis(step.at_ms)).await;
            source.set(step.dimensions);
            if tx.send(ResizeEvent).is_err() {
                return;
            }
        }
        // hold the channel open so the last burst settles on the timer
        sleep(policy.delay()).await;
    };
    let dispatcher = ResizeDispatcher::new(policy);
    let (stats, ()) = tokio::join!(dispatcher.run(&mut registry, &mut rx), producer);

    ReplayReport {
        debounce_ms: policy.delay_ms(),
        stats,
        fires: fires.take(),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trace_accepts_optional_height() -> Result<(), String> {
        let steps = parse_trace("320@0, 480x900@40,1024@300", 700)
            .map_err(|err| err.display_message())?;
        assert_eq!(
            steps,
            vec![
                TraceStep {
                    at_ms: 0,
                    dimensions: Dimensions::new(320, 700)
                },
                TraceStep {
                    at_ms: 40,
                    dimensions: Dimensions::new(480, 900)
                },
                TraceStep {
                    at_ms: 300,
                    dimensions: Dimensions::new(1024, 700)
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn parse_trace_rejects_bad_input() {
        for raw in ["", "320", "wide@0", "320@soon", "320x@0", "320@50,400@10"] {
            assert!(
                matches!(parse_trace(raw, 700), Err(CliError::Validation(_))),
                "{raw}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn replay_debounces_bursts() -> Result<(), String> {
        let steps = parse_trace("320@0,400@30,500@60,1280@400", 800)
            .map_err(|err| err.display_message())?;
        let queries = vec![
            "(max-width: 767px)".to_string(),
            "(min-width: 1024px)".to_string(),
        ];
        let report = replay(&queries, &steps, &ResponsiveConfig::default()).await;

        assert_eq!(report.debounce_ms, 100);
        assert_eq!(report.stats.resize_events, 4);
        assert_eq!(report.stats.dispatches, 2);
        let observed: Vec<_> = report
            .fires
            .iter()
            .map(|fire| (fire.query.as_str(), fire.width))
            .collect();
        assert_eq!(
            observed,
            vec![("(max-width: 767px)", 500), ("(min-width: 1024px)", 1280)]
        );
        // quiet period measured from the last event of the burst
        assert!((160..170).contains(&report.fires[0].elapsed_ms));
        assert!((500..510).contains(&report.fires[1].elapsed_ms));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn replay_waits_out_the_final_quiet_period() -> Result<(), String> {
        let steps = parse_trace("320@0,400@30", 800).map_err(|err| err.display_message())?;
        let report = replay(&[String::new()], &steps, &ResponsiveConfig::default()).await;

        assert_eq!(report.stats.dispatches, 1);
        assert_eq!(report.fires.len(), 1);
        assert_eq!(report.fires[0].width, 400);
        assert!(report.fires[0].elapsed_ms >= 130);
        Ok(())
    }
}
