//! `probe` command: evaluate queries against a fixed viewport.

use std::cell::RefCell;
use std::rc::Rc;

use responsive_core::{
    BindOptions, Dimensions, FixedDimensions, Listener, Registry, ResponsiveConfig, WidthRange,
};
use serde::Serialize;

use crate::cli::{OutputFormat, ProbeArgs};
use crate::context::{CliError, CliResult};
use crate::output::render_probe;

/// Evaluation result for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ProbeOutcome {
    pub(crate) query: String,
    pub(crate) range: WidthRange,
    pub(crate) matched: bool,
}

pub(crate) fn handle_probe(
    args: ProbeArgs,
    config: &ResponsiveConfig,
    format: OutputFormat,
) -> CliResult<()> {
    if args.strict {
        for query in &args.queries {
            query.parse::<WidthRange>().map_err(|err| {
                CliError::validation(format!("invalid query '{query}': {err}"))
            })?;
        }
    }
    let dims = Dimensions::new(args.width, args.height);
    let outcomes = probe(&args.queries, dims, config);
    render_probe(dims, &outcomes, format)
}

/// Bind every query against a fixed viewport and report which ones fired.
pub(crate) fn probe(
    queries: &[String],
    dims: Dimensions,
    config: &ResponsiveConfig,
) -> Vec<ProbeOutcome> {
    let mut registry = Registry::with_config(config, FixedDimensions(dims));
    let matched = Rc::new(RefCell::new(Vec::new()));
    for (index, query) in queries.iter().enumerate() {
        let matched = Rc::clone(&matched);
        registry.bind(
            None,
            query,
            move |_| matched.borrow_mut().push(index),
            Some(BindOptions::default()),
        );
    }

    let matched = matched.borrow();
    queries
        .iter()
        .zip(registry.listeners(None).map(Listener::range))
        .enumerate()
        .map(|(index, (query, range))| ProbeOutcome {
            query: query.clone(),
            range,
            matched: matched.contains(&index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_reports_matches_per_query() {
        let queries = vec![
            "(min-width: 320px) and (max-width: 800px)".to_string(),
            "(min-width: 1024px)".to_string(),
            "print".to_string(),
        ];
        let outcomes = probe(
            &queries,
            Dimensions::new(800, 600),
            &ResponsiveConfig::default(),
        );
        let matched: Vec<_> = outcomes.iter().map(|outcome| outcome.matched).collect();
        assert_eq!(matched, vec![true, false, true]);
        assert_eq!(outcomes[0].range, WidthRange::new(320, Some(800)));
        assert!(outcomes[2].range.is_unbounded());
    }

    #[test]
    fn probe_ignores_configured_fire_now_default() {
        let config = ResponsiveConfig {
            fire_now: false,
            ..ResponsiveConfig::default()
        };
        let outcomes = probe(&["".to_string()], Dimensions::new(10, 10), &config);
        assert!(outcomes[0].matched);
    }

    #[test]
    fn strict_probe_rejects_queries_without_width() {
        let args = ProbeArgs {
            queries: vec!["screen".to_string()],
            width: 100,
            height: 100,
            strict: true,
        };
        let result = handle_probe(args, &ResponsiveConfig::default(), OutputFormat::Json);
        assert!(matches!(result, Err(CliError::Validation(_))));
    }
}
