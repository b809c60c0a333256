//! `breakpoints` command: list the built-in breakpoint presets.

use responsive_core::breakpoints::BREAKPOINTS;

use crate::cli::OutputFormat;
use crate::context::CliResult;
use crate::output::render_breakpoints;

pub(crate) fn handle_breakpoints(format: OutputFormat) -> CliResult<()> {
    render_breakpoints(&BREAKPOINTS, format)
}
