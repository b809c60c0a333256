//! Shared error type and configuration loading for CLI commands.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use anyhow::anyhow;
use responsive_core::ResponsiveConfig;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Load configuration from `path`, or defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> CliResult<ResponsiveConfig> {
    let Some(path) = path else {
        return Ok(ResponsiveConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read config {}: {err}", path.display()))
    })?;
    ResponsiveConfig::from_json_str(&raw).map_err(|err| {
        CliError::validation(format!(
            "invalid config {}: {:#}",
            path.display(),
            anyhow::Error::from(err)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn exit_codes_distinguish_error_kinds() {
        let validation = CliError::validation("bad input");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.display_message(), "bad input");

        let failure = CliError::failure(anyhow!("boom"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.display_message(), "boom");
        assert_eq!(failure.to_string(), "cli error");
    }

    #[test]
    fn missing_path_yields_defaults() {
        assert!(matches!(
            load_config(None),
            Ok(config) if config == ResponsiveConfig::default()
        ));
    }

    #[test]
    fn unreadable_path_is_a_failure() {
        let path = PathBuf::from("/nonexistent/responsive/config.json");
        assert!(matches!(
            load_config(Some(&path)),
            Err(CliError::Failure(_))
        ));
    }
}
