//! Error primitives for the browser handle.

use responsive_core::ConfigError;
use thiserror::Error;

/// Errors surfaced by [`crate::Responsive`] operations.
#[derive(Debug, Error)]
pub enum ResponsiveError {
    /// The registry was already borrowed, typically because a listener
    /// callback tried to call back into the handle.
    #[error("responsive registry is busy")]
    RegistryBusy {
        /// Operation that could not acquire the registry.
        operation: &'static str,
    },
    /// No global `window` object exists (e.g. inside a worker).
    #[error("browser window is unavailable")]
    WindowUnavailable,
    /// Supplied configuration failed to load.
    #[error("invalid responsive configuration")]
    Config {
        /// Underlying configuration error.
        #[from]
        source: ConfigError,
    },
}

impl ResponsiveError {
    /// Operation name for [`Self::RegistryBusy`], if applicable.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::RegistryBusy { operation } => Some(*operation),
            Self::WindowUnavailable | Self::Config { .. } => None,
        }
    }
}

/// Result wrapper for browser handle operations.
pub type ResponsiveResult<T> = Result<T, ResponsiveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use responsive_core::ResponsiveConfig;
    use std::error::Error as _;

    #[test]
    fn busy_error_exposes_operation() {
        let err = ResponsiveError::RegistryBusy { operation: "bind" };
        assert_eq!(err.operation(), Some("bind"));
        assert_eq!(err.to_string(), "responsive registry is busy");
        assert_eq!(ResponsiveError::WindowUnavailable.operation(), None);
    }

    #[test]
    fn config_errors_convert_and_chain() {
        let config_err = match ResponsiveConfig::from_json_str(r#"{"default_namespace": ""}"#) {
            Ok(config) => panic!("expected validation failure, got {config:?}"),
            Err(err) => err,
        };
        let err = ResponsiveError::from(config_err);
        assert_eq!(err.to_string(), "invalid responsive configuration");
        assert!(err.source().is_some());
    }
}
