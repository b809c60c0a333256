//! Error primitives for query parsing and configuration.

use thiserror::Error;

/// Error emitted by the strict width-range parser.
///
/// The lenient parser used when binding listeners never fails; this type only
/// surfaces through [`std::str::FromStr`] on [`crate::query::WidthRange`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Query contained neither a `min-width` nor a `max-width` feature.
    #[error("query contains no width feature")]
    NoWidthFeature {
        /// Query text supplied by the caller.
        query: String,
    },
    /// Minimum width exceeded the maximum width, so nothing can match.
    #[error("query minimum width exceeds maximum width")]
    InvertedRange {
        /// Parsed minimum width in pixels.
        min_width: u32,
        /// Parsed maximum width in pixels.
        max_width: u32,
    },
}

/// Result wrapper for strict query parsing.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error raised while loading or validating a [`crate::config::ResponsiveConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Configuration document could not be decoded.
    #[error("failed to parse configuration")]
    Parse {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result wrapper for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn query_error_messages_are_static() {
        let err = QueryError::InvertedRange {
            min_width: 900,
            max_width: 300,
        };
        assert_eq!(err.to_string(), "query minimum width exceeds maximum width");

        let err = QueryError::NoWidthFeature {
            query: "screen".to_string(),
        };
        assert_eq!(err.to_string(), "query contains no width feature");
    }

    #[test]
    fn config_parse_error_exposes_source() {
        let source = match serde_json::from_str::<serde_json::Value>("{") {
            Ok(value) => panic!("expected parse failure, got {value}"),
            Err(err) => err,
        };
        let err = ConfigError::Parse { source };
        assert_eq!(err.to_string(), "failed to parse configuration");
        assert!(err.source().is_some());
    }
}
