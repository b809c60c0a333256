//! Runtime configuration for registries and resize dispatch.

use serde::{Deserialize, Serialize};

use crate::debounce::DebouncePolicy;
use crate::defaults::{DEFAULT_DEBOUNCE_MS, DEFAULT_NAMESPACE, MAX_DEBOUNCE_MS};
use crate::error::{ConfigError, ConfigResult};

/// Tunables for a registry and its resize dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponsiveConfig {
    /// Debounce delay in milliseconds; `0` dispatches on every resize event.
    pub debounce_ms: u32,
    /// Namespace used by `bind`/`fire` when none is given.
    pub default_namespace: String,
    /// Whether newly bound listeners are evaluated immediately by default.
    pub fire_now: bool,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            fire_now: true,
        }
    }
}

impl ResponsiveConfig {
    /// Decode a JSON document and validate it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the default namespace is blank
    /// or the debounce delay exceeds the supported maximum.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_namespace.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "default_namespace",
                value: Some(self.default_namespace.clone()),
                reason: "must not be empty",
            });
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidField {
                field: "debounce_ms",
                value: Some(self.debounce_ms.to_string()),
                reason: "exceeds maximum",
            });
        }
        Ok(())
    }

    /// Debounce policy derived from [`Self::debounce_ms`].
    #[must_use]
    pub const fn debounce(&self) -> DebouncePolicy {
        DebouncePolicy::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() -> ConfigResult<()> {
        let config = ResponsiveConfig::from_json_str("{}")?;
        assert_eq!(config, ResponsiveConfig::default());
        assert_eq!(config.debounce().delay_ms(), 100);
        Ok(())
    }

    #[test]
    fn partial_document_overrides_fields() -> ConfigResult<()> {
        let config = ResponsiveConfig::from_json_str(r#"{"debounce_ms": 250, "fire_now": false}"#)?;
        assert_eq!(config.debounce_ms, 250);
        assert!(!config.fire_now);
        assert_eq!(config.default_namespace, DEFAULT_NAMESPACE);
        Ok(())
    }

    #[test]
    fn blank_namespace_is_rejected() {
        let err = ResponsiveConfig::from_json_str(r#"{"default_namespace": "  "}"#);
        assert!(matches!(
            err,
            Err(ConfigError::InvalidField {
                field: "default_namespace",
                ..
            })
        ));
    }

    #[test]
    fn oversized_debounce_is_rejected() {
        let config = ResponsiveConfig {
            debounce_ms: MAX_DEBOUNCE_MS + 1,
            ..ResponsiveConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidField {
                field: "debounce_ms",
                reason: "exceeds maximum",
                ..
            })
        ));
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        assert!(matches!(
            ResponsiveConfig::from_json_str(r#"{"debounce": 10}"#),
            Err(ConfigError::Parse { .. })
        ));
    }
}
