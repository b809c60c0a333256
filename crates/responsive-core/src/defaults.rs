//! Default values shared by configuration and the registry.

/// Namespace used when callers do not name one.
pub const DEFAULT_NAMESPACE: &str = "default";
/// Quiet period after the last resize event before listeners are fired.
pub const DEFAULT_DEBOUNCE_MS: u32 = 100;
/// Upper bound accepted for the debounce delay.
pub const MAX_DEBOUNCE_MS: u32 = 60_000;
