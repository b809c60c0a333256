//! Debounce policy shared by the browser and host dispatchers.

use std::time::Duration;

use crate::defaults::DEFAULT_DEBOUNCE_MS;

/// Fixed quiet period a dispatcher waits for after the last resize event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebouncePolicy {
    delay_ms: u32,
}

impl DebouncePolicy {
    /// Policy with the given delay in milliseconds.
    #[must_use]
    pub const fn from_millis(delay_ms: u32) -> Self {
        Self { delay_ms }
    }

    /// Delay in milliseconds, as browser timer APIs expect it.
    #[must_use]
    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Delay as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_ms))
    }

    /// A zero delay dispatches synchronously on every event.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        self.delay_ms == 0
    }
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DEBOUNCE_MS)
    }
}
