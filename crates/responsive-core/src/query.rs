//! Width-range extraction from simplified media-query strings.
//!
//! # Design
//! - Only `(min-width: Npx)` and `(max-width: Npx)` are recognised; every other
//!   media feature is ignored.
//! - [`WidthRange::parse`] is lenient: absent or malformed features fall back to
//!   `0` and unbounded respectively, so a garbage query matches every width.
//! - [`WidthRange::from_str`](std::str::FromStr) is the strict variant for callers
//!   that want to surface mistakes.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

static MIN_WIDTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(min-width:\s*(\d+)px\s*\)").expect("min-width pattern is valid")
});
static MAX_WIDTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(max-width:\s*(\d+)px\s*\)").expect("max-width pattern is valid")
});

/// Inclusive viewport width range a listener responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidthRange {
    /// Smallest matching width in pixels.
    pub min_width: u32,
    /// Largest matching width in pixels; `None` is unbounded.
    pub max_width: Option<u32>,
}

impl WidthRange {
    /// Range matching every width.
    pub const UNBOUNDED: Self = Self {
        min_width: 0,
        max_width: None,
    };

    /// Construct a range from explicit bounds.
    #[must_use]
    pub const fn new(min_width: u32, max_width: Option<u32>) -> Self {
        Self {
            min_width,
            max_width,
        }
    }

    /// Extract the width range from a query, defaulting missing features.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self {
            min_width: capture_px(&MIN_WIDTH, query).unwrap_or(0),
            max_width: capture_px(&MAX_WIDTH, query),
        }
    }

    /// Whether `width` lies within the range (both ends inclusive).
    #[must_use]
    pub const fn contains(&self, width: u32) -> bool {
        if width < self.min_width {
            return false;
        }
        match self.max_width {
            Some(max) => width <= max,
            None => true,
        }
    }

    /// Whether the range matches every width.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min_width == 0 && self.max_width.is_none()
    }

    /// Render the range back into the query syntax accepted by [`Self::parse`].
    #[must_use]
    pub fn to_query(&self) -> String {
        match self.max_width {
            Some(max) if self.min_width == 0 => format!("(max-width: {max}px)"),
            Some(max) => format!("(min-width: {}px) and (max-width: {max}px)", self.min_width),
            None => format!("(min-width: {}px)", self.min_width),
        }
    }
}

impl Default for WidthRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl FromStr for WidthRange {
    type Err = QueryError;

    fn from_str(query: &str) -> QueryResult<Self> {
        let min_width = capture_px(&MIN_WIDTH, query);
        let max_width = capture_px(&MAX_WIDTH, query);
        if min_width.is_none() && max_width.is_none() {
            return Err(QueryError::NoWidthFeature {
                query: query.to_string(),
            });
        }
        let range = Self::new(min_width.unwrap_or(0), max_width);
        if let Some(max) = range.max_width.filter(|max| *max < range.min_width) {
            return Err(QueryError::InvertedRange {
                min_width: range.min_width,
                max_width: max,
            });
        }
        Ok(range)
    }
}

impl Display for WidthRange {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.max_width {
            Some(max) => write!(formatter, "{}px..={max}px", self.min_width),
            None => write!(formatter, "{}px..", self.min_width),
        }
    }
}

fn capture_px(pattern: &Regex, query: &str) -> Option<u32> {
    pattern
        .captures(query)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}
