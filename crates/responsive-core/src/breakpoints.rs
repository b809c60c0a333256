//! Named breakpoint presets expressed as width ranges.

use crate::query::WidthRange;

/// Individual breakpoint with an inclusive minimum width and optional maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    /// Short label, e.g. `md`.
    pub name: &'static str,
    /// Width range covered by the breakpoint.
    pub range: WidthRange,
}

impl Breakpoint {
    /// Media query string suitable for [`crate::registry::Registry::bind`].
    #[must_use]
    pub fn query(&self) -> String {
        self.range.to_query()
    }
}

/// Phones in portrait.
pub const XS: Breakpoint = Breakpoint {
    name: "xs",
    range: WidthRange::new(0, Some(479)),
};
/// Large phones.
pub const SM: Breakpoint = Breakpoint {
    name: "sm",
    range: WidthRange::new(480, Some(767)),
};
/// Tablets.
pub const MD: Breakpoint = Breakpoint {
    name: "md",
    range: WidthRange::new(768, Some(1023)),
};
/// Small desktops.
pub const LG: Breakpoint = Breakpoint {
    name: "lg",
    range: WidthRange::new(1024, Some(1439)),
};
/// Desktops.
pub const XL: Breakpoint = Breakpoint {
    name: "xl",
    range: WidthRange::new(1440, Some(1919)),
};
/// Wide screens.
pub const XXL: Breakpoint = Breakpoint {
    name: "2xl",
    range: WidthRange::new(1920, None),
};

/// Ordered, non-overlapping presets.
pub const BREAKPOINTS: [Breakpoint; 6] = [XS, SM, MD, LG, XL, XXL];

/// Find the first breakpoint matching the supplied width.
#[must_use]
pub fn for_width(width: u32) -> Breakpoint {
    BREAKPOINTS
        .iter()
        .copied()
        .find(|bp| bp.range.contains(width))
        .unwrap_or(XXL)
}
