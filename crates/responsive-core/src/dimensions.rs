//! Viewport dimension model and the sources that supply it.
//!
//! # Design
//! - Listeners are evaluated against a [`Dimensions`] snapshot read once per fire.
//! - [`DimensionSource`] is the seam between the DOM-free registry and whatever
//!   knows the current size (a browser window, a terminal, a test fixture).
//! - Viewport (inner) dimensions are preferred; client dimensions of the
//!   document element are the fallback, see [`resolve_dimensions`].

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Viewport size in CSS pixels handed to every listener callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    #[serde(rename = "w")]
    pub width: u32,
    /// Height in pixels.
    #[serde(rename = "h")]
    pub height: u32,
}

impl Dimensions {
    /// Construct a snapshot from integral pixel values.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert floating point viewport values, truncating fractional pixels.
    ///
    /// Returns `None` when either value is negative, NaN or infinite.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_f64(width: f64, height: f64) -> Option<Self> {
        let valid = |value: f64| value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX);
        (valid(width) && valid(height)).then(|| Self::new(width as u32, height as u32))
    }

    /// Convert signed client values as reported by DOM elements.
    #[must_use]
    pub fn from_client(width: i32, height: i32) -> Option<Self> {
        Some(Self::new(
            u32::try_from(width).ok()?,
            u32::try_from(height).ok()?,
        ))
    }
}

/// Supplier of the current viewport size.
pub trait DimensionSource {
    /// Read the current dimensions.
    fn dimensions(&self) -> Dimensions;
}

impl<T: DimensionSource + ?Sized> DimensionSource for &T {
    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }
}

impl<T: DimensionSource + ?Sized> DimensionSource for Rc<T> {
    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }
}

/// Source that always reports the same size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedDimensions(pub Dimensions);

impl DimensionSource for FixedDimensions {
    fn dimensions(&self) -> Dimensions {
        self.0
    }
}

/// Shared, externally updated source.
///
/// Clones observe the same value, so one clone can be handed to a registry
/// while another is driven by an event pump or a test.
#[derive(Clone, Debug, Default)]
pub struct ManualDimensions {
    current: Rc<Cell<Dimensions>>,
}

impl ManualDimensions {
    /// Create a source starting at `initial`.
    #[must_use]
    pub fn new(initial: Dimensions) -> Self {
        Self {
            current: Rc::new(Cell::new(initial)),
        }
    }

    /// Replace the reported size.
    pub fn set(&self, dimensions: Dimensions) {
        self.current.set(dimensions);
    }

    /// Replace only the width, keeping the current height.
    pub fn set_width(&self, width: u32) {
        let current = self.current.get();
        self.current.set(Dimensions::new(width, current.height));
    }
}

impl DimensionSource for ManualDimensions {
    fn dimensions(&self) -> Dimensions {
        self.current.get()
    }
}

/// Pick viewport dimensions when available, else query the client fallback.
///
/// The fallback is only evaluated when the viewport reading is missing. When
/// neither is available the zero size is reported.
pub fn resolve_dimensions<F>(viewport: Option<Dimensions>, client: F) -> Dimensions
where
    F: FnOnce() -> Option<Dimensions>,
{
    if let Some(dimensions) = viewport {
        return dimensions;
    }
    if let Some(dimensions) = client() {
        tracing::trace!(
            width = dimensions.width,
            height = dimensions.height,
            "viewport size unavailable; using client size"
        );
        return dimensions;
    }
    tracing::debug!("no dimension reading available; reporting zero size");
    Dimensions::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_wins_over_client() {
        let mut consulted = false;
        let dims = resolve_dimensions(Some(Dimensions::new(1280, 720)), || {
            consulted = true;
            Some(Dimensions::new(1, 1))
        });
        assert_eq!(dims, Dimensions::new(1280, 720));
        assert!(!consulted);
    }

    #[test]
    fn client_used_when_viewport_missing() {
        let dims = resolve_dimensions(None, || Some(Dimensions::new(800, 600)));
        assert_eq!(dims, Dimensions::new(800, 600));
    }

    #[test]
    fn zero_when_nothing_available() {
        assert_eq!(resolve_dimensions(None, || None), Dimensions::default());
    }

    #[test]
    fn float_conversion_truncates_and_rejects_invalid() {
        assert_eq!(
            Dimensions::from_f64(1024.75, 768.2),
            Some(Dimensions::new(1024, 768))
        );
        assert_eq!(Dimensions::from_f64(-1.0, 10.0), None);
        assert_eq!(Dimensions::from_f64(f64::NAN, 10.0), None);
        assert_eq!(Dimensions::from_f64(10.0, f64::INFINITY), None);
    }

    #[test]
    fn client_conversion_rejects_negative_values() {
        assert_eq!(Dimensions::from_client(640, 480), Some(Dimensions::new(640, 480)));
        assert_eq!(Dimensions::from_client(-1, 480), None);
    }

    #[test]
    fn manual_source_is_shared_between_clones() {
        let source = ManualDimensions::new(Dimensions::new(320, 640));
        let observer = source.clone();
        source.set_width(1024);
        assert_eq!(observer.dimensions(), Dimensions::new(1024, 640));
    }

    #[test]
    fn serializes_with_short_keys() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(Dimensions::new(3, 4))?;
        assert_eq!(json, serde_json::json!({ "w": 3, "h": 4 }));
        Ok(())
    }
}
