//! Dimension source backed by the browser window.

use responsive_core::{DimensionSource, Dimensions, resolve_dimensions};
use web_sys::Window;

/// Reads `innerWidth`/`innerHeight`, falling back to the document element's
/// client size (or the body's) when the viewport values are unavailable.
#[derive(Clone, Debug)]
pub struct WindowDimensions {
    window: Window,
}

impl WindowDimensions {
    /// Wrap an explicit window handle.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }

    /// Use the global `window`, if one exists.
    #[must_use]
    pub fn global() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    /// Underlying window handle.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    fn viewport(&self) -> Option<Dimensions> {
        let width = self.window.inner_width().ok()?.as_f64()?;
        let height = self.window.inner_height().ok()?.as_f64()?;
        Dimensions::from_f64(width, height)
    }

    fn client(&self) -> Option<Dimensions> {
        let document = self.window.document()?;
        if let Some(element) = document.document_element() {
            return Dimensions::from_client(element.client_width(), element.client_height());
        }
        let body = document.body()?;
        Dimensions::from_client(body.client_width(), body.client_height())
    }
}

impl DimensionSource for WindowDimensions {
    fn dimensions(&self) -> Dimensions {
        resolve_dimensions(self.viewport(), || self.client())
    }
}
