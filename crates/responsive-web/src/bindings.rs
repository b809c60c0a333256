//! Script-facing facade exported through `wasm-bindgen`.
//!
//! ```js
//! const responsive = new ResponsiveJS();
//! responsive.bind("(min-width: 320px) and (max-width: 800px)", (dims) => console.log(dims.w));
//! ```

use gloo::console;
use js_sys::{Function, Object, Reflect};
use responsive_core::{Dimensions, ListenerId, ResponsiveConfig};
use wasm_bindgen::prelude::*;

use crate::handle::Responsive;

/// JavaScript wrapper around [`Responsive`].
#[wasm_bindgen(js_name = ResponsiveJS)]
pub struct ResponsiveJs {
    inner: Responsive,
}

#[wasm_bindgen(js_class = ResponsiveJS)]
impl ResponsiveJs {
    /// Create a handle, optionally from a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Rejects invalid configuration or a missing `window`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<Self, JsValue> {
        let config = match config {
            Some(raw) => ResponsiveConfig::from_json_str(&raw).map_err(to_js_error)?,
            None => ResponsiveConfig::default(),
        };
        let inner = Responsive::new(&config).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Bind `callback` to the width range in `query`, returning the listener id.
    ///
    /// # Errors
    ///
    /// Fails when called from inside a listener callback.
    pub fn bind(
        &self,
        query: &str,
        callback: Function,
        namespace: Option<String>,
        fire_once: Option<bool>,
        fire_now: Option<bool>,
    ) -> Result<f64, JsValue> {
        let options = self
            .inner
            .options_with_defaults(fire_once, fire_now)
            .map_err(to_js_error)?;
        let id = self
            .inner
            .bind(
                namespace.as_deref(),
                query,
                move |dims| invoke(&callback, dims),
                Some(options),
            )
            .map_err(to_js_error)?;
        #[allow(clippy::cast_precision_loss)]
        let raw = id.get() as f64;
        Ok(raw)
    }

    /// Fire a namespace now. Returns `false` when it has never been bound.
    ///
    /// # Errors
    ///
    /// Fails when called from inside a listener callback.
    pub fn fire(&self, namespace: Option<String>) -> Result<bool, JsValue> {
        self.inner.fire(namespace.as_deref()).map_err(to_js_error)
    }

    /// Remove a listener by id.
    ///
    /// # Errors
    ///
    /// Fails when called from inside a listener callback.
    pub fn unbind(&self, namespace: Option<String>, id: f64) -> Result<bool, JsValue> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let id = ListenerId::from_raw(id as u64);
        self.inner
            .unbind(namespace.as_deref(), id)
            .map_err(to_js_error)
    }
}

fn invoke(callback: &Function, dims: Dimensions) {
    let payload = Object::new();
    let set = Reflect::set(&payload, &"w".into(), &dims.width.into())
        .and_then(|_| Reflect::set(&payload, &"h".into(), &dims.height.into()));
    if let Err(err) = set.and_then(|_| callback.call1(&JsValue::NULL, &payload)) {
        console::error!("responsive listener failed", err);
    }
}

fn to_js_error(err: impl std::error::Error) -> JsValue {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    JsValue::from_str(&message)
}
