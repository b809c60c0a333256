//! Browser-side handle owning a registry and its resize watcher.
//!
//! # Design
//! - The handle is cheap to clone; clones share one registry.
//! - The watcher holds only a weak reference back to the registry, so dropping
//!   the last handle tears down the `resize` listener.
//! - Re-entrant calls from inside a listener callback are reported as
//!   [`ResponsiveError::RegistryBusy`] rather than panicking.

use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use gloo::console;
use responsive_core::{BindOptions, Dimensions, ListenerId, Registry, ResponsiveConfig};

use crate::error::{ResponsiveError, ResponsiveResult};
use crate::watcher::ResizeWatcher;
use crate::window::WindowDimensions;

struct Shared {
    registry: RefCell<Registry<WindowDimensions>>,
    watcher: RefCell<Option<ResizeWatcher>>,
}

/// Listener registry wired to the global window's `resize` event.
#[derive(Clone)]
pub struct Responsive {
    shared: Rc<Shared>,
}

impl Responsive {
    /// Create a handle for the global window and start watching resizes.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::Config`] for invalid configuration and
    /// [`ResponsiveError::WindowUnavailable`] outside a window context.
    pub fn new(config: &ResponsiveConfig) -> ResponsiveResult<Self> {
        config.validate()?;
        let source = WindowDimensions::global().ok_or(ResponsiveError::WindowUnavailable)?;
        let window = source.window().clone();
        let shared = Rc::new(Shared {
            registry: RefCell::new(Registry::with_config(config, source)),
            watcher: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        let watcher = ResizeWatcher::install(&window, config.debounce(), move || {
            dispatch_settled(&weak);
        });
        *shared.watcher.borrow_mut() = Some(watcher);
        Ok(Self { shared })
    }

    /// Bind `callback` to the width range in `query`. See [`Registry::bind`].
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn bind<F>(
        &self,
        namespace: Option<&str>,
        query: &str,
        callback: F,
        options: Option<BindOptions>,
    ) -> ResponsiveResult<ListenerId>
    where
        F: FnMut(Dimensions) + 'static,
    {
        Ok(self
            .registry("bind")?
            .bind(namespace, query, callback, options))
    }

    /// Fire one namespace now. Returns `false` for unknown namespaces.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn fire(&self, namespace: Option<&str>) -> ResponsiveResult<bool> {
        Ok(self.registry("fire")?.fire(namespace))
    }

    /// Fire every namespace now, returning the number of callbacks invoked.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn fire_all(&self) -> ResponsiveResult<usize> {
        Ok(self.registry("fire_all")?.fire_all())
    }

    /// Remove a listener. Returns whether it was still registered.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn unbind(&self, namespace: Option<&str>, id: ListenerId) -> ResponsiveResult<bool> {
        Ok(self.registry("unbind")?.unbind(namespace, id))
    }

    /// Remove every listener of a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn clear(&self, namespace: Option<&str>) -> ResponsiveResult<usize> {
        Ok(self.registry("clear")?.clear(namespace))
    }

    /// Number of listeners registered in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn listener_count(&self, namespace: Option<&str>) -> ResponsiveResult<usize> {
        Ok(self.registry("listener_count")?.listener_count(namespace))
    }

    /// Bind options with unset fields taken from the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ResponsiveError::RegistryBusy`] when called from a callback.
    pub fn options_with_defaults(
        &self,
        fire_once: Option<bool>,
        fire_now: Option<bool>,
    ) -> ResponsiveResult<BindOptions> {
        Ok(self
            .registry("bind")?
            .options_with_defaults(fire_once, fire_now))
    }

    /// Whether a debounced dispatch is scheduled.
    #[must_use]
    pub fn resize_pending(&self) -> bool {
        self.shared
            .watcher
            .borrow()
            .as_ref()
            .is_some_and(ResizeWatcher::has_pending)
    }

    fn registry(
        &self,
        operation: &'static str,
    ) -> ResponsiveResult<RefMut<'_, Registry<WindowDimensions>>> {
        self.shared
            .registry
            .try_borrow_mut()
            .map_err(|_| ResponsiveError::RegistryBusy { operation })
    }
}

fn dispatch_settled(shared: &Weak<Shared>) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    match shared.registry.try_borrow_mut() {
        Ok(mut registry) => {
            registry.fire_all();
        }
        Err(_) => {
            console::error!("resize dispatch skipped", "registry busy");
        }
    }
}
