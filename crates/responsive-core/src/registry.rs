//! Namespaced listener registry.
//!
//! # Design
//! - A [`Registry`] is a plain value owning its [`DimensionSource`]; nothing is
//!   global, so callers inject the registry wherever dispatch happens.
//! - Listeners fire in insertion order within a namespace. Namespaces are
//!   visited in the order they were first bound to.
//! - Dimensions are read once per `fire`/`fire_all` and shared by every
//!   listener evaluated in that pass.
//! - `fire_once` listeners are removed the first time they match, including a
//!   match during the immediate evaluation at bind time.

use std::fmt::{self, Debug, Formatter};

use crate::config::ResponsiveConfig;
use crate::dimensions::{DimensionSource, Dimensions};
use crate::query::WidthRange;

/// Callback invoked with the current dimensions when a listener matches.
pub type Callback = Box<dyn FnMut(Dimensions)>;

/// Identifier assigned to each bound listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Rebuild an identifier from its raw value (e.g. one handed to script code).
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Per-listener behaviour flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindOptions {
    /// Remove the listener after its first matching evaluation.
    pub fire_once: bool,
    /// Evaluate the listener against the current dimensions while binding.
    pub fire_now: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            fire_once: false,
            fire_now: true,
        }
    }
}

impl BindOptions {
    /// Options for a listener that should fire at most once.
    #[must_use]
    pub const fn once() -> Self {
        Self {
            fire_once: true,
            fire_now: true,
        }
    }

    /// Builder toggle for [`Self::fire_now`].
    #[must_use]
    pub const fn with_fire_now(mut self, fire_now: bool) -> Self {
        self.fire_now = fire_now;
        self
    }
}

/// A callback bound to a width range.
pub struct Listener {
    id: ListenerId,
    range: WidthRange,
    options: BindOptions,
    callback: Callback,
}

impl Listener {
    /// Identifier assigned at bind time.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Width range parsed from the bound query.
    #[must_use]
    pub const fn range(&self) -> WidthRange {
        self.range
    }

    /// Options supplied at bind time.
    #[must_use]
    pub const fn options(&self) -> BindOptions {
        self.options
    }

    /// Run the callback when `dimensions` fall inside the range.
    ///
    /// Returns whether the listener matched.
    fn evaluate(&mut self, dimensions: Dimensions) -> bool {
        let matched = self.range.contains(dimensions.width);
        tracing::trace!(
            listener = self.id.get(),
            width = dimensions.width,
            range = %self.range,
            matched,
            "evaluated listener"
        );
        if matched {
            (self.callback)(dimensions);
        }
        matched
    }
}

impl Debug for Listener {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Listener")
            .field("id", &self.id)
            .field("range", &self.range)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Namespace {
    name: String,
    listeners: Vec<Listener>,
}

impl Namespace {
    /// Evaluate every listener in order, dropping matched one-shot listeners.
    fn fire(&mut self, dimensions: Dimensions) -> usize {
        let mut invoked = 0;
        self.listeners.retain_mut(|listener| {
            let matched = listener.evaluate(dimensions);
            if matched {
                invoked += 1;
            }
            !(matched && listener.options.fire_once)
        });
        invoked
    }
}

/// Listener registry keyed by namespace.
pub struct Registry<S> {
    source: S,
    namespaces: Vec<Namespace>,
    default_namespace: String,
    default_fire_now: bool,
    next_id: u64,
}

impl<S: DimensionSource> Registry<S> {
    /// Create an empty registry with default configuration.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(&ResponsiveConfig::default(), source)
    }

    /// Create an empty registry using `config` for namespace and bind defaults.
    #[must_use]
    pub fn with_config(config: &ResponsiveConfig, source: S) -> Self {
        Self {
            source,
            namespaces: Vec::new(),
            default_namespace: config.default_namespace.clone(),
            default_fire_now: config.fire_now,
            next_id: 1,
        }
    }

    /// Dimension source consulted on every fire.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Namespace used when callers pass `None`.
    #[must_use]
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Whether listeners bound without options are evaluated at bind time.
    #[must_use]
    pub const fn default_fire_now(&self) -> bool {
        self.default_fire_now
    }

    /// Bind options with unset fields taken from the registry defaults.
    #[must_use]
    pub fn options_with_defaults(
        &self,
        fire_once: Option<bool>,
        fire_now: Option<bool>,
    ) -> BindOptions {
        BindOptions {
            fire_once: fire_once.unwrap_or(false),
            fire_now: fire_now.unwrap_or(self.default_fire_now),
        }
    }

    /// Register `callback` for the width range described by `query`.
    ///
    /// Unrecognised or missing width features default to an unbounded range.
    /// When `options` is `None` the registry defaults apply. With `fire_now`
    /// the listener is evaluated against the current dimensions before this
    /// returns.
    pub fn bind<F>(
        &mut self,
        namespace: Option<&str>,
        query: &str,
        callback: F,
        options: Option<BindOptions>,
    ) -> ListenerId
    where
        F: FnMut(Dimensions) + 'static,
    {
        let options = options.unwrap_or_else(|| self.options_with_defaults(None, None));
        let range = WidthRange::parse(query);
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let mut listener = Listener {
            id,
            range,
            options,
            callback: Box::new(callback),
        };
        let name = namespace.unwrap_or(&self.default_namespace).to_string();
        tracing::debug!(
            namespace = %name,
            listener = id.get(),
            range = %range,
            fire_once = options.fire_once,
            fire_now = options.fire_now,
            "listener bound"
        );

        let consumed = options.fire_now
            && listener.evaluate(self.source.dimensions())
            && options.fire_once;
        let entry = self.namespace_entry(name);
        if !consumed {
            entry.listeners.push(listener);
        }
        id
    }

    /// Evaluate every listener in `namespace` against the current dimensions.
    ///
    /// Returns `false` when the namespace has never been bound to.
    pub fn fire(&mut self, namespace: Option<&str>) -> bool {
        let name = namespace.unwrap_or(&self.default_namespace);
        let Some(index) = self.namespaces.iter().position(|ns| ns.name == name) else {
            tracing::debug!(namespace = %name, "fire on unknown namespace");
            return false;
        };
        let dimensions = self.source.dimensions();
        let entry = &mut self.namespaces[index];
        let invoked = entry.fire(dimensions);
        tracing::debug!(
            namespace = %entry.name,
            width = dimensions.width,
            height = dimensions.height,
            invoked,
            "namespace fired"
        );
        true
    }

    /// Evaluate every namespace, reading dimensions once.
    ///
    /// Returns the number of callbacks invoked.
    pub fn fire_all(&mut self) -> usize {
        let dimensions = self.source.dimensions();
        let invoked = self
            .namespaces
            .iter_mut()
            .map(|entry| entry.fire(dimensions))
            .sum();
        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            namespaces = self.namespaces.len(),
            invoked,
            "all namespaces fired"
        );
        invoked
    }

    /// Remove a listener. Returns whether it was still registered.
    pub fn unbind(&mut self, namespace: Option<&str>, id: ListenerId) -> bool {
        let name = namespace.unwrap_or(&self.default_namespace);
        let Some(entry) = self.namespaces.iter_mut().find(|ns| ns.name == name) else {
            return false;
        };
        let before = entry.listeners.len();
        entry.listeners.retain(|listener| listener.id != id);
        let removed = entry.listeners.len() != before;
        if removed {
            tracing::debug!(namespace = %name, listener = id.get(), "listener unbound");
        }
        removed
    }

    /// Drop every listener in `namespace`, returning how many were removed.
    ///
    /// The namespace stays registered, so a later `fire` still returns `true`.
    pub fn clear(&mut self, namespace: Option<&str>) -> usize {
        let name = namespace.unwrap_or(&self.default_namespace);
        self.namespaces
            .iter_mut()
            .find(|ns| ns.name == name)
            .map_or(0, |entry| {
                let removed = entry.listeners.len();
                entry.listeners.clear();
                removed
            })
    }

    /// Number of listeners currently registered in `namespace`.
    #[must_use]
    pub fn listener_count(&self, namespace: Option<&str>) -> usize {
        let name = namespace.unwrap_or(&self.default_namespace);
        self.namespaces
            .iter()
            .find(|ns| ns.name == name)
            .map_or(0, |entry| entry.listeners.len())
    }

    /// Listeners of `namespace` in evaluation order.
    pub fn listeners<'a>(
        &'a self,
        namespace: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Listener> {
        let name = namespace.unwrap_or(&self.default_namespace);
        self.namespaces
            .iter()
            .filter(move |ns| ns.name == name)
            .flat_map(|ns| ns.listeners.iter())
    }

    /// Registered namespace names in first-bind order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(|ns| ns.name.as_str())
    }

    fn namespace_entry(&mut self, name: String) -> &mut Namespace {
        let index = match self.namespaces.iter().position(|ns| ns.name == name) {
            Some(index) => index,
            None => {
                self.namespaces.push(Namespace {
                    name,
                    listeners: Vec::new(),
                });
                self.namespaces.len() - 1
            }
        };
        &mut self.namespaces[index]
    }
}

impl<S> Debug for Registry<S> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("namespaces", &self.namespaces)
            .field("default_namespace", &self.default_namespace)
            .finish_non_exhaustive()
    }
}
