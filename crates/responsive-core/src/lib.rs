#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! DOM-free core of the responsive listener toolkit.
//!
//! Callers bind callbacks to viewport width ranges written as simplified media
//! queries (`(min-width: 320px) and (max-width: 800px)`), grouped by namespace.
//! Firing a namespace reads the current [`Dimensions`] once and invokes every
//! matching listener in insertion order.
//!
//! Layout: `query.rs` (width-range parsing), `registry.rs` (namespaced
//! listeners), `dimensions.rs` (size model and sources), `debounce.rs` +
//! `dispatch.rs` (resize debouncing), `config.rs`/`defaults.rs`, `error.rs`.

pub mod breakpoints;
pub mod config;
pub mod debounce;
pub mod defaults;
pub mod dimensions;
#[cfg(not(target_arch = "wasm32"))]
pub mod dispatch;
pub mod error;
pub mod query;
pub mod registry;

pub use config::ResponsiveConfig;
pub use debounce::DebouncePolicy;
pub use dimensions::{
    DimensionSource, Dimensions, FixedDimensions, ManualDimensions, resolve_dimensions,
};
#[cfg(not(target_arch = "wasm32"))]
pub use dispatch::{DispatchStats, ResizeDispatcher, ResizeEvent};
pub use error::{ConfigError, ConfigResult, QueryError, QueryResult};
pub use query::WidthRange;
pub use registry::{BindOptions, Callback, Listener, ListenerId, Registry};
