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
//! Browser glue for the responsive listener registry.
//!
//! On wasm32 this crate reads viewport dimensions from `window`, installs a
//! debounced `resize` listener and exports a `ResponsiveJS` class to script
//! code. The error types compile everywhere so hosts can match on them.

pub mod error;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod handle;
#[cfg(target_arch = "wasm32")]
mod watcher;
#[cfg(target_arch = "wasm32")]
mod window;

pub use error::{ResponsiveError, ResponsiveResult};

#[cfg(target_arch = "wasm32")]
pub use bindings::ResponsiveJs;
#[cfg(target_arch = "wasm32")]
pub use handle::Responsive;
#[cfg(target_arch = "wasm32")]
pub use watcher::ResizeWatcher;
#[cfg(target_arch = "wasm32")]
pub use window::WindowDimensions;
