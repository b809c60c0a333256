//! Debounced `resize` listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use responsive_core::DebouncePolicy;
use web_sys::Window;

/// Installs a `resize` listener that calls `on_settled` once resizing pauses.
///
/// Every resize event drops the pending [`Timeout`], which cancels it, and
/// schedules a fresh one. Dropping the watcher removes the listener and any
/// pending timer.
pub struct ResizeWatcher {
    _listener: EventListener,
    pending: Rc<RefCell<Option<Timeout>>>,
    armed: Rc<Cell<bool>>,
    policy: DebouncePolicy,
}

impl ResizeWatcher {
    /// Attach to `window` using `policy`.
    pub fn install<F>(window: &Window, policy: DebouncePolicy, on_settled: F) -> Self
    where
        F: Fn() + 'static,
    {
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let armed = Rc::new(Cell::new(false));
        let on_settled = Rc::new(on_settled);
        let listener = EventListener::new(window, "resize", {
            let pending = Rc::clone(&pending);
            let armed = Rc::clone(&armed);
            move |_event| {
                if policy.is_immediate() {
                    on_settled();
                    return;
                }
                if let Some(timeout) = pending.borrow_mut().take() {
                    drop(timeout);
                }
                let on_settled = Rc::clone(&on_settled);
                let fired = Rc::clone(&armed);
                armed.set(true);
                *pending.borrow_mut() = Some(Timeout::new(policy.delay_ms(), move || {
                    fired.set(false);
                    on_settled();
                }));
            }
        });
        tracing::debug!(delay_ms = policy.delay_ms(), "resize watcher installed");
        Self {
            _listener: listener,
            pending,
            armed,
            policy,
        }
    }

    /// Debounce policy in effect.
    #[must_use]
    pub const fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    /// Whether a debounced dispatch is waiting to run.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.armed.get()
    }
}
