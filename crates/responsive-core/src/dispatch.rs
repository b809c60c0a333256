//! Host-side debounced resize dispatcher built on `tokio`.
//!
//! # Design
//! - Resize notifications arrive on an `mpsc` channel; each one restarts the
//!   quiet-period timer. When the timer expires every namespace is fired once.
//! - The dispatcher borrows the registry for the duration of [`ResizeDispatcher::run`],
//!   so it runs on the task that owns the registry and needs no locking.
//! - Closing the channel while a dispatch is pending flushes it immediately.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

use crate::debounce::DebouncePolicy;
use crate::dimensions::DimensionSource;
use crate::registry::Registry;

/// Notification that the viewport changed size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeEvent;

/// Counters describing a finished [`ResizeDispatcher::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    /// Resize notifications received.
    pub resize_events: u64,
    /// Debounced dispatches performed.
    pub dispatches: u64,
    /// Callbacks invoked across all dispatches.
    pub callbacks: u64,
}

/// Debounced dispatcher that fires a registry after resize bursts settle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResizeDispatcher {
    policy: DebouncePolicy,
}

impl ResizeDispatcher {
    /// Create a dispatcher using `policy`.
    #[must_use]
    pub const fn new(policy: DebouncePolicy) -> Self {
        Self { policy }
    }

    /// Active debounce policy.
    #[must_use]
    pub const fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    /// Consume resize events until the sender side is dropped.
    pub async fn run<S: DimensionSource>(
        &self,
        registry: &mut Registry<S>,
        events: &mut UnboundedReceiver<ResizeEvent>,
    ) -> DispatchStats {
        let mut stats = DispatchStats::default();
        while events.recv().await.is_some() {
            stats.resize_events += 1;
            if !self.policy.is_immediate() {
                stats.resize_events += self.settle(events).await;
            }
            let invoked = registry.fire_all();
            stats.dispatches += 1;
            stats.callbacks += invoked as u64;
            tracing::debug!(
                dispatch = stats.dispatches,
                invoked,
                "debounced resize dispatched"
            );
        }
        tracing::debug!(
            resize_events = stats.resize_events,
            dispatches = stats.dispatches,
            "resize channel closed"
        );
        stats
    }

    /// Wait until no event arrives for a full delay, counting restarts.
    async fn settle(&self, events: &mut UnboundedReceiver<ResizeEvent>) -> u64 {
        let mut restarts = 0;
        loop {
            tokio::select! {
                next = events.recv() => match next {
                    Some(ResizeEvent) => restarts += 1,
                    None => return restarts,
                },
                () = sleep(self.policy.delay()) => return restarts,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{Dimensions, ManualDimensions};
    use crate::registry::BindOptions;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn burst_of_events_dispatches_once() {
        let source = ManualDimensions::new(Dimensions::new(300, 600));
        let mut registry = Registry::new(source.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            registry.bind(
                None,
                "(min-width: 320px)",
                move |dims: Dimensions| seen.borrow_mut().push(dims.width),
                Some(BindOptions::default().with_fire_now(false)),
            );
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = ResizeDispatcher::new(DebouncePolicy::from_millis(100));
        let producer = async move {
            for width in [400, 500, 640] {
                source.set_width(width);
                let _ = tx.send(ResizeEvent);
                sleep(Duration::from_millis(30)).await;
            }
            sleep(Duration::from_millis(200)).await;
            source.set_width(1024);
            let _ = tx.send(ResizeEvent);
        };

        let (stats, ()) = tokio::join!(dispatcher.run(&mut registry, &mut rx), producer);

        assert_eq!(stats.resize_events, 4);
        assert_eq!(stats.dispatches, 2);
        assert_eq!(stats.callbacks, 2);
        assert_eq!(*seen.borrow(), vec![640, 1024]);
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_policy_dispatches_every_event() {
        let mut registry = Registry::new(ManualDimensions::new(Dimensions::new(800, 600)));
        let count = Rc::new(RefCell::new(0_u32));
        {
            let count = Rc::clone(&count);
            registry.bind(
                None,
                "",
                move |_| *count.borrow_mut() += 1,
                Some(BindOptions::default().with_fire_now(false)),
            );
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        for _ in 0..3 {
            let _ = tx.send(ResizeEvent);
        }
        drop(tx);

        let stats = ResizeDispatcher::new(DebouncePolicy::from_millis(0))
            .run(&mut registry, &mut rx)
            .await;
        assert_eq!(stats.dispatches, 3);
        assert_eq!(*count.borrow(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fire_once_survives_only_first_dispatch() {
        let source = ManualDimensions::new(Dimensions::new(500, 600));
        let mut registry = Registry::new(source.clone());
        let count = Rc::new(RefCell::new(0_u32));
        {
            let count = Rc::clone(&count);
            registry.bind(
                Some("banner"),
                "(max-width: 767px)",
                move |_| *count.borrow_mut() += 1,
                Some(BindOptions::once().with_fire_now(false)),
            );
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let producer = async move {
            for _ in 0..3 {
                let _ = tx.send(ResizeEvent);
                sleep(Duration::from_millis(250)).await;
            }
        };
        let dispatcher = ResizeDispatcher::default();
        let (stats, ()) = tokio::join!(dispatcher.run(&mut registry, &mut rx), producer);

        assert_eq!(stats.dispatches, 3);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(registry.listener_count(Some("banner")), 0);
    }
}
