//! Deferred one-shot task scheduling.
//!
//! The [`TickScheduler`] holds callbacks to run on the *next* UI tick. The
//! host drives it by calling [`run_pending`](TickScheduler::run_pending)
//! once per tick (per frame, per event-loop turn).
//!
//! The picker uses exactly one deferral pattern: splitting a view-state
//! change across two ticks so the view layer observes two distinct paint
//! frames (a transition cannot fire when visibility and transform change in
//! the same frame). Tasks scheduled *while* the queue is draining therefore
//! run on the following tick, never the current one.
//!
//! # Example
//!
//! ```
//! use datespan_core::TickScheduler;
//!
//! let scheduler = TickScheduler::new();
//! scheduler.defer(|| println!("next tick"));
//! assert_eq!(scheduler.pending_count(), 1);
//!
//! // Host event loop, once per tick:
//! let ran = scheduler.run_pending();
//! assert_eq!(ran, 1);
//! ```

use std::collections::VecDeque;

use parking_lot::Mutex;

/// A boxed deferred task.
type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// A FIFO queue of callbacks deferred to the next tick.
///
/// Cheap to share behind `Arc`; all methods take `&self`.
#[derive(Default)]
pub struct TickScheduler {
    pending: Mutex<VecDeque<DeferredTask>>,
}

impl TickScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue `task` to run on the next tick.
    pub fn defer<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending.lock().push_back(Box::new(task));
    }

    /// Number of tasks waiting for the next tick.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether any tasks are waiting.
    pub fn is_idle(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Run every task that was pending when the tick started.
    ///
    /// Tasks queued by a running task are left for the next call. Returns
    /// the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        // Swap the queue out first so re-entrant defer() calls land on the
        // next tick instead of extending this one.
        let batch: VecDeque<DeferredTask> = std::mem::take(&mut *self.pending.lock());
        let count = batch.len();
        if count > 0 {
            tracing::trace!(target: "datespan_core::scheduler", count, "draining tick queue");
        }

        for task in batch {
            task();
        }
        count
    }

    /// Drop all pending tasks without running them.
    ///
    /// Returns the number of tasks discarded.
    pub fn clear(&self) -> usize {
        let mut pending = self.pending.lock();
        let count = pending.len();
        pending.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_defer_and_run() {
        let scheduler = TickScheduler::new();
        let ran = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let ran = ran.clone();
            scheduler.defer(move || ran.lock().push(i));
        }

        assert_eq!(scheduler.pending_count(), 3);
        assert_eq!(scheduler.run_pending(), 3);
        assert_eq!(*ran.lock(), vec![0, 1, 2]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_reentrant_defer_lands_on_next_tick() {
        let scheduler = Arc::new(TickScheduler::new());
        let ran = Arc::new(Mutex::new(Vec::new()));

        let inner_scheduler = scheduler.clone();
        let inner_ran = ran.clone();
        scheduler.defer(move || {
            inner_ran.lock().push("first");
            let inner_ran = inner_ran.clone();
            inner_scheduler.defer(move || inner_ran.lock().push("second"));
        });

        // First tick runs only the task that was pending at tick start.
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(*ran.lock(), vec!["first"]);
        assert_eq!(scheduler.pending_count(), 1);

        // Second tick runs the task the first one queued.
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(*ran.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_clear_discards_pending() {
        let scheduler = TickScheduler::new();
        scheduler.defer(|| panic!("must not run"));
        assert_eq!(scheduler.clear(), 1);
        assert_eq!(scheduler.run_pending(), 0);
    }

    #[test]
    fn test_run_pending_on_empty_queue() {
        let scheduler = TickScheduler::new();
        assert_eq!(scheduler.run_pending(), 0);
    }
}
