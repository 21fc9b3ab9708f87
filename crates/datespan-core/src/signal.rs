//! Signal/slot system for Datespan.
//!
//! This module provides a type-safe signal/slot mechanism for communication
//! between the picker's components. Signals are emitted when state changes,
//! and connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Invocation Model
//!
//! Every connection is invoked directly on the emitting thread. The picker
//! core is single-threaded and event-driven: all emissions happen on the UI
//! thread in response to input events, so there is no queued or cross-thread
//! dispatch. `Signal` is still `Send + Sync` so state owners can be shared
//! behind `Arc` without ceremony.
//!
//! # Example
//!
//! ```
//! use datespan_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("2024-01-05".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// A boxed slot closure.
type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with the
/// provided arguments, in connection order.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`ConnectionGuard`] - RAII-style connection that auto-disconnects on drop
/// - [`crate::Property`] - Often paired with signals for change notification
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock signal emission.
    ///
    /// While blocked, [`emit`](Self::emit) does nothing. Returns the previous
    /// blocked state so callers can restore it.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.swap(blocked, Ordering::SeqCst)
    }

    /// Check whether emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking every connected slot with `args`.
    ///
    /// Slots are invoked directly on the calling thread, in connection order.
    /// Slots connected or disconnected by a running slot take effect on the
    /// next emission, not the current one.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "datespan_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so a handler may connect/disconnect without
        // deadlocking on the connection table.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: "datespan_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

/// RAII guard for a signal connection.
///
/// Holds a weak reference to an `Arc`-shared signal and disconnects the slot
/// when dropped. If the signal itself has already been dropped, the guard's
/// drop is a no-op.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use datespan_core::{ConnectionGuard, Signal};
///
/// let signal = Arc::new(Signal::<i32>::new());
/// {
///     let _guard = ConnectionGuard::new(&signal, |n| println!("{}", n));
///     signal.emit(1); // slot runs
/// }
/// signal.emit(2); // guard dropped, slot is gone
/// ```
pub struct ConnectionGuard<Args> {
    signal: Weak<Signal<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// Connect `slot` to `signal`, disconnecting automatically when the
    /// returned guard is dropped.
    pub fn new<F>(signal: &Arc<Signal<Args>>, slot: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = signal.connect(slot);
        Self {
            signal: Arc::downgrade(signal),
            id,
        }
    }

    /// The underlying connection ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            let _ = signal.disconnect(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        let values = received.lock();
        assert_eq!(*values, vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
        // Disconnecting twice reports failure.
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<()>::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        signal.connect(move |()| {
            *count_clone.lock() += 1;
        });

        signal.set_blocked(true);
        signal.emit(());
        assert_eq!(*count.lock(), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_connection_count() {
        let signal = Signal::<()>::new();
        assert_eq!(signal.connection_count(), 0);

        let a = signal.connect(|()| {});
        let _b = signal.connect(|()| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect(a);
        assert_eq!(signal.connection_count(), 1);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard_drops() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let _guard = ConnectionGuard::new(&signal, move |&value| {
                received_clone.lock().push(value);
            });
            signal.emit(7);
        }

        signal.emit(8);
        assert_eq!(*received.lock(), vec![7]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_outliving_signal_is_noop() {
        let signal = Arc::new(Signal::<()>::new());
        let guard = ConnectionGuard::new(&signal, |()| {});
        drop(signal);
        // Dropping the guard after the signal must not panic.
        drop(guard);
    }

    #[test]
    fn test_slot_may_disconnect_other_slot() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        let victim = signal.connect(move |()| {
            *count_clone.lock() += 1;
        });

        let signal_clone = signal.clone();
        signal.connect(move |()| {
            signal_clone.disconnect(victim);
        });

        // First emission runs both slots from the snapshot.
        signal.emit(());
        // Second emission no longer includes the victim.
        signal.emit(());
        assert_eq!(*count.lock(), 1);
    }
}
