//! Core systems for Datespan.
//!
//! This crate provides the foundational components of the Datespan
//! date-range input engine:
//!
//! - **Signal/Slot System**: Type-safe notification between components
//! - **Property System**: Reactive values with change detection
//! - **Tick Scheduler**: Deferred callbacks drained once per UI tick
//!
//! Nothing in this crate knows about dates or popups; the domain logic
//! lives in the `datespan` crate.
//!
//! # Signal/Slot Example
//!
//! ```
//! use datespan_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use datespan_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

pub mod logging;
mod property;
mod scheduler;
mod signal;

pub use property::Property;
pub use scheduler::TickScheduler;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
