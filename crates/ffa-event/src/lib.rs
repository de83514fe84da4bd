//! Event bus for host game events.
//!
//! # Phases
//!
//! - **Before-events** are dispatched synchronously while the host waits. Every
//!   observer runs; if any returns [`EventResult::Cancel`] the host must not
//!   commit the action.
//! - **After-events** are notifications. Hosts push them onto an
//!   [`EventQueue`] as actions happen and the server flushes the queue once
//!   per tick, in arrival order.
//!
//! # Example
//!
//! ```ignore
//! let mut bus = EventBus::<Session>::new();
//!
//! bus.before::<ItemUse, _>(|session, event| {
//!     if session.may_use(event) { EventResult::Allow } else { EventResult::Cancel }
//! });
//! bus.after::<EntityDied, _>(|session, event| session.on_death(event));
//!
//! queue.push(EntityDied { .. });
//! bus.flush(&mut session, &mut queue);
//! ```

mod bus;
mod event;
mod observer;
mod queue;

pub use bus::EventBus;
pub use event::{Event, EventResult};
pub use observer::ObserverId;
pub use queue::{EventQueue, QueuedEvent};
