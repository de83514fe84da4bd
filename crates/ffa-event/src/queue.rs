//! FIFO queue of after-events awaiting dispatch.

use core::any::{Any, TypeId};
use std::collections::VecDeque;

use crate::event::Event;

/// A queued event waiting to be processed.
pub struct QueuedEvent {
    /// Event payload
    pub payload: Box<dyn Any>,
    /// Event type
    pub event_type_id: TypeId,
    /// Event type name for debugging
    pub event_name: &'static str,
}

impl QueuedEvent {
    pub fn new<E: Event>(event: E) -> Self {
        Self {
            payload: Box::new(event),
            event_type_id: TypeId::of::<E>(),
            event_name: E::name(),
        }
    }

    /// Borrow the payload as `E` if that is its type.
    #[must_use]
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }
}

impl core::fmt::Debug for QueuedEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueuedEvent")
            .field("event_name", &self.event_name)
            .finish_non_exhaustive()
    }
}

/// After-events in the order their actions happened.
#[derive(Default)]
pub struct EventQueue {
    events: VecDeque<QueuedEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<E: Event>(&mut self, event: E) {
        self.events.push_back(QueuedEvent::new(event));
    }

    pub fn pop(&mut self) -> Option<QueuedEvent> {
        self.events.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl core::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.events.len())
            .finish()
    }
}
