//! Observer registry and dispatch.

use core::any::TypeId;

use hashbrown::HashMap;
use tracing::trace;

use crate::event::{Event, EventResult};
use crate::observer::{Callback, ObserverId, ObserverInfo};
use crate::queue::{EventQueue, QueuedEvent};

/// Registered observers keyed by event type, run against a context `C`.
pub struct EventBus<C> {
    observers: HashMap<TypeId, Vec<ObserverInfo<C>>>,
    next_observer_id: u32,
}

impl<C: 'static> EventBus<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: HashMap::new(),
            next_observer_id: 0,
        }
    }

    fn next_id(&mut self) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        id
    }

    fn add(&mut self, info: ObserverInfo<C>) -> ObserverId {
        let id = info.id;
        self.observers
            .entry(info.event_type_id)
            .or_default()
            .push(info);
        id
    }

    /// Register a cancellable observer for `E`.
    pub fn before<E, F>(&mut self, callback: F) -> ObserverId
    where
        E: Event,
        F: Fn(&mut C, &E) -> EventResult + 'static,
    {
        let id = self.next_id();
        self.add(ObserverInfo::before::<E, F>(id, callback))
    }

    /// Register a notification observer for `E`.
    pub fn after<E, F>(&mut self, callback: F) -> ObserverId
    where
        E: Event,
        F: Fn(&mut C, &E) + 'static,
    {
        let id = self.next_id();
        self.add(ObserverInfo::after::<E, F>(id, callback))
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        for observers in self.observers.values_mut() {
            if let Some(index) = observers.iter().position(|info| info.id == id) {
                observers.remove(index);
                return true;
            }
        }
        false
    }

    /// Number of observers registered for `E`, both phases.
    #[must_use]
    pub fn observer_count<E: Event>(&self) -> usize {
        self.observers.get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    /// Run every before-observer of `E` in registration order.
    ///
    /// All observers run even after one cancels.
    pub fn dispatch_before<E: Event>(&self, ctx: &mut C, event: &E) -> EventResult {
        let Some(observers) = self.observers.get(&TypeId::of::<E>()) else {
            return EventResult::Allow;
        };

        let mut result = EventResult::Allow;
        for info in observers {
            if let Callback::Before(callback) = &info.callback {
                result = result.and(callback(ctx, event as &dyn core::any::Any));
            }
        }

        if result.is_cancelled() {
            trace!("{} cancelled", E::name());
        }
        result
    }

    /// Run every after-observer of `E` in registration order. Returns how
    /// many ran.
    pub fn dispatch_after<E: Event>(&self, ctx: &mut C, event: &E) -> usize {
        self.dispatch_erased(ctx, TypeId::of::<E>(), event)
    }

    fn dispatch_erased(&self, ctx: &mut C, type_id: TypeId, event: &dyn core::any::Any) -> usize {
        let Some(observers) = self.observers.get(&type_id) else {
            return 0;
        };

        let mut ran = 0;
        for info in observers {
            if let Callback::After(callback) = &info.callback {
                callback(ctx, event);
                ran += 1;
            }
        }
        ran
    }

    /// Dispatch one queued after-event.
    pub fn dispatch_queued(&self, ctx: &mut C, queued: &QueuedEvent) -> usize {
        trace!("Dispatching {}", queued.event_name);
        self.dispatch_erased(ctx, queued.event_type_id, queued.payload.as_ref())
    }

    /// Dispatch and remove every queued event in arrival order. Returns the
    /// number of events processed.
    pub fn flush(&self, ctx: &mut C, queue: &mut EventQueue) -> usize {
        let mut processed = 0;
        while let Some(queued) = queue.pop() {
            self.dispatch_queued(ctx, &queued);
            processed += 1;
        }
        processed
    }
}

impl<C: 'static> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.observers.len())
            .field("next_observer_id", &self.next_observer_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ItemUse {
        item: &'static str,
    }

    struct Died {
        victim: u32,
    }

    #[derive(Default)]
    struct Log(Vec<String>);

    #[test]
    fn test_before_any_cancel_cancels() {
        let mut bus = EventBus::<Log>::new();
        bus.before::<ItemUse, _>(|log, event| {
            log.0.push(format!("first {}", event.item));
            EventResult::Cancel
        });
        bus.before::<ItemUse, _>(|log, event| {
            log.0.push(format!("second {}", event.item));
            EventResult::Allow
        });

        let mut log = Log::default();
        let result = bus.dispatch_before(&mut log, &ItemUse { item: "pearl" });

        assert_eq!(result, EventResult::Cancel);
        assert_eq!(log.0, vec!["first pearl", "second pearl"]);
    }

    #[test]
    fn test_no_observers_allows() {
        let bus = EventBus::<Log>::new();
        let mut log = Log::default();
        assert_eq!(
            bus.dispatch_before(&mut log, &ItemUse { item: "boat" }),
            EventResult::Allow
        );
        assert_eq!(bus.dispatch_after(&mut log, &Died { victim: 1 }), 0);
    }

    #[test]
    fn test_phases_do_not_mix() {
        let mut bus = EventBus::<Log>::new();
        bus.before::<Died, _>(|log, _| {
            log.0.push("before".into());
            EventResult::Allow
        });
        bus.after::<Died, _>(|log, event| log.0.push(format!("after {}", event.victim)));

        let mut log = Log::default();
        assert_eq!(bus.dispatch_after(&mut log, &Died { victim: 3 }), 1);
        assert_eq!(log.0, vec!["after 3"]);
        assert_eq!(bus.observer_count::<Died>(), 2);
    }

    #[test]
    fn test_flush_preserves_arrival_order() {
        let mut bus = EventBus::<Log>::new();
        bus.after::<Died, _>(|log, event| log.0.push(format!("died {}", event.victim)));
        bus.after::<ItemUse, _>(|log, event| log.0.push(format!("used {}", event.item)));

        let mut queue = EventQueue::new();
        queue.push(Died { victim: 1 });
        queue.push(ItemUse { item: "bow" });
        queue.push(Died { victim: 2 });

        let mut log = Log::default();
        assert_eq!(bus.flush(&mut log, &mut queue), 3);
        assert!(queue.is_empty());
        assert_eq!(log.0, vec!["died 1", "used bow", "died 2"]);
    }

    #[test]
    fn test_remove_observer() {
        let mut bus = EventBus::<Log>::new();
        let id = bus.after::<Died, _>(|log, _| log.0.push("x".into()));

        assert!(bus.remove(id));
        assert!(!bus.remove(id));

        let mut log = Log::default();
        bus.dispatch_after(&mut log, &Died { victim: 1 });
        assert!(log.0.is_empty());
    }
}
