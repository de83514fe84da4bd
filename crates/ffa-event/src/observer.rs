//! Observer registration records.

use core::any::{Any, TypeId};

use crate::event::{Event, EventResult};

/// Unique identifier for a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

impl ObserverId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

pub(crate) type BeforeFn<C> = Box<dyn Fn(&mut C, &dyn Any) -> EventResult>;
pub(crate) type AfterFn<C> = Box<dyn Fn(&mut C, &dyn Any)>;

/// Type-erased observer callback.
pub(crate) enum Callback<C> {
    Before(BeforeFn<C>),
    After(AfterFn<C>),
}

/// Metadata for a registered observer.
pub(crate) struct ObserverInfo<C> {
    pub id: ObserverId,
    pub event_type_id: TypeId,
    pub event_name: &'static str,
    pub callback: Callback<C>,
}

impl<C> core::fmt::Debug for ObserverInfo<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let phase = match self.callback {
            Callback::Before(_) => "before",
            Callback::After(_) => "after",
        };
        f.debug_struct("ObserverInfo")
            .field("id", &self.id)
            .field("event_name", &self.event_name)
            .field("phase", &phase)
            .finish_non_exhaustive()
    }
}

impl<C: 'static> ObserverInfo<C> {
    pub(crate) fn before<E, F>(id: ObserverId, callback: F) -> Self
    where
        E: Event,
        F: Fn(&mut C, &E) -> EventResult + 'static,
    {
        Self {
            id,
            event_type_id: TypeId::of::<E>(),
            event_name: E::name(),
            callback: Callback::Before(Box::new(move |ctx: &mut C, event: &dyn Any| {
                event
                    .downcast_ref::<E>()
                    .map_or(EventResult::Allow, |event| callback(ctx, event))
            })),
        }
    }

    pub(crate) fn after<E, F>(id: ObserverId, callback: F) -> Self
    where
        E: Event,
        F: Fn(&mut C, &E) + 'static,
    {
        Self {
            id,
            event_type_id: TypeId::of::<E>(),
            event_name: E::name(),
            callback: Callback::After(Box::new(move |ctx: &mut C, event: &dyn Any| {
                if let Some(event) = event.downcast_ref::<E>() {
                    callback(ctx, event);
                }
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping(u32);

    #[test]
    fn test_after_observer_downcasts() {
        let info = ObserverInfo::<u32>::after::<Ping, _>(ObserverId(7), |total, ping| {
            *total += ping.0;
        });
        assert_eq!(info.event_type_id, TypeId::of::<Ping>());
        assert_eq!(info.id.raw(), 7);

        let mut total = 0;
        if let Callback::After(callback) = &info.callback {
            callback(&mut total, &Ping(42) as &dyn Any);
            // Wrong payload type is ignored.
            callback(&mut total, &"not a ping" as &dyn Any);
        }
        assert_eq!(total, 42);
    }

    #[test]
    fn test_before_observer_returns_verdict() {
        let info = ObserverInfo::<()>::before::<Ping, _>(ObserverId(0), |(), ping| {
            if ping.0 > 10 {
                EventResult::Cancel
            } else {
                EventResult::Allow
            }
        });

        let Callback::Before(callback) = &info.callback else {
            panic!("expected before observer");
        };
        assert_eq!(callback(&mut (), &Ping(11) as &dyn Any), EventResult::Cancel);
        assert_eq!(callback(&mut (), &Ping(1) as &dyn Any), EventResult::Allow);
    }
}
