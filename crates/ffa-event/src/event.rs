//! Event marker trait and before-event verdicts.

use core::any::TypeId;

/// Marker trait for event payloads.
///
/// Any `'static` type can be dispatched as an event.
pub trait Event: 'static {
    /// Get the TypeId of this event type.
    fn type_id() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Event type name for diagnostics.
    fn name() -> &'static str {
        core::any::type_name::<Self>()
    }
}

// Blanket implementation: any 'static type can be an event
impl<T: 'static> Event for T {}

/// Verdict of a before-event observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    #[default]
    Allow,
    Cancel,
}

impl EventResult {
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancel)
    }

    /// Cancel wins over allow.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Allow, Self::Allow) => Self::Allow,
            _ => Self::Cancel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hurt {
        _amount: f32,
    }

    struct Died;

    #[test]
    fn test_event_type_id() {
        assert_eq!(<Hurt as Event>::type_id(), TypeId::of::<Hurt>());
        assert_ne!(<Hurt as Event>::type_id(), <Died as Event>::type_id());
    }

    #[test]
    fn test_event_name_mentions_type() {
        assert!(<Died as Event>::name().ends_with("Died"));
    }

    #[test]
    fn test_cancel_wins() {
        assert_eq!(EventResult::Allow.and(EventResult::Allow), EventResult::Allow);
        assert_eq!(EventResult::Allow.and(EventResult::Cancel), EventResult::Cancel);
        assert_eq!(EventResult::Cancel.and(EventResult::Allow), EventResult::Cancel);
        assert!(EventResult::Cancel.is_cancelled());
        assert!(!EventResult::default().is_cancelled());
    }
}
