//! Typed publish/subscribe.
//!
//! Every event is a marker type implementing [`EventDef`], which fixes its
//! name and payload type. Handlers receive a mutable context plus the
//! payload and run synchronously on the caller's stack; nothing is queued.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::UiError;

/// Definition of one event: a stable name and the payload it carries.
pub trait EventDef: 'static {
    const NAME: &'static str;
    type Payload: 'static;
}

/// Declare event marker types with their names and payloads.
///
/// ```rust,ignore
/// define_events! {
///     /// A catalog card was clicked.
///     CardSelected = "catalog:selected" => Product;
/// }
/// ```
#[macro_export]
macro_rules! define_events {
    ($($(#[$meta:meta])* $name:ident = $label:literal => $payload:ty;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl $crate::bus::EventDef for $name {
                const NAME: &'static str = $label;
                type Payload = $payload;
            }
        )+
    };
}

type Handler<C, P> = Box<dyn Fn(&mut C, P) -> Result<(), UiError>>;

struct Registration {
    name: &'static str,
    handler: Box<dyn Any>,
}

/// Routes events to one handler each, over a context of type `C`.
pub struct EventBus<C> {
    handlers: HashMap<TypeId, Registration>,
    _context: PhantomData<fn(&mut C)>,
}

impl<C: 'static> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> EventBus<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            _context: PhantomData,
        }
    }

    /// Subscribe a handler. A later subscription to the same event replaces
    /// the earlier one.
    pub fn on<E, F>(&mut self, handler: F)
    where
        E: EventDef,
        F: Fn(&mut C, E::Payload) -> Result<(), UiError> + 'static,
    {
        let handler: Handler<C, E::Payload> = Box::new(handler);
        let previous = self.handlers.insert(
            TypeId::of::<E>(),
            Registration {
                name: E::NAME,
                handler: Box::new(handler),
            },
        );
        if previous.is_some() {
            debug!(event = E::NAME, "event handler replaced");
        }
    }

    /// Check if a handler is subscribed for `E`.
    pub fn is_registered<E: EventDef>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<E>())
    }

    /// Deliver `payload` to the handler of `E`.
    ///
    /// Emitting an event with no subscriber is an error.
    pub fn emit<E: EventDef>(&self, context: &mut C, payload: E::Payload) -> Result<(), UiError> {
        let handler = self
            .handlers
            .get(&TypeId::of::<E>())
            .and_then(|r| r.handler.downcast_ref::<Handler<C, E::Payload>>())
            .ok_or_else(|| UiError::invalid_use(format!("no handler for event '{}'", E::NAME)))?;

        trace!(event = E::NAME, "emit");
        handler(context, payload)
    }

    /// A callback that emits `E` when invoked.
    pub fn trigger<E: EventDef>(
        &self,
    ) -> impl Fn(&mut C, E::Payload) -> Result<(), UiError> + '_ {
        move |context: &mut C, payload: E::Payload| self.emit::<E>(context, payload)
    }

    /// Names of all subscribed events, sorted.
    pub fn event_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|r| r.name).collect();
        names.sort_unstable();
        names
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.values().map(|r| r.name).collect();
        names.sort_unstable();
        f.debug_struct("EventBus").field("events", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    define_events! {
        Added = "test:added" => u32;
        Reset = "test:reset" => ();
        Unused = "test:unused" => String;
    }

    #[derive(Default)]
    struct Counter {
        value: u32,
        calls: Vec<&'static str>,
    }

    fn bus() -> EventBus<Counter> {
        let mut bus = EventBus::new();
        bus.on::<Added, _>(|c: &mut Counter, n| {
            c.value += n;
            c.calls.push(Added::NAME);
            Ok(())
        });
        bus.on::<Reset, _>(|c: &mut Counter, ()| {
            c.value = 0;
            c.calls.push(Reset::NAME);
            Ok(())
        });
        bus
    }

    #[test]
    fn test_emit_calls_handler_synchronously() {
        let bus = bus();
        let mut counter = Counter::default();

        bus.emit::<Added>(&mut counter, 2).unwrap();
        bus.emit::<Added>(&mut counter, 3).unwrap();
        assert_eq!(counter.value, 5);

        bus.emit::<Reset>(&mut counter, ()).unwrap();
        assert_eq!(counter.value, 0);
        assert_eq!(counter.calls, vec!["test:added", "test:added", "test:reset"]);
    }

    #[test]
    fn test_trigger_returns_callback() {
        let bus = bus();
        let mut counter = Counter::default();

        let add = bus.trigger::<Added>();
        add(&mut counter, 7).unwrap();
        add(&mut counter, 1).unwrap();
        assert_eq!(counter.value, 8);
    }

    #[test]
    fn test_unregistered_event_fails_fast() {
        let bus = bus();
        let mut counter = Counter::default();

        let err = bus.emit::<Unused>(&mut counter, "x".to_string()).unwrap_err();
        assert_eq!(
            err,
            UiError::InvalidUse("no handler for event 'test:unused'".to_string())
        );
        assert!(!bus.is_registered::<Unused>());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut bus = bus();
        bus.on::<Added, _>(|c: &mut Counter, n| {
            c.value += n * 10;
            Ok(())
        });

        let mut counter = Counter::default();
        bus.emit::<Added>(&mut counter, 1).unwrap();
        assert_eq!(counter.value, 10);
        assert_eq!(bus.event_names(), vec!["test:added", "test:reset"]);
    }

    #[test]
    fn test_handler_error_propagates() {
        let mut bus: EventBus<Counter> = EventBus::new();
        bus.on::<Added, _>(|_: &mut Counter, _| Err(UiError::invalid_use("boom")));

        let mut counter = Counter::default();
        assert!(bus.emit::<Added>(&mut counter, 1).is_err());
    }
}
