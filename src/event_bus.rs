//! Process-local event bus
//!
//! Mediates all communication between the dialogue manager and its
//! collaborators. Two delivery modes exist:
//!
//! - [`EventBus::dispatch`]: fire-and-forget to every listener of the event
//!   type, in registration order. A failing listener aborts delivery.
//! - [`EventBus::dispatch_with_response`]: synchronous resource request.
//!   Exactly one responder must answer, with a value of the request's
//!   declared response type.
//!
//! Each conversation owns its own bus; nothing here is shared across
//! conversations.

mod error;
mod events;

#[cfg(test)]
mod proptests;

pub use error::BusError;
pub use events::{RequestRecommendations, RequestSuggestions, StyleChanged, TurnCompleted};

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Something that can be published on the bus
pub trait Event: Any + Send + fmt::Debug {
    /// Stable name used in logs and errors
    const NAME: &'static str;
}

/// An event that expects exactly one typed answer
pub trait ResourceRequest: Event {
    type Response: Any + Send;
}

type Listener = Box<dyn Fn(&dyn Any) -> Result<(), String> + Send + Sync>;
type Responder = Box<dyn Fn(&dyn Any) -> Option<Box<dyn Any + Send>> + Send + Sync>;

/// Listener and responder registry keyed by event type
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<TypeId, Vec<Listener>>,
    responders: HashMap<TypeId, Vec<Responder>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for plain publishes of `E`
    pub fn register<E, F>(&mut self, listener: F)
    where
        E: Event,
        F: Fn(&E) -> Result<(), String> + Send + Sync + 'static,
    {
        tracing::debug!(event = E::NAME, "Registering listener");
        self.listeners
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(move |event: &dyn Any| {
                match event.downcast_ref::<E>() {
                    Some(event) => listener(event),
                    None => Ok(()),
                }
            }));
    }

    /// Register a typed responder for request `R`
    ///
    /// Returning `None` means "not mine"; another responder may answer.
    pub fn register_responder<R, F>(&mut self, responder: F)
    where
        R: ResourceRequest,
        F: Fn(&R) -> Option<R::Response> + Send + Sync + 'static,
    {
        self.register_untyped_responder::<R, _>(move |request| {
            responder(request).map(|response| Box::new(response) as Box<dyn Any + Send>)
        });
    }

    /// Register a responder whose answer is only checked at request time
    ///
    /// Used for providers wired up dynamically; a wrongly typed answer
    /// surfaces as [`BusError::TypeMismatch`].
    pub fn register_untyped_responder<R, F>(&mut self, responder: F)
    where
        R: ResourceRequest,
        F: Fn(&R) -> Option<Box<dyn Any + Send>> + Send + Sync + 'static,
    {
        tracing::debug!(event = R::NAME, "Registering responder");
        self.responders
            .entry(TypeId::of::<R>())
            .or_default()
            .push(Box::new(move |request: &dyn Any| {
                request.downcast_ref::<R>().and_then(&responder)
            }));
    }

    /// Deliver `event` to every listener in registration order
    ///
    /// # Errors
    ///
    /// [`BusError::Handler`] from the first failing listener; later listeners
    /// do not run.
    pub fn dispatch<E: Event>(&self, event: &E) -> Result<(), BusError> {
        let Some(listeners) = self.listeners.get(&TypeId::of::<E>()) else {
            tracing::trace!(event = E::NAME, "No listeners");
            return Ok(());
        };
        for listener in listeners {
            listener(event as &dyn Any).map_err(|message| BusError::Handler {
                event: E::NAME,
                message,
            })?;
        }
        Ok(())
    }

    /// Resolve a resource request against its single responder
    ///
    /// # Errors
    ///
    /// - [`BusError::NoResponder`] when nobody answers
    /// - [`BusError::AmbiguousResponder`] when more than one responder answers
    /// - [`BusError::TypeMismatch`] when the answer has the wrong type
    pub fn dispatch_with_response<R: ResourceRequest>(
        &self,
        request: &R,
    ) -> Result<R::Response, BusError> {
        let mut output: Option<R::Response> = None;

        for responder in self.responders.get(&TypeId::of::<R>()).into_iter().flatten() {
            let Some(response) = responder(request as &dyn Any) else {
                continue;
            };
            if output.is_some() {
                return Err(BusError::AmbiguousResponder { event: R::NAME });
            }
            let response = response
                .downcast::<R::Response>()
                .map_err(|_| BusError::TypeMismatch {
                    event: R::NAME,
                    expected: type_name::<R::Response>(),
                })?;
            output = Some(*response);
        }

        output.ok_or(BusError::NoResponder { event: R::NAME })
    }

    pub fn listener_count<E: Event>(&self) -> usize {
        self.listeners.get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    pub fn responder_count<R: ResourceRequest>(&self) -> usize {
        self.responders.get(&TypeId::of::<R>()).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listener_kinds", &self.listeners.len())
            .field("responder_kinds", &self.responders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct Ping(u32);

    impl Event for Ping {
        const NAME: &'static str = "ping";
    }

    #[derive(Debug)]
    struct Lookup(&'static str);

    impl Event for Lookup {
        const NAME: &'static str = "lookup";
    }

    impl ResourceRequest for Lookup {
        type Response = String;
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            bus.register(move |ping: &Ping| {
                seen.lock().unwrap().push((tag, ping.0));
                Ok(())
            });
        }

        bus.dispatch(&Ping(7)).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_failing_listener_aborts_dispatch() {
        let reached = Arc::new(Mutex::new(false));
        let mut bus = EventBus::new();
        bus.register(|_: &Ping| Err("listener exploded".to_string()));
        {
            let reached = Arc::clone(&reached);
            bus.register(move |_: &Ping| {
                *reached.lock().unwrap() = true;
                Ok(())
            });
        }

        let err = bus.dispatch(&Ping(1)).unwrap_err();
        assert_eq!(
            err,
            BusError::Handler {
                event: "ping",
                message: "listener exploded".into()
            }
        );
        assert!(!*reached.lock().unwrap());
    }

    #[test]
    fn test_dispatch_without_listeners_is_noop() {
        let bus = EventBus::new();
        assert!(bus.dispatch(&Ping(0)).is_ok());
    }

    #[test]
    fn test_single_responder_answers() {
        let mut bus = EventBus::new();
        bus.register_responder(|_: &Lookup| None);
        bus.register_responder(|lookup: &Lookup| Some(lookup.0.to_uppercase()));

        let answer = bus.dispatch_with_response(&Lookup("abc")).unwrap();
        assert_eq!(answer, "ABC");
    }

    #[test]
    fn test_no_responder() {
        let mut bus = EventBus::new();
        assert_eq!(
            bus.dispatch_with_response(&Lookup("x")),
            Err(BusError::NoResponder { event: "lookup" })
        );

        bus.register_responder(|_: &Lookup| None);
        assert_eq!(
            bus.dispatch_with_response(&Lookup("x")),
            Err(BusError::NoResponder { event: "lookup" })
        );
    }

    #[test]
    fn test_ambiguous_responder() {
        let mut bus = EventBus::new();
        bus.register_responder(|_: &Lookup| Some("a".to_string()));
        bus.register_responder(|_: &Lookup| Some("b".to_string()));

        assert_eq!(
            bus.dispatch_with_response(&Lookup("x")),
            Err(BusError::AmbiguousResponder { event: "lookup" })
        );
    }

    #[test]
    fn test_type_mismatch() {
        let mut bus = EventBus::new();
        bus.register_untyped_responder(|_: &Lookup| Some(Box::new(42u32) as Box<dyn Any + Send>));

        let err = bus.dispatch_with_response(&Lookup("x")).unwrap_err();
        assert!(matches!(err, BusError::TypeMismatch { event: "lookup", .. }));
    }

    #[test]
    fn test_listeners_do_not_answer_requests() {
        let mut bus = EventBus::new();
        bus.register(|_: &Lookup| Ok(()));
        assert_eq!(bus.listener_count::<Lookup>(), 1);
        assert_eq!(bus.responder_count::<Lookup>(), 0);
        assert!(bus.dispatch_with_response(&Lookup("x")).is_err());
    }
}
