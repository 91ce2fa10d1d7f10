//! Property-based tests for the event bus
//!
//! The resource-request path must hand back exactly one answer or fail with
//! the error matching the number of responders that answered.

use super::*;
use proptest::prelude::*;

#[derive(Debug)]
struct Probe(u32);

impl Event for Probe {
    const NAME: &'static str = "probe";
}

impl ResourceRequest for Probe {
    type Response = u32;
}

/// Bus with `answering` responders that answer and `silent` that decline
fn bus_with(answering: usize, silent: usize) -> EventBus {
    let mut bus = EventBus::new();
    for offset in 0..answering {
        let offset = u32::try_from(offset).unwrap();
        bus.register_responder(move |probe: &Probe| Some(probe.0 + offset));
    }
    for _ in 0..silent {
        bus.register_responder(|_: &Probe| None);
    }
    bus
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn exactly_one_responder_law(
        answering in 0usize..4,
        silent in 0usize..4,
        payload in 0u32..10_000,
    ) {
        let bus = bus_with(answering, silent);
        let result = bus.dispatch_with_response(&Probe(payload));

        match answering {
            0 => prop_assert_eq!(result, Err(BusError::NoResponder { event: "probe" })),
            1 => prop_assert_eq!(result, Ok(payload)),
            _ => prop_assert_eq!(result, Err(BusError::AmbiguousResponder { event: "probe" })),
        }
    }

    #[test]
    fn dispatch_reaches_every_listener(listeners in 0usize..6) {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let hits = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        for _ in 0..listeners {
            let hits = Arc::clone(&hits);
            bus.register(move |_: &Probe| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        prop_assert!(bus.dispatch(&Probe(0)).is_ok());
        prop_assert_eq!(hits.load(Ordering::SeqCst), listeners);
        prop_assert_eq!(bus.listener_count::<Probe>(), listeners);
    }
}
