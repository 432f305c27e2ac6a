//! Integration tests for the listener registry + FSM
//!
//! These tests verify that:
//! - Subscription guards keep the registry in sync with their owner
//! - Replacing a widget's subscriptions never duplicates a listener
//! - FSM-driven widgets can gate which events they listen for

use reel_core::events::event_types;
use reel_core::{
    Event, EventDispatcher, EventId, ListenerOptions, StateMachine, StateTransitions,
    Subscription,
};
use std::sync::{Arc, Mutex, Weak};

const ARM: EventId = 1;
const DISARM: EventId = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Armed {
    #[default]
    Off,
    On,
}

impl StateTransitions for Armed {
    fn on_event(&self, event: EventId) -> Option<Self> {
        match (self, event) {
            (Armed::Off, ARM) => Some(Armed::On),
            (Armed::On, DISARM) => Some(Armed::Off),
            _ => None,
        }
    }
}

/// A widget-like owner that listens for wheel input only while armed
struct WheelListener {
    target: u64,
    fsm: StateMachine<Armed>,
    dispatcher: Weak<Mutex<EventDispatcher>>,
    subscription: Option<Subscription>,
}

impl WheelListener {
    fn new(target: u64, dispatcher: Weak<Mutex<EventDispatcher>>) -> Self {
        Self {
            target,
            fsm: StateMachine::default(),
            dispatcher,
            subscription: None,
        }
    }

    fn send(&mut self, event: EventId) {
        self.subscription = None;
        if self.fsm.send(event) == Armed::On {
            self.subscription = Subscription::subscribe(
                &self.dispatcher,
                self.target,
                event_types::SCROLL,
                ListenerOptions::active(),
            );
        }
    }
}

fn count(dispatcher: &Arc<Mutex<EventDispatcher>>, target: u64, event_type: u32) -> usize {
    dispatcher.lock().unwrap().listener_count(target, event_type)
}

#[test]
fn test_fsm_gates_subscription() {
    let dispatcher = EventDispatcher::shared();
    let mut widget = WheelListener::new(10, Arc::downgrade(&dispatcher));

    widget.send(ARM);
    assert_eq!(count(&dispatcher, 10, event_types::SCROLL), 1);
    assert!(dispatcher
        .lock()
        .unwrap()
        .can_prevent_default(&Event::wheel(10, 0.0, 1.0)));

    // Invalid transition leaves the machine (and its listener) alone
    widget.send(ARM);
    assert_eq!(widget.fsm.current_state(), Armed::On);
    assert_eq!(count(&dispatcher, 10, event_types::SCROLL), 1);

    widget.send(DISARM);
    assert_eq!(count(&dispatcher, 10, event_types::SCROLL), 0);
}

#[test]
fn test_resubscribing_replaces_listeners() {
    let dispatcher = EventDispatcher::shared();
    let weak = Arc::downgrade(&dispatcher);
    let kinds = [
        event_types::SCROLL,
        event_types::POINTER_ENTER,
        event_types::POINTER_LEAVE,
        event_types::ANIMATION_FRAME,
    ];

    let mut subs: Vec<Subscription> = Vec::new();
    for _ in 0..5 {
        subs.clear();
        subs.extend(
            kinds
                .iter()
                .filter_map(|kind| Subscription::subscribe(&weak, 1, *kind, Default::default())),
        );
    }

    for kind in kinds {
        assert_eq!(count(&dispatcher, 1, kind), 1);
    }
    assert_eq!(dispatcher.lock().unwrap().len(), kinds.len());

    drop(subs);
    assert!(dispatcher.lock().unwrap().is_empty());
}

#[test]
fn test_listeners_are_per_target() {
    let dispatcher = EventDispatcher::shared();
    let weak = Arc::downgrade(&dispatcher);

    let _a = Subscription::subscribe(&weak, 1, event_types::POINTER_ENTER, Default::default());
    let b = Subscription::subscribe(&weak, 2, event_types::POINTER_ENTER, Default::default());

    drop(b);
    let registry = dispatcher.lock().unwrap();
    assert!(registry.has_listener(&Event::pointer_enter(1)));
    assert!(!registry.has_listener(&Event::pointer_enter(2)));
}

#[test]
fn test_subscription_outlives_dispatcher() {
    let dispatcher = EventDispatcher::shared();
    let sub = Subscription::subscribe(
        &Arc::downgrade(&dispatcher),
        3,
        event_types::SCROLL,
        Default::default(),
    );
    assert!(sub.is_some());

    // Dropping the guard after the registry is gone is a no-op
    drop(dispatcher);
    drop(sub);
}
