//! Event dispatch system
//!
//! Event payloads delivered by hosts, plus the listener registry hosts
//! consult to decide which widget receives an event and whether the event's
//! default action may be cancelled.
//!
//! Widgets hold their registrations as [`Subscription`] guards; dropping a
//! guard removes the listener, so replacing a widget's subscriptions can never
//! leave a stale or duplicate listener behind.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Wheel or trackpad scroll
    pub const SCROLL: EventType = 30;
    /// A frame requested through the animation scheduler is due
    pub const ANIMATION_FRAME: EventType = 45;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Widget ID
    pub data: EventData,
    pub propagation_stopped: bool,
    /// Set by a listener that suppresses the host's native action
    pub default_prevented: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Scroll {
        delta_x: f32,
        delta_y: f32,
    },
    Frame {
        /// Raw frame request id (see `FrameId::to_raw` in `reel_animation`)
        frame: u64,
        /// Seconds since the previous frame
        dt: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn pointer_enter(target: u64) -> Self {
        Self::new(
            event_types::POINTER_ENTER,
            target,
            EventData::Pointer { x: 0.0, y: 0.0 },
        )
    }

    pub fn pointer_leave(target: u64) -> Self {
        Self::new(
            event_types::POINTER_LEAVE,
            target,
            EventData::Pointer { x: 0.0, y: 0.0 },
        )
    }

    pub fn wheel(target: u64, delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            event_types::SCROLL,
            target,
            EventData::Scroll { delta_x, delta_y },
        )
    }

    pub fn animation_frame(target: u64, frame: u64, dt: f32) -> Self {
        Self::new(
            event_types::ANIMATION_FRAME,
            target,
            EventData::Frame { frame, dt },
        )
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the host's default action for this event (e.g. page scroll)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Listener registry
// ─────────────────────────────────────────────────────────────────────────────

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

/// Options for a listener registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Passive listeners promise never to call `prevent_default`, which lets
    /// the host run its default action without waiting for them.
    pub passive: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self { passive: true }
    }
}

impl ListenerOptions {
    /// Listener that may cancel the default action
    pub fn active() -> Self {
        Self { passive: false }
    }
}

#[derive(Debug)]
struct Listener {
    target: u64,
    event_type: EventType,
    options: ListenerOptions,
}

/// Registry of which widgets listen for which event types
#[derive(Debug, Default)]
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    index: FxHashMap<(u64, EventType), SmallVec<[ListenerId; 2]>>,
}

/// Dispatcher shared between the host and widget subscriptions
pub type SharedDispatcher = Arc<Mutex<EventDispatcher>>;

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher ready to be shared with widgets
    pub fn shared() -> SharedDispatcher {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register a listener for a widget and event type
    pub fn register(
        &mut self,
        target: u64,
        event_type: EventType,
        options: ListenerOptions,
    ) -> ListenerId {
        let id = self.listeners.insert(Listener {
            target,
            event_type,
            options,
        });
        self.index.entry((target, event_type)).or_default().push(id);
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };

        let key = (listener.target, listener.event_type);
        if let Some(ids) = self.index.get_mut(&key) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.index.remove(&key);
            }
        }
        true
    }

    /// Number of listeners for a widget and event type
    pub fn listener_count(&self, target: u64, event_type: EventType) -> usize {
        self.index
            .get(&(target, event_type))
            .map_or(0, |ids| ids.len())
    }

    /// Whether any listener wants this event
    pub fn has_listener(&self, event: &Event) -> bool {
        self.listener_count(event.target, event.event_type) > 0
    }

    /// Whether a listener for this event may cancel its default action
    pub fn can_prevent_default(&self, event: &Event) -> bool {
        self.index
            .get(&(event.target, event.event_type))
            .is_some_and(|ids| {
                ids.iter()
                    .filter_map(|id| self.listeners.get(*id))
                    .any(|listener| !listener.options.passive)
            })
    }

    /// Total number of listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

fn lock(dispatcher: &Mutex<EventDispatcher>) -> MutexGuard<'_, EventDispatcher> {
    dispatcher.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A listener registration that is removed when dropped
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    event_type: EventType,
    dispatcher: Weak<Mutex<EventDispatcher>>,
}

impl Subscription {
    /// Register a listener, or return `None` if the dispatcher is gone
    pub fn subscribe(
        dispatcher: &Weak<Mutex<EventDispatcher>>,
        target: u64,
        event_type: EventType,
        options: ListenerOptions,
    ) -> Option<Self> {
        let shared = dispatcher.upgrade()?;
        let id = lock(&shared).register(target, event_type, options);
        Some(Self {
            id,
            event_type,
            dispatcher: Weak::clone(dispatcher),
        })
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.dispatcher.upgrade() {
            lock(&shared).unregister(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_unregister() {
        let mut dispatcher = EventDispatcher::new();
        let id = dispatcher.register(7, event_types::SCROLL, ListenerOptions::active());

        assert_eq!(dispatcher.listener_count(7, event_types::SCROLL), 1);
        assert!(dispatcher.has_listener(&Event::wheel(7, 0.0, 10.0)));
        assert!(!dispatcher.has_listener(&Event::wheel(8, 0.0, 10.0)));

        assert!(dispatcher.unregister(id));
        assert!(!dispatcher.unregister(id));
        assert!(dispatcher.is_empty());
        assert!(!dispatcher.has_listener(&Event::wheel(7, 0.0, 10.0)));
    }

    #[test]
    fn test_passive_listeners_cannot_prevent_default() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(1, event_types::SCROLL, ListenerOptions::default());
        let event = Event::wheel(1, 0.0, 5.0);
        assert!(!dispatcher.can_prevent_default(&event));

        dispatcher.register(1, event_types::SCROLL, ListenerOptions::active());
        assert!(dispatcher.can_prevent_default(&event));
    }

    #[test]
    fn test_subscription_unregisters_on_drop() {
        let dispatcher = EventDispatcher::shared();
        let weak = Arc::downgrade(&dispatcher);

        let sub = Subscription::subscribe(&weak, 3, event_types::POINTER_ENTER, Default::default())
            .expect("dispatcher alive");
        assert_eq!(sub.event_type(), event_types::POINTER_ENTER);
        assert_eq!(
            dispatcher
                .lock()
                .unwrap()
                .listener_count(3, event_types::POINTER_ENTER),
            1
        );

        drop(sub);
        assert!(dispatcher.lock().unwrap().is_empty());
    }

    #[test]
    fn test_subscription_without_dispatcher() {
        let weak = {
            let dispatcher = EventDispatcher::shared();
            Arc::downgrade(&dispatcher)
        };
        assert!(Subscription::subscribe(&weak, 1, event_types::SCROLL, Default::default()).is_none());
    }

    #[test]
    fn test_event_flags() {
        let mut event = Event::wheel(1, 0.0, 3.0);
        assert!(!event.default_prevented);

        event.prevent_default();
        event.stop_propagation();
        assert!(event.default_prevented);
        assert!(event.propagation_stopped);
    }
}
