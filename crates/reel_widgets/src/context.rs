//! Widget context
//!
//! The host-side half of the widget system: it hands out widget ids, owns the
//! frame scheduler and the listener registry, and turns due frame requests
//! into `ANIMATION_FRAME` events.
//!
//! Widgets keep their id as a [`WidgetRegistration`]; dropping it removes the
//! widget from the registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use reel_animation::{AnimationScheduler, FrameScheduler};
use reel_core::{Event, EventDispatcher, SharedDispatcher};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::widget::{Widget, WidgetId};

/// Registry entry for a live widget
#[derive(Debug, Clone, Copy)]
struct WidgetEntry {
    kind: &'static str,
}

type WidgetRegistry = Mutex<SlotMap<WidgetId, WidgetEntry>>;

fn lock_registry(registry: &WidgetRegistry) -> MutexGuard<'_, SlotMap<WidgetId, WidgetEntry>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A widget's entry in the registry, removed when dropped
#[derive(Debug)]
pub struct WidgetRegistration {
    id: WidgetId,
    registry: Weak<WidgetRegistry>,
}

impl WidgetRegistration {
    pub fn id(&self) -> WidgetId {
        self.id
    }
}

impl Drop for WidgetRegistration {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(entry) = lock_registry(&registry).remove(self.id) {
                tracing::debug!("unregistered {} widget {:?}", entry.kind, self.id);
            }
        }
    }
}

/// Shared services for a tree of widgets
#[derive(Debug)]
pub struct WidgetContext {
    widgets: Arc<WidgetRegistry>,
    scheduler: AnimationScheduler,
    dispatcher: SharedDispatcher,
}

impl WidgetContext {
    pub fn new() -> Self {
        Self {
            widgets: Arc::new(Mutex::new(SlotMap::with_key())),
            scheduler: AnimationScheduler::new(),
            dispatcher: EventDispatcher::shared(),
        }
    }

    /// Register a widget; the entry lives as long as the returned guard
    pub fn register_widget(&mut self, kind: &'static str) -> WidgetRegistration {
        let id = lock_registry(&self.widgets).insert(WidgetEntry { kind });
        tracing::debug!("registered {} widget {:?}", kind, id);
        WidgetRegistration {
            id,
            registry: Arc::downgrade(&self.widgets),
        }
    }

    pub fn is_registered(&self, id: WidgetId) -> bool {
        lock_registry(&self.widgets).contains_key(id)
    }

    /// Kind name given at registration
    pub fn widget_kind(&self, id: WidgetId) -> Option<&'static str> {
        lock_registry(&self.widgets).get(id).map(|entry| entry.kind)
    }

    /// Number of live widgets
    pub fn widget_count(&self) -> usize {
        lock_registry(&self.widgets).len()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Frame scheduler handed to widgets; does not keep the scheduler alive
    pub fn frame_scheduler(&self) -> Arc<dyn FrameScheduler> {
        Arc::new(self.scheduler.handle())
    }

    /// Listener registry handed to widgets; does not keep the registry alive
    pub fn dispatcher(&self) -> Weak<Mutex<EventDispatcher>> {
        Arc::downgrade(&self.dispatcher)
    }

    /// Lock the listener registry for inspection
    pub fn listeners(&self) -> MutexGuard<'_, EventDispatcher> {
        self.dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Tick the scheduler and turn every due request into a frame event
    pub fn frame_events(&self, dt: f32) -> SmallVec<[Event; 4]> {
        let batch = self.scheduler.tick_with(dt);
        batch
            .frames
            .iter()
            .map(|due| Event::animation_frame(due.owner, due.id.to_raw(), batch.dt))
            .collect()
    }

    /// Deliver an event to a widget if it is the target and listens for it
    ///
    /// Returns whether the widget received the event. The registry lock is
    /// released before the widget runs.
    pub fn dispatch(&self, widget: &mut dyn Widget, event: &mut Event) -> bool {
        if event.target != widget.id().to_raw() || !self.listeners().has_listener(event) {
            return false;
        }
        widget.handle_event(event);
        true
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}
