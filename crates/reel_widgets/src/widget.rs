//! Base widget trait and types

use reel_core::Event;
use slotmap::{new_key_type, Key, KeyData};

new_key_type! {
    pub struct WidgetId;
}

impl WidgetId {
    /// Raw id used as an event target
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Reconstruct from an event target produced by `to_raw()`
    pub fn from_raw(raw: u64) -> Self {
        WidgetId::from(KeyData::from_ffi(raw))
    }
}

/// Base trait for all widgets
pub trait Widget {
    /// Get the widget's unique ID
    fn id(&self) -> WidgetId;

    /// Handle an event addressed to this widget
    fn handle_event(&mut self, event: &mut Event);
}
