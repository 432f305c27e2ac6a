//! Wheel input handler

use reel_core::{Event, EventData};

use super::direction::{sense_from_delta, Axis};
use super::state::{ScrollOffset, ScrollState};

/// Apply a wheel event to the scroll state
///
/// The host's native scroll is always suppressed. Only the active-axis delta
/// is used. Returns the corrected offset when the state moved, so the caller
/// can notify `on_scroll`; `None` when the wrapper is disabled, the content
/// fits, or the delta is not a finite number.
pub fn handle_wheel(
    event: &mut Event,
    disabled: bool,
    axis: Axis,
    state: &mut ScrollState,
) -> Option<ScrollOffset> {
    event.prevent_default();

    if disabled || !state.needs_scroll() {
        return None;
    }

    let EventData::Scroll { delta_x, delta_y } = event.data else {
        return None;
    };
    let delta = match axis {
        Axis::Horizontal => delta_x,
        Axis::Vertical => delta_y,
    };
    if !delta.is_finite() {
        tracing::trace!("dropping non-finite wheel delta {}", delta);
        return None;
    }

    let offset = state.advance(axis, delta, sense_from_delta(delta));
    tracing::trace!("wheel {:?} delta={} -> {:?}", axis, delta, offset);
    Some(offset)
}
