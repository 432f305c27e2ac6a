//! Wraparound policy
//!
//! The wrapper renders two copies of its content back to back, so snapping
//! the offset by exactly one content length is invisible. Forward travel
//! snaps to the origin once the offset reaches the extent; backward travel
//! snaps to the extent once the offset reaches the origin.

use reel_core::Size;

use super::direction::{Axis, Sense};
use super::state::ScrollOffset;

/// Correct `offset` on the active axis of `axis`
///
/// The other coordinate is left alone. A zero extent (content not yet
/// measured) disables wrapping.
pub fn apply(axis: Axis, sense: Sense, offset: ScrollOffset, extent: Size) -> ScrollOffset {
    let value = offset.along(axis);
    offset.with_along(axis, wrap(sense, value, axis.extent_of(extent)))
}

/// Wrap a single coordinate against `boundary`
pub fn wrap(sense: Sense, value: f32, boundary: f32) -> f32 {
    if !(boundary > 0.0) {
        return value;
    }
    match sense {
        Sense::Forward if value >= boundary => 0.0,
        Sense::Backward if value <= 0.0 => boundary,
        _ => value,
    }
}
