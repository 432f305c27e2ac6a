//! Scroll state
//!
//! The one mutable record both the animation driver and the wheel handler
//! write to. It is recreated from scratch whenever the wrapper remeasures.

use reel_core::{Affine2D, Size};

use super::direction::{Axis, Sense};
use super::geometry::Measurement;
use super::wraparound;

/// Cumulative scrolled distance; only the active-axis coordinate moves
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy with the coordinate along `axis` replaced
    pub fn with_along(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self { x: value, ..self },
            Axis::Vertical => Self { y: value, ..self },
        }
    }
}

/// Scroll position plus the geometry it wraps against
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    offset: ScrollOffset,
    measurement: Measurement,
}

impl ScrollState {
    pub fn new(measurement: Measurement) -> Self {
        Self {
            offset: ScrollOffset::ZERO,
            measurement,
        }
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn needs_scroll(&self) -> bool {
        self.measurement.needs_scroll
    }

    pub fn content_extent(&self) -> Size {
        self.measurement.content_extent
    }

    /// Move `delta` along `axis`, then wrap using `sense`
    pub fn advance(&mut self, axis: Axis, delta: f32, sense: Sense) -> ScrollOffset {
        let moved = self.offset.with_along(axis, self.offset.along(axis) + delta);
        self.offset = wraparound::apply(axis, sense, moved, self.measurement.content_extent);
        self.offset
    }

    /// Visual transform for the scroller: content moves opposite the offset
    pub fn transform(&self) -> Affine2D {
        Affine2D::translation(-self.offset.x, -self.offset.y)
    }
}
