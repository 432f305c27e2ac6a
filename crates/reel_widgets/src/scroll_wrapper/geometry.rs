//! Geometry prober
//!
//! Reads the container box and the unclipped size of one copy of the content
//! from the host, and decides whether the content overflows the container
//! along the active axis.

use reel_core::{Rect, Size};

use super::direction::Axis;

/// Host capability for box measurement
pub trait LayoutProbe {
    /// Bounding box of the visible container, `None` while unmounted
    fn container_rect(&self) -> Option<Rect>;

    /// Full unclipped size of a single copy of the content, `None` while
    /// unmounted
    fn content_scroll_size(&self) -> Option<Size>;
}

/// Result of a measurement pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    /// Content overflows the container on the active axis
    pub needs_scroll: bool,
    /// Size of one content copy; the wraparound boundary
    pub content_extent: Size,
}

/// Measure the container and content for `axis`
///
/// An unmounted container measures as zero extent with no scrolling.
pub fn measure(probe: &dyn LayoutProbe, axis: Axis) -> Measurement {
    let Some(container) = probe.container_rect() else {
        tracing::debug!("container not mounted, skipping measurement");
        return Measurement::default();
    };
    let content_extent = probe.content_scroll_size().unwrap_or(Size::ZERO);

    let needs_scroll = axis.extent_of(container.size) < axis.extent_of(content_extent);

    tracing::debug!(
        "measured {:?}: container={:.0}x{:.0} content={:.0}x{:.0} needs_scroll={}",
        axis,
        container.width(),
        container.height(),
        content_extent.width,
        content_extent.height,
        needs_scroll
    );

    Measurement {
        needs_scroll,
        content_extent,
    }
}

/// Fixed geometry, for headless hosts and tests
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticLayout {
    pub container: Option<Rect>,
    pub content: Option<Size>,
}

impl StaticLayout {
    /// Mounted container of `container` size holding content of `content` size
    pub fn new(container: Size, content: Size) -> Self {
        Self {
            container: Some(Rect::from(container)),
            content: Some(content),
        }
    }

    /// Nothing mounted
    pub fn unmounted() -> Self {
        Self::default()
    }
}

impl LayoutProbe for StaticLayout {
    fn container_rect(&self) -> Option<Rect> {
        self.container
    }

    fn content_scroll_size(&self) -> Option<Size> {
        self.content
    }
}
