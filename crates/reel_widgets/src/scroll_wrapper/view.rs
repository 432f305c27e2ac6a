//! Render description
//!
//! What the host draws for a scroll wrapper: a clipping container carrying
//! the caller's class and style, a scroller translated against the scroll
//! offset, and the content inside it once or twice.

use std::collections::BTreeMap;

use reel_core::Affine2D;
use smallvec::SmallVec;

use super::direction::Axis;

/// How the content copies are stacked inside the scroller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout {
    /// Copies stacked top to bottom
    Column,
    /// Copies side by side (flex row)
    Row,
}

impl From<Axis> for ContentLayout {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => ContentLayout::Row,
            Axis::Vertical => ContentLayout::Column,
        }
    }
}

/// Borrowed snapshot of a wrapper, ready to render
#[derive(Debug, Clone)]
pub struct ScrollWrapperView<'a, C> {
    pub class_name: Option<&'a str>,
    pub style: &'a BTreeMap<String, String>,
    pub layout: ContentLayout,
    /// Applied to the scroller, not the container
    pub transform: Affine2D,
    /// One copy, or two back to back while the content overflows
    pub copies: SmallVec<[&'a C; 2]>,
}

impl<C> ScrollWrapperView<'_, C> {
    /// Whether the seamless second copy is rendered
    pub fn is_duplicated(&self) -> bool {
        self.copies.len() > 1
    }
}
