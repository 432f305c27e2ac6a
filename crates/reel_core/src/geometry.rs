//! Core geometry types
//!
//! Box measurements reported by hosts and the transforms widgets hand back
//! to the renderer.

// ─────────────────────────────────────────────────────────────────────────────
// Points, Sizes, Rects
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle, as returned by a host's bounding-box query
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }
}

impl From<Size> for Rect {
    /// Convert Size to Rect at origin (0, 0)
    fn from(size: Size) -> Self {
        Rect {
            origin: Point::ZERO,
            size,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Translation component (tx, ty)
    pub fn translation_part(&self) -> Point {
        Point::new(self.elements[4], self.elements[5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_size_sits_at_origin() {
        let rect = Rect::from(Size::new(100.0, 50.0));
        assert_eq!(rect.origin, Point::ZERO);
        assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!((rect.width(), rect.height()), (100.0, 50.0));
    }

    #[test]
    fn test_translation() {
        let t = Affine2D::translation(-20.0, -35.0);
        assert_eq!(t.translation_part(), Point::new(-20.0, -35.0));
        assert_eq!(t.elements, [1.0, 0.0, 0.0, 1.0, -20.0, -35.0]);
        assert_eq!(Affine2D::default(), Affine2D::IDENTITY);
    }
}
