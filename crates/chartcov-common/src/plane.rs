//! Projected-plane primitives: points, viewport rectangles and 3x2 affine
//! transforms as consumed by a 2D drawing surface.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF2D {
    pub x: f64,
    pub y: f64,
}

impl PointF2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for PointF2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangle given by its origin corner and extent, in projected units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF2D {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF2D {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Window-sized rectangle centered on the projection origin.
    pub fn centered(width: f64, height: f64) -> Self {
        Self::new(-width / 2.0, -height / 2.0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Corners in the order: origin, +x, +x+y, +y.
    pub fn corners(&self) -> [PointF2D; 4] {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        [
            PointF2D::new(x0, y0),
            PointF2D::new(x1, y0),
            PointF2D::new(x1, y1),
            PointF2D::new(x0, y1),
        ]
    }
}

/// Row-major 3x2 affine matrix: `x' = m11*x + m21*y + dx`, `y' = m12*x + m22*y + dy`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Self = Self {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            m11: sx,
            m22: sy,
            ..Self::IDENTITY
        }
    }

    /// Composition that applies `self` first and `next` second.
    pub fn then(self, next: Affine2D) -> Self {
        Self {
            m11: self.m11 * next.m11 + self.m12 * next.m21,
            m12: self.m11 * next.m12 + self.m12 * next.m22,
            m21: self.m21 * next.m11 + self.m22 * next.m21,
            m22: self.m21 * next.m12 + self.m22 * next.m22,
            dx: self.dx * next.m11 + self.dy * next.m21 + next.dx,
            dy: self.dx * next.m12 + self.dy * next.m22 + next.dy,
        }
    }

    pub fn apply(&self, p: PointF2D) -> PointF2D {
        PointF2D::new(
            self.m11 * p.x + self.m21 * p.y + self.dx,
            self.m12 * p.x + self.m22 * p.y + self.dy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_viewport() {
        let r = RectF2D::centered(800.0, 600.0);
        assert_eq!(r, RectF2D::new(-400.0, -300.0, 800.0, 600.0));
        assert_eq!(r.corners()[2], PointF2D::new(400.0, 300.0));
        assert!(!r.is_empty());
        assert!(RectF2D::centered(0.0, 10.0).is_empty());
    }

    #[test]
    fn scale_then_translate() {
        let m = Affine2D::scale(2.0, 2.0).then(Affine2D::translate(10.0, -5.0));
        assert_eq!(m.apply(PointF2D::new(1.0, 1.0)), PointF2D::new(12.0, -3.0));

        let reversed = Affine2D::translate(10.0, -5.0).then(Affine2D::scale(2.0, 2.0));
        assert_eq!(
            reversed.apply(PointF2D::new(1.0, 1.0)),
            PointF2D::new(22.0, -8.0)
        );
    }

    #[test]
    fn identity_is_neutral() {
        let m = Affine2D::translate(3.0, 4.0);
        assert_eq!(Affine2D::IDENTITY.then(m), m);
        assert_eq!(m.then(Affine2D::IDENTITY), m);
    }
}
