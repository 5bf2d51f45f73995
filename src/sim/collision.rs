//! Axis-aligned collision detection
//!
//! Everything in the play field is a rectangle, so a strict AABB overlap test
//! is all the collision math the game needs.

use glam::Vec2;

/// Axis-aligned box anchored at its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Box of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let corner = crate::centered_corner(center, size);
        Self::new(corner.x, corner.y, size.x, size.y)
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlap_ab(self, other)
    }
}

/// Strict AABB overlap test
///
/// Touching edges (`a.x + a.width == b.x`) are not an overlap, and a box with
/// zero width or height never overlaps anything.
#[inline]
pub fn overlap_ab(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Horizontal distance between the bird box and the pipe box left edges
    /// (diagnostic only)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            penetration: 0.0,
        }
    }

    pub fn hit(penetration: f32) -> Self {
        Self {
            hit: true,
            penetration,
        }
    }
}
