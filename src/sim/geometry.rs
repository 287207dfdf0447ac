//! Bounding-box geometry shared by every mover
//!
//! All boxes are axis-aligned and described by their centre and full size.
//! The simulation area is the fixed rectangle `[0, WIDTH] x [0, HEIGHT]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, WIDTH};

/// Axis-aligned bounding box (centre + full size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// The whole simulation area
    pub fn arena() -> Self {
        Self::new(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), Vec2::new(WIDTH, HEIGHT))
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x * 0.5
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y * 0.5
    }

    /// Strict overlap test; boxes that only share an edge do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Shift the box so it lies inside the simulation area.
    ///
    /// A box larger than the area on some axis is centred on that axis.
    pub fn clamped_into_arena(mut self) -> Self {
        let half = self.half();
        self.center.x = clamp_axis(self.center.x, half.x, WIDTH);
        self.center.y = clamp_axis(self.center.y, half.y, HEIGHT);
        self
    }
}

fn clamp_axis(center: f32, half: f32, extent: f32) -> f32 {
    if half * 2.0 >= extent {
        extent / 2.0
    } else {
        center.clamp(half, extent - half)
    }
}

/// Per-axis containment check: `(horizontal, vertical)`.
///
/// Each flag is true iff the box lies fully within the area on that axis.
pub fn in_bounds(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= WIDTH;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= HEIGHT;
    (horizontal, vertical)
}

/// Returns true iff the box is fully inside the area on both axes
#[inline]
pub fn fully_in_bounds(rect: &Rect) -> bool {
    in_bounds(rect) == (true, true)
}

/// Unit vector from the centre of `from` to the centre of `to`.
///
/// Returns `None` when both centres coincide.
pub fn orientation_vector(from: &Rect, to: &Rect) -> Option<Vec2> {
    (to.center - from.center).try_normalize()
}

/// Size of the axis-aligned box enclosing a `size` box rotated by `degrees`
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_in_bounds_per_axis() {
        let inside = Rect::new(Vec2::new(500.0, 300.0), Vec2::new(50.0, 50.0));
        assert_eq!(in_bounds(&inside), (true, true));

        let off_left = Rect::new(Vec2::new(10.0, 300.0), Vec2::new(50.0, 50.0));
        assert_eq!(in_bounds(&off_left), (false, true));

        let off_bottom = Rect::new(Vec2::new(500.0, 590.0), Vec2::new(50.0, 50.0));
        assert_eq!(in_bounds(&off_bottom), (true, false));

        let corner = Rect::new(Vec2::new(-5.0, -5.0), Vec2::new(50.0, 50.0));
        assert_eq!(in_bounds(&corner), (false, false));
    }

    #[test]
    fn test_touching_edge_is_in_bounds() {
        let flush = Rect::new(Vec2::new(25.0, 25.0), Vec2::new(50.0, 50.0));
        assert_eq!(in_bounds(&flush), (true, true));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let overlapping = Rect::new(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_orientation_vector_unit() {
        let from = Rect::new(Vec2::new(0.0, 0.0), Vec2::ONE);
        let to = Rect::new(Vec2::new(3.0, 4.0), Vec2::ONE);
        let v = orientation_vector(&from, &to).unwrap();
        assert!((v - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_orientation_vector_degenerate() {
        let a = Rect::new(Vec2::new(7.0, 7.0), Vec2::ONE);
        let b = Rect::new(Vec2::new(7.0, 7.0), Vec2::new(30.0, 30.0));
        assert!(orientation_vector(&a, &b).is_none());
    }

    #[test]
    fn test_rotated_extent() {
        let size = Vec2::new(20.0, 100.0);
        let flat = rotated_extent(size, 0.0);
        assert!((flat - size).length() < 1e-4);
        let upright = rotated_extent(size, 90.0);
        assert!((upright - Vec2::new(100.0, 20.0)).length() < 1e-3);
        let diagonal = rotated_extent(size, 45.0);
        assert!((diagonal.x - diagonal.y).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn clamped_boxes_are_in_bounds(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            w in 1.0f32..400.0,
            h in 1.0f32..400.0,
        ) {
            let rect = Rect::new(Vec2::new(x, y), Vec2::new(w, h)).clamped_into_arena();
            prop_assert_eq!(in_bounds(&rect), (true, true));
        }

        #[test]
        fn orientation_is_unit_or_none(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let a = Rect::new(Vec2::new(ax, ay), Vec2::ONE);
            let b = Rect::new(Vec2::new(bx, by), Vec2::ONE);
            match orientation_vector(&a, &b) {
                Some(v) => prop_assert!((v.length() - 1.0).abs() < 1e-4),
                None => prop_assert!((a.center - b.center).length() < 1e-3),
            }
        }
    }
}
