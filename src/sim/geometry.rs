//! Axis-aligned rectangles and wall collision resolution
//!
//! Everything in the playfield is a box. Movement is resolved one axis at a
//! time: move along x, snap out of any wall that now overlaps, then repeat
//! for y. Resolving the axes separately keeps entities from tunnelling
//! through corners or snagging on the seam between two walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    /// Square with the given half-extent around `center`
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test; boxes that merely share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Point test, inclusive on the top/left edges and exclusive on bottom/right
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Shift the box so it lies fully inside `bounds`
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = self.x.min(bounds.right() - self.w).max(bounds.x);
        self.y = self.y.min(bounds.bottom() - self.h).max(bounds.y);
    }
}

/// Anything that occupies a box in the playfield
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Movement axis for separated collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Move `rect` by `delta` along `axis`, then snap the leading edge flush
/// against every obstacle it now overlaps.
///
/// Returns true if any obstacle was hit. With several overlapping obstacles
/// the most restrictive edge wins, so the box never ends inside any of them.
pub fn move_axis<B: Bounds>(rect: &mut Rect, axis: Axis, delta: f32, obstacles: &[B]) -> bool {
    match axis {
        Axis::X => rect.x += delta,
        Axis::Y => rect.y += delta,
    }

    let mut hit = false;
    for obstacle in obstacles {
        let wall = obstacle.bounds();
        if !rect.intersects(&wall) {
            continue;
        }
        hit = true;
        match axis {
            Axis::X if delta > 0.0 => rect.set_right(rect.right().min(wall.left())),
            Axis::X if delta < 0.0 => rect.set_left(rect.left().max(wall.right())),
            Axis::Y if delta > 0.0 => rect.set_bottom(rect.bottom().min(wall.top())),
            Axis::Y if delta < 0.0 => rect.set_top(rect.top().max(wall.bottom())),
            _ => {}
        }
    }
    hit
}

/// First obstacle (in iteration order) overlapping `rect`
pub fn first_overlap<B: Bounds>(rect: &Rect, obstacles: &[B]) -> Option<usize> {
    obstacles.iter().position(|o| rect.intersects(&o.bounds()))
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let length = delta.length();
    if length == 0.0 || !length.is_finite() {
        None
    } else {
        Some(delta / length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_move_right_into_wall_snaps_flush() {
        let wall = Rect::new(50.0, 0.0, 40.0, 100.0);
        let mut rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let hit = move_axis(&mut rect, Axis::X, 15.0, &[wall]);
        assert!(hit);
        assert_eq!(rect.right(), wall.left());
        assert!(!rect.intersects(&wall));
    }

    #[test]
    fn test_move_each_direction_snaps_to_opposite_edge() {
        let wall = Rect::new(100.0, 100.0, 40.0, 40.0);

        let mut left = Rect::new(145.0, 105.0, 20.0, 20.0);
        assert!(move_axis(&mut left, Axis::X, -10.0, &[wall]));
        assert_eq!(left.left(), wall.right());

        let mut down = Rect::new(105.0, 75.0, 20.0, 20.0);
        assert!(move_axis(&mut down, Axis::Y, 10.0, &[wall]));
        assert_eq!(down.bottom(), wall.top());

        let mut up = Rect::new(105.0, 145.0, 20.0, 20.0);
        assert!(move_axis(&mut up, Axis::Y, -10.0, &[wall]));
        assert_eq!(up.top(), wall.bottom());
    }

    #[test]
    fn test_move_without_obstacle() {
        let wall = Rect::new(500.0, 500.0, 40.0, 40.0);
        let mut rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!move_axis(&mut rect, Axis::Y, 3.0, &[wall]));
        assert_eq!(rect.y, 3.0);
    }

    #[test]
    fn test_most_restrictive_wall_wins() {
        let near = Rect::new(30.0, 0.0, 40.0, 40.0);
        let far = Rect::new(35.0, 0.0, 40.0, 40.0);
        let mut rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        move_axis(&mut rect, Axis::X, 20.0, &[far, near]);
        assert_eq!(rect.right(), 30.0);
    }

    #[test]
    fn test_direction_to_coincident_points() {
        assert!(direction_to(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)).is_none());
        let dir = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0)).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut rect = Rect::new(95.0, -5.0, 10.0, 10.0);
        rect.clamp_within(&bounds);
        assert_eq!(rect, Rect::new(90.0, 0.0, 10.0, 10.0));
    }
}
