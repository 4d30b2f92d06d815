//! Circle collision
//!
//! Both the player and the obstacles are approximated by a single circle.
//! Touching counts as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A collision circle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True when the circles overlap or touch
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        circles_collide(self, other)
    }
}

/// Check whether two circles overlap (`distance <= r1 + r2`)
pub fn circles_collide(a: &Circle, b: &Circle) -> bool {
    a.center.distance(b.center) <= a.radius + b.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_circles_collide() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(30.0, 0.0), 20.0);
        assert!(circles_collide(&a, &b));
    }

    #[test]
    fn test_separated_circles_miss() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(30.0, 40.0), 20.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_circle_collides() {
        let outer = Circle::new(Vec2::new(100.0, 100.0), 60.0);
        let inner = Circle::new(Vec2::new(110.0, 95.0), 5.0);
        assert!(outer.overlaps(&inner));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.0f32..200.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.0f32..200.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(circles_collide(&a, &b), circles_collide(&b, &a));
        }
    }
}
