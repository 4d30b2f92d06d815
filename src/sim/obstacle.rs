//! Scrolling obstacles
//!
//! Spawned once per reset in a fixed row to the right of the screen. Each one
//! drifts left at the shared scroll speed while bobbing up and down.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use super::scale::Scaled;
use crate::consts::OBSTACLE_FRAMES;

/// Why an obstacle left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Removal {
    /// Scrolled off the left edge (or fell off after game over)
    Passed,
    /// Collided with the player
    Hit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Square sprite size
    pub size: f32,
    /// Vertical bob speed (pixels per frame)
    pub vel_y: f32,
    /// Sprite-sheet column
    pub frame: u8,
    pub removed: Option<Removal>,
    collision_center: Vec2,
}

impl Obstacle {
    /// Create an obstacle at `x` with a random height, bob direction and frame
    pub fn spawn<R: Rng>(id: u32, x: f32, scaled: &Scaled, rng: &mut R) -> Self {
        let size = scaled.obstacle_size;
        let y = rng.random::<f32>() * (scaled.height - size).max(0.0);
        let vel_y = if rng.random_bool(0.5) {
            -scaled.obstacle_bob_speed
        } else {
            scaled.obstacle_bob_speed
        };
        let mut obstacle = Self {
            id,
            pos: Vec2::new(x, y),
            size,
            vel_y,
            frame: rng.random_range(0..OBSTACLE_FRAMES),
            removed: None,
            collision_center: Vec2::ZERO,
        };
        obstacle.refresh_collision_center();
        obstacle
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }

    #[inline]
    pub fn collision_circle(&self) -> Circle {
        Circle::new(self.collision_center, self.radius())
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed.is_some()
    }

    /// Fully past the left edge, or dropped below the screen
    pub fn is_off_screen(&self, scaled: &Scaled) -> bool {
        self.pos.x + self.size < 0.0 || self.pos.y > scaled.height
    }

    pub fn mark_hit(&mut self) {
        self.removed = Some(Removal::Hit);
    }

    /// Scroll left, bob (or fall once the game is over) and flag removal
    pub fn update(&mut self, scaled: &Scaled, scroll_speed: f32, game_over: bool) {
        if self.is_removed() {
            return;
        }

        self.pos.x -= scroll_speed;
        self.pos.y += self.vel_y;
        self.refresh_collision_center();

        if !game_over {
            let floor = (scaled.height - self.size).max(0.0);
            if self.pos.y <= 0.0 {
                self.vel_y = self.vel_y.abs();
            } else if self.pos.y >= floor {
                self.vel_y = -self.vel_y.abs();
            }
        } else {
            self.vel_y += scaled.obstacle_fall_accel;
        }

        if self.is_off_screen(scaled) {
            self.removed = Some(Removal::Passed);
        }
    }

    fn refresh_collision_center(&mut self) {
        self.collision_center = self.pos + Vec2::splat(self.size * 0.5);
    }
}
