//! Ratio-scaled constants
//!
//! Recomputed on every reset from the viewport and the baseline `Tuning`.
//! Entities receive this snapshot by reference during `update()`.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Read-only physics snapshot for one viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaled {
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// height / base_height
    pub ratio: f32,
    pub gravity: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub bottom_margin: f32,
    pub obstacle_size: f32,
    pub obstacle_bob_speed: f32,
    pub obstacle_fall_accel: f32,
    pub obstacle_spacing: f32,
    pub first_obstacle_offset: f32,
}

impl Scaled {
    pub fn new(tuning: &Tuning, width: f32, height: f32) -> Self {
        let ratio = height / tuning.base_height;
        let min_speed = tuning.min_speed * ratio;
        Self {
            width,
            height,
            ratio,
            gravity: tuning.gravity * ratio,
            min_speed,
            max_speed: min_speed * tuning.charge_speed_factor,
            bottom_margin: (tuning.bottom_margin * ratio).floor(),
            obstacle_size: tuning.obstacle_size * ratio,
            obstacle_bob_speed: tuning.obstacle_bob_speed * ratio,
            obstacle_fall_accel: tuning.obstacle_fall_accel,
            obstacle_spacing: tuning.obstacle_spacing * ratio,
            first_obstacle_offset: tuning.first_obstacle_offset() * ratio,
        }
    }
}

/// Horizontal scroll speed shared by every obstacle.
///
/// Only the player's charge transitions write it; only obstacles read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSpeed {
    current: f32,
    min: f32,
    max: f32,
}

impl ScrollSpeed {
    pub fn new(scaled: &Scaled) -> Self {
        Self {
            current: scaled.min_speed,
            min: scaled.min_speed,
            max: scaled.max_speed,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn is_boosted(&self) -> bool {
        self.current == self.max
    }

    /// Switch to charge speed
    pub fn boost(&mut self) {
        self.current = self.max;
    }

    /// Back to cruising speed
    pub fn relax(&mut self) {
        self.current = self.min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_ratio_constants() {
        let scaled = Scaled::new(&Tuning::default(), 1280.0, 720.0);
        assert_eq!(scaled.ratio, 1.0);
        assert_eq!(scaled.gravity, 0.15);
        assert_eq!(scaled.min_speed, 4.0);
        assert_eq!(scaled.max_speed, 16.0);
        assert_eq!(scaled.bottom_margin, 50.0);
        assert_eq!(scaled.first_obstacle_offset, 720.0);
    }

    #[test]
    fn test_constants_scale_linearly() {
        let scaled = Scaled::new(&Tuning::default(), 1920.0, 1440.0);
        assert_eq!(scaled.ratio, 2.0);
        assert!((scaled.gravity - 0.3).abs() < 1e-6);
        assert_eq!(scaled.min_speed, 8.0);
        assert_eq!(scaled.max_speed, 32.0);
        assert_eq!(scaled.obstacle_spacing, 1200.0);
    }

    #[test]
    fn test_first_offset_tracks_custom_base_height() {
        let tuning = Tuning {
            base_height: 1080.0,
            ..Tuning::default()
        };
        let scaled = Scaled::new(&tuning, 1920.0, 540.0);
        assert_eq!(scaled.ratio, 0.5);
        assert_eq!(scaled.first_obstacle_offset, 540.0);
    }

    #[test]
    fn test_scroll_speed_switches() {
        let scaled = Scaled::new(&Tuning::default(), 1280.0, 720.0);
        let mut speed = ScrollSpeed::new(&scaled);
        assert_eq!(speed.current(), 4.0);
        speed.boost();
        assert!(speed.is_boosted());
        assert_eq!(speed.current(), 16.0);
        speed.relax();
        assert_eq!(speed.current(), 4.0);
    }
}
