//! Data-driven game balance
//!
//! Every value here is authored for a 720px tall screen; `sim::Scaled`
//! multiplies them by the display ratio at reset time.

use serde::{Deserialize, Serialize};

use crate::consts::BASE_HEIGHT;
use crate::error::{ConfigError, ConfigResult};

/// Largest obstacle row a run may spawn
pub const MAX_OBSTACLES: usize = 1024;

/// Baseline gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Reference screen height for the display ratio
    pub base_height: f32,

    // === Physics ===
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Scroll speed while cruising (pixels per frame)
    pub min_speed: f32,
    /// Charge speed = min_speed * charge_speed_factor
    pub charge_speed_factor: f32,

    // === Player ===
    /// Fixed horizontal position (not scaled)
    pub player_x: f32,
    /// Square sprite size
    pub player_size: f32,
    /// Collision circle radius
    pub player_radius: f32,
    /// Upward speed applied by a flap
    pub flap_speed: f32,
    /// Upward speed the player starts with after reset
    pub launch_speed: f32,

    // === Energy ===
    /// Energy after reset (max is twice this)
    pub start_energy: i32,
    /// Minimum energy needed to start a charge
    pub min_energy: i32,
    /// Energy drained per tick while charging
    pub charge_drain: i32,
    /// Milliseconds between energy ticks
    pub event_interval_ms: f32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_spacing: f32,
    /// Distance of the first obstacle from the left edge; `base_height` when unset
    pub first_obstacle_offset: Option<f32>,
    /// Square sprite size
    pub obstacle_size: f32,
    /// Vertical bob speed
    pub obstacle_bob_speed: f32,
    /// Downward acceleration once the game is over
    pub obstacle_fall_accel: f32,

    // === HUD ===
    pub bottom_margin: f32,
    pub small_font: f32,
    pub large_font: f32,
    pub bar_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_height: BASE_HEIGHT,

            gravity: 0.15,
            min_speed: 4.0,
            charge_speed_factor: 4.0,

            player_x: 50.0,
            player_size: 200.0,
            player_radius: 40.0,
            flap_speed: 5.0,
            launch_speed: 8.0,

            start_energy: 30,
            min_energy: 15,
            charge_drain: 5,
            event_interval_ms: 150.0,

            obstacle_count: 6,
            obstacle_spacing: 600.0,
            first_obstacle_offset: None,
            obstacle_size: 120.0,
            obstacle_bob_speed: 1.0,
            obstacle_fall_accel: 0.1,

            bottom_margin: 50.0,
            small_font: 20.0,
            large_font: 37.0,
            bar_size: 5.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Maximum energy the player can bank
    pub fn max_energy(&self) -> i32 {
        self.start_energy.saturating_mul(2)
    }

    /// Unscaled distance of the first obstacle from the left edge
    pub fn first_obstacle_offset(&self) -> f32 {
        self.first_obstacle_offset.unwrap_or(self.base_height)
    }

    /// Check that every constant is in a range the simulation can use
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("base_height", self.base_height),
            ("min_speed", self.min_speed),
            ("charge_speed_factor", self.charge_speed_factor),
            ("player_size", self.player_size),
            ("player_radius", self.player_radius),
            ("event_interval_ms", self.event_interval_ms),
            ("obstacle_size", self.obstacle_size),
            ("obstacle_spacing", self.obstacle_spacing),
            ("first_obstacle_offset", self.first_obstacle_offset()),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning {
                    name,
                    value,
                    expected: "(0, inf)",
                });
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("flap_speed", self.flap_speed),
            ("launch_speed", self.launch_speed),
            ("obstacle_bob_speed", self.obstacle_bob_speed),
            ("obstacle_fall_accel", self.obstacle_fall_accel),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning {
                    name,
                    value,
                    expected: "[0, inf)",
                });
            }
        }

        if self.start_energy <= 0 || self.start_energy > i32::MAX / 2 {
            return Err(ConfigError::InvalidTuning {
                name: "start_energy",
                value: self.start_energy as f32,
                expected: "(0, i32::MAX / 2]",
            });
        }
        if self.min_energy < 0 || self.min_energy > self.max_energy() {
            return Err(ConfigError::InvalidTuning {
                name: "min_energy",
                value: self.min_energy as f32,
                expected: "[0, 2 * start_energy]",
            });
        }
        if self.charge_drain < 0 {
            return Err(ConfigError::InvalidTuning {
                name: "charge_drain",
                value: self.charge_drain as f32,
                expected: "[0, inf)",
            });
        }
        if self.obstacle_count > MAX_OBSTACLES {
            return Err(ConfigError::InvalidTuning {
                name: "obstacle_count",
                value: self.obstacle_count as f32,
                expected: "[0, 1024]",
            });
        }
        Ok(())
    }
}
