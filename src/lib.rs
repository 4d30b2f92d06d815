//! Flap Fish - a flap-or-charge arcade race against the clock
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, outcome)
//! - `view`: Read-only render contract handed to the drawing layer
//! - `controls`: Device events mapped to simulation intents
//! - `tuning`: Data-driven game balance
//! - `settings`: Audio and debug preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod controls;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::{ConfigError, ConfigResult};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Screen height every ratio-scaled constant is authored against
    pub const BASE_HEIGHT: f32 = 720.0;

    /// Number of distinct flap sound variants
    pub const FLAP_VARIANTS: u8 = 5;

    /// Sprite frames available for obstacles
    pub const OBSTACLE_FRAMES: u8 = 4;

    /// Upper bound on intents buffered between two frames
    pub const MAX_PENDING_INTENTS: usize = 16;
}

/// Format a millisecond timer as seconds with one decimal
#[inline]
pub fn format_seconds(timer_ms: f32) -> String {
    format!("{:.1}", timer_ms * 0.001)
}

/// Treat negative or non-finite frame deltas as "no time passed"
#[inline]
pub fn sanitize_delta(delta_ms: f32) -> f32 {
    if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        0.0
    }
}
