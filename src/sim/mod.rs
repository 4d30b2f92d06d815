//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame deltas come from the caller, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod scale;
pub mod state;
pub mod tick;
pub mod ticker;

pub use collision::{Circle, circles_collide};
pub use obstacle::{Obstacle, Removal};
pub use player::{Player, WindState};
pub use scale::{Scaled, ScrollSpeed};
pub use state::{GameEvent, Intent, Outcome, Simulation};
pub use ticker::PeriodicTicker;
