//! Device events to simulation intents
//!
//! Keyboard, mouse and touch handlers call into here and push whatever comes
//! back onto the simulation's intent queue.

use crate::sim::Intent;

/// Horizontal travel (px) that turns a tap into a charge swipe
pub const SWIPE_DISTANCE: f32 = 50.0;

/// Intent for a key press, by `KeyboardEvent.key`
pub fn key_down(key: &str) -> Option<Intent> {
    match key {
        " " | "Enter" => Some(Intent::Flap),
        "Shift" | "c" | "C" => Some(Intent::StartCharge),
        "r" | "R" => Some(Intent::Restart),
        _ => None,
    }
}

/// Any key release relaxes the pose
pub fn key_up(_key: &str) -> Intent {
    Intent::Release
}

/// Moving the mouse over the canvas flaps
pub fn mouse_move() -> Intent {
    Intent::Flap
}

pub fn mouse_up() -> Intent {
    Intent::Release
}

/// Tracks a touch from start to end to tell taps from swipes
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// A swipe right starts a charge, anything else flaps
    pub fn touch_end(&mut self, x: f32) -> Intent {
        match self.start_x.take() {
            Some(start) if x - start > SWIPE_DISTANCE => Intent::StartCharge,
            _ => Intent::Flap,
        }
    }
}
