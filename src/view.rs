//! Render contract
//!
//! Everything the drawing layer needs, copied out of the simulation so the
//! renderer never touches live state.

use serde::{Deserialize, Serialize};

use crate::sim::{Circle, Simulation};

/// Which sprite sheet to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Obstacle,
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite-sheet row (player wind pose)
    pub pose_index: u8,
    /// Sprite-sheet column (obstacle variant)
    pub frame: u8,
}

/// Color band for the energy bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyBand {
    /// At or below the charge threshold
    Low,
    Normal,
    /// Fully topped up
    Full,
}

/// Status overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudStatus {
    pub score: u32,
    pub timer_seconds: f32,
    /// Timer formatted to one decimal
    pub timer_text: String,
    pub energy: i32,
    pub min_energy: i32,
    pub max_energy: i32,
    pub energy_band: EnergyBand,
    pub game_over: bool,
    pub message1: String,
    pub message2: String,
}

/// Ratio-scaled text and bar sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudLayout {
    pub small_font: f32,
    pub large_font: f32,
    /// Height of one energy unit in the bar
    pub bar_size: f32,
    pub bottom_margin: f32,
}

/// Player first, then obstacles in spawn order
pub fn sprites(sim: &Simulation) -> Vec<Sprite> {
    let mut out = Vec::with_capacity(sim.obstacles.len() + 1);
    out.push(Sprite {
        kind: SpriteKind::Player,
        x: sim.player.pos.x,
        y: sim.player.pos.y,
        width: sim.player.width,
        height: sim.player.height,
        pose_index: sim.player.wind.sprite_row(),
        frame: 0,
    });
    out.extend(sim.obstacles.iter().map(|o| Sprite {
        kind: SpriteKind::Obstacle,
        x: o.pos.x,
        y: o.pos.y,
        width: o.size,
        height: o.size,
        pose_index: 0,
        frame: o.frame,
    }));
    out
}

pub fn hud(sim: &Simulation) -> HudStatus {
    let player = &sim.player;
    let energy_band = if player.energy <= player.min_energy {
        EnergyBand::Low
    } else if player.energy >= player.max_energy {
        EnergyBand::Full
    } else {
        EnergyBand::Normal
    };
    HudStatus {
        score: sim.score,
        timer_seconds: sim.timer_ms * 0.001,
        timer_text: crate::format_seconds(sim.timer_ms),
        energy: player.energy,
        min_energy: player.min_energy,
        max_energy: player.max_energy,
        energy_band,
        game_over: sim.game_over,
        message1: sim.message1.clone(),
        message2: sim.message2.clone(),
    }
}

pub fn layout(sim: &Simulation) -> HudLayout {
    let tuning = sim.tuning();
    let ratio = sim.scaled.ratio;
    HudLayout {
        small_font: (tuning.small_font * ratio).floor(),
        large_font: (tuning.large_font * ratio).floor(),
        bar_size: (tuning.bar_size * ratio).ceil() * 0.4,
        bottom_margin: sim.scaled.bottom_margin,
    }
}

/// Debug overlay: player circle first, then obstacles
pub fn collision_circles(sim: &Simulation) -> Vec<Circle> {
    std::iter::once(sim.player.collision_circle())
        .chain(sim.obstacles.iter().map(|o| o.collision_circle()))
        .collect()
}
