//! Simulation state and lifecycle
//!
//! `Simulation` exclusively owns the player, the obstacle batch and the
//! shared scroll speed. Input arrives as queued intents; audio leaves as
//! drained events. The per-frame step lives in `tick.rs`.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::Player;
use super::scale::{Scaled, ScrollSpeed};
use super::ticker::PeriodicTicker;
use crate::consts::MAX_PENDING_INTENTS;
use crate::error::{ConfigResult, validate_viewport};
use crate::format_seconds;
use crate::tuning::Tuning;

/// Discrete cues for the audio sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player flapped; `variant` picks one of the flap sounds
    Flap { variant: u8 },
    /// Charge started
    Charge,
    /// Every obstacle passed
    Win,
    /// Player hit an obstacle
    Lose,
}

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Player intent delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Flap,
    StartCharge,
    StopCharge,
    /// Button or key released
    Release,
    /// Start over with the current viewport
    Restart,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Constants for the current viewport
    pub scaled: Scaled,
    /// Scroll speed shared by every obstacle
    pub speed: ScrollSpeed,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles passed while the game was live
    pub score: u32,
    /// Milliseconds elapsed while the game was live
    pub timer_ms: f32,
    pub game_over: bool,
    pub outcome: Option<Outcome>,
    pub message1: String,
    pub message2: String,
    /// Energy tick clock
    pub ticker: PeriodicTicker,
    /// Frames advanced since the last reset
    pub frame: u64,
    tuning: Tuning,
    intents: VecDeque<Intent>,
    events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl Simulation {
    /// Create a simulation for a `width` x `height` viewport
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> ConfigResult<Self> {
        tuning.validate()?;
        validate_viewport(width, height)?;

        let scaled = Scaled::new(&tuning, width, height);
        let mut sim = Self {
            seed,
            scaled,
            speed: ScrollSpeed::new(&scaled),
            player: Player::new(&tuning, &scaled),
            obstacles: Vec::with_capacity(tuning.obstacle_count),
            score: 0,
            timer_ms: 0.0,
            game_over: false,
            outcome: None,
            message1: String::new(),
            message2: String::new(),
            ticker: PeriodicTicker::new(tuning.event_interval_ms),
            frame: 0,
            tuning,
            intents: VecDeque::with_capacity(MAX_PENDING_INTENTS),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        sim.rebuild(width, height);
        Ok(sim)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Full reset for a new viewport size.
    ///
    /// Invalid dimensions are rejected and leave the current game untouched.
    pub fn reset(&mut self, width: f32, height: f32) -> ConfigResult<()> {
        if let Err(err) = validate_viewport(width, height) {
            log::warn!("Ignoring resize: {}", err);
            return Err(err);
        }
        self.rebuild(width, height);
        Ok(())
    }

    /// Start over with the current viewport
    pub fn restart(&mut self) {
        self.rebuild(self.scaled.width, self.scaled.height);
    }

    fn rebuild(&mut self, width: f32, height: f32) {
        self.scaled = Scaled::new(&self.tuning, width, height);
        self.speed = ScrollSpeed::new(&self.scaled);
        self.player.reset(&self.tuning, &self.scaled);
        self.spawn_obstacles();
        self.score = 0;
        self.timer_ms = 0.0;
        self.game_over = false;
        self.outcome = None;
        self.message1.clear();
        self.message2.clear();
        self.ticker.reset();
        self.frame = 0;

        log::info!(
            "Reset to {}x{} (ratio {:.3}, {} obstacles, seed {})",
            width,
            height,
            self.scaled.ratio,
            self.obstacles.len(),
            self.seed
        );
    }

    fn spawn_obstacles(&mut self) {
        self.obstacles.clear();
        for i in 0..self.tuning.obstacle_count {
            let x = self.scaled.first_obstacle_offset + i as f32 * self.scaled.obstacle_spacing;
            let id = self.next_entity_id();
            let obstacle = Obstacle::spawn(id, x, &self.scaled, &mut self.rng);
            self.obstacles.push(obstacle);
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an intent for the start of the next frame.
    ///
    /// Returns false (and drops the intent) when the queue is full.
    pub fn push_intent(&mut self, intent: Intent) -> bool {
        if self.intents.len() >= MAX_PENDING_INTENTS {
            log::warn!("Intent queue full, dropping {:?}", intent);
            return false;
        }
        self.intents.push_back(intent);
        true
    }

    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    /// Apply every queued intent in arrival order
    pub(crate) fn drain_intents(&mut self) {
        while let Some(intent) = self.intents.pop_front() {
            self.apply_intent(intent);
        }
    }

    /// Apply an intent immediately
    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Flap => self.player.flap(&mut self.speed, &mut self.rng, &mut self.events),
            Intent::StartCharge => self.player.start_charge(&mut self.speed, &mut self.events),
            Intent::StopCharge => self.player.stop_charge(&mut self.speed),
            Intent::Release => self.player.release(),
            Intent::Restart => self.restart(),
        }
    }

    /// Take every cue emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run once; the outcome depends on whether obstacles remain
    pub fn trigger_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;

        let time = format_seconds(self.timer_ms);
        if self.obstacles.is_empty() {
            self.outcome = Some(Outcome::Win);
            self.message1 = "Nailed it!!".to_string();
            self.message2 = format!("Collision Time: {} seconds!!", time);
            self.events.push(GameEvent::Win);
            log::info!("Cleared every obstacle in {}s", time);
        } else {
            self.outcome = Some(Outcome::Loss);
            self.message1 = "GAME OVER !!".to_string();
            self.message2 = format!("Can you do it faster than {} seconds ?", time);
            self.events.push(GameEvent::Lose);
            log::info!(
                "Collision after {}s with {} obstacles left",
                time,
                self.obstacles.len()
            );
        }
    }
}
