//! The player sprite: vertical motion, wind poses and the energy/charge
//! state machine.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use super::scale::{Scaled, ScrollSpeed};
use super::state::GameEvent;
use crate::consts::FLAP_VARIANTS;
use crate::tuning::Tuning;

/// Animation pose, one sprite-sheet row each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindState {
    /// Resting on the floor
    #[default]
    Idle,
    /// Just flapped
    WindDown,
    /// Falling or hovering
    WindUp,
    /// Charging through obstacles
    Charging,
}

impl WindState {
    /// Row of the player sprite sheet for this pose
    pub fn sprite_row(self) -> u8 {
        match self {
            WindState::Idle => 0,
            WindState::WindDown => 1,
            WindState::WindUp => 2,
            WindState::Charging => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical speed in pixels per frame (negative = up)
    pub vel_y: f32,
    pub energy: i32,
    pub min_energy: i32,
    pub max_energy: i32,
    pub wind: WindState,
    pub charging: bool,
    flap_speed: f32,
    radius: f32,
    charge_drain: i32,
    start_energy: i32,
    collision_center: Vec2,
}

impl Player {
    /// Build a player sized for `scaled` and placed at its start position
    pub fn new(tuning: &Tuning, scaled: &Scaled) -> Self {
        let mut player = Self {
            pos: Vec2::new(tuning.player_x, 0.0),
            width: 0.0,
            height: 0.0,
            vel_y: 0.0,
            energy: tuning.start_energy,
            min_energy: tuning.min_energy,
            max_energy: tuning.max_energy(),
            wind: WindState::Idle,
            charging: false,
            flap_speed: 0.0,
            radius: 0.0,
            charge_drain: tuning.charge_drain,
            start_energy: tuning.start_energy,
            collision_center: Vec2::ZERO,
        };
        player.reset(tuning, scaled);
        player
    }

    /// Re-derive size and speeds for a new viewport and restore the start state
    pub fn reset(&mut self, tuning: &Tuning, scaled: &Scaled) {
        let ratio = scaled.ratio;
        self.width = tuning.player_size * ratio;
        self.height = tuning.player_size * ratio;
        self.pos = Vec2::new(
            tuning.player_x,
            scaled.height * 0.5 - self.height * 0.5,
        );
        self.vel_y = -tuning.launch_speed * ratio;
        self.flap_speed = tuning.flap_speed * ratio;
        self.radius = tuning.player_radius * ratio;
        self.min_energy = tuning.min_energy;
        self.max_energy = tuning.max_energy();
        self.charge_drain = tuning.charge_drain;
        self.start_energy = tuning.start_energy;
        self.energy = self.start_energy;
        self.wind = WindState::Idle;
        self.charging = false;
        self.refresh_collision_center();
    }

    #[inline]
    pub fn collision_circle(&self) -> Circle {
        Circle::new(self.collision_center, self.radius)
    }

    /// Lowest y the sprite may occupy
    #[inline]
    pub fn floor_y(&self, scaled: &Scaled) -> f32 {
        (scaled.height - self.height).max(0.0)
    }

    #[inline]
    pub fn is_touching_top(&self) -> bool {
        self.pos.y <= 0.0
    }

    #[inline]
    pub fn is_touching_bottom(&self, scaled: &Scaled) -> bool {
        self.pos.y >= self.floor_y(scaled)
    }

    /// Upward impulse; cancels any charge first
    pub fn flap<R: Rng>(&mut self, speed: &mut ScrollSpeed, rng: &mut R, events: &mut Vec<GameEvent>) {
        self.stop_charge(speed);
        if !self.is_touching_top() {
            self.vel_y = -self.flap_speed;
            events.push(GameEvent::Flap {
                variant: rng.random_range(0..FLAP_VARIANTS),
            });
            self.wind_down();
        }
    }

    /// Start charging if there is enough energy; any other call cancels the charge
    pub fn start_charge(&mut self, speed: &mut ScrollSpeed, events: &mut Vec<GameEvent>) {
        if self.energy >= self.min_energy && !self.charging {
            self.charging = true;
            speed.boost();
            self.wind = WindState::Charging;
            events.push(GameEvent::Charge);
            log::debug!("charge started with {} energy", self.energy);
        } else {
            self.stop_charge(speed);
        }
    }

    pub fn stop_charge(&mut self, speed: &mut ScrollSpeed) {
        if self.charging {
            log::debug!("charge stopped with {} energy", self.energy);
        }
        self.charging = false;
        speed.relax();
    }

    /// Input released: show the neutral falling pose
    pub fn release(&mut self) {
        self.wind_up();
    }

    /// One frame of energy, pose and vertical motion
    pub fn update(&mut self, scaled: &Scaled, tick_fired: bool, speed: &mut ScrollSpeed) {
        if tick_fired {
            self.handle_energy(speed);
        }

        if self.vel_y >= 0.0 {
            self.wind_up();
        }
        self.pos.y += self.vel_y;

        if !self.is_touching_bottom(scaled) && !self.charging {
            self.vel_y += scaled.gravity;
        } else {
            self.vel_y = 0.0;
        }

        if self.is_touching_bottom(scaled) {
            self.pos.y = self.floor_y(scaled);
            self.wind_idle();
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = self.vel_y.max(0.0);
        }

        self.refresh_collision_center();
    }

    /// Regenerate one unit and pay the charge cost; both apply in the same tick
    fn handle_energy(&mut self, speed: &mut ScrollSpeed) {
        if self.energy < self.max_energy {
            self.energy += 1;
        }
        if self.charging {
            self.energy -= self.charge_drain;
            if self.energy <= 0 {
                self.energy = 0;
                self.stop_charge(speed);
            }
        }
        self.energy = self.energy.clamp(0, self.max_energy);
    }

    fn refresh_collision_center(&mut self) {
        self.collision_center = self.pos + Vec2::new(self.width * 0.5, self.height * 0.5);
    }

    fn wind_idle(&mut self) {
        if !self.charging {
            self.wind = WindState::Idle;
        }
    }

    fn wind_down(&mut self) {
        if !self.charging {
            self.wind = WindState::WindDown;
        }
    }

    fn wind_up(&mut self) {
        if !self.charging {
            self.wind = WindState::WindUp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Player, Scaled, ScrollSpeed) {
        let tuning = Tuning::default();
        let scaled = Scaled::new(&tuning, 1280.0, 720.0);
        let player = Player::new(&tuning, &scaled);
        let speed = ScrollSpeed::new(&scaled);
        (player, scaled, speed)
    }

    #[test]
    fn test_reset_centers_player() {
        let (player, _, _) = setup();
        assert_eq!(player.pos, Vec2::new(50.0, 260.0));
        assert_eq!(player.vel_y, -8.0);
        assert_eq!(player.energy, 30);
        assert_eq!(player.max_energy, 60);
        assert_eq!(player.collision_circle().center, Vec2::new(150.0, 360.0));
        assert_eq!(player.collision_circle().radius, 40.0);
    }

    #[test]
    fn test_start_charge_with_enough_energy() {
        let (mut player, _, mut speed) = setup();
        let mut events = Vec::new();
        player.energy = player.min_energy;
        player.start_charge(&mut speed, &mut events);
        assert!(player.charging);
        assert_eq!(player.wind, WindState::Charging);
        assert_eq!(speed.current(), 16.0);
        assert_eq!(events, vec![GameEvent::Charge]);
    }

    #[test]
    fn test_start_charge_without_energy_stops_charge() {
        let (mut player, _, mut speed) = setup();
        let mut events = Vec::new();
        player.energy = player.min_energy - 1;
        speed.boost();
        player.start_charge(&mut speed, &mut events);
        assert!(!player.charging);
        assert_eq!(speed.current(), 4.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_start_charge_twice_cancels() {
        let (mut player, _, mut speed) = setup();
        let mut events = Vec::new();
        player.start_charge(&mut speed, &mut events);
        player.start_charge(&mut speed, &mut events);
        assert!(!player.charging);
        assert_eq!(speed.current(), 4.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_charge_drains_four_per_tick_until_empty() {
        let (mut player, scaled, mut speed) = setup();
        let mut events = Vec::new();
        player.energy = 30;
        player.start_charge(&mut speed, &mut events);

        let mut last = player.energy;
        while player.charging {
            player.update(&scaled, true, &mut speed);
            if player.charging {
                assert_eq!(player.energy, last - 4);
            }
            last = player.energy;
        }
        assert_eq!(player.energy, 0);
        assert_eq!(speed.current(), scaled.min_speed);
    }

    #[test]
    fn test_energy_only_changes_on_tick() {
        let (mut player, scaled, mut speed) = setup();
        player.update(&scaled, false, &mut speed);
        assert_eq!(player.energy, 30);
        player.update(&scaled, true, &mut speed);
        assert_eq!(player.energy, 31);
    }

    #[test]
    fn test_energy_caps_at_max() {
        let (mut player, scaled, mut speed) = setup();
        for _ in 0..200 {
            player.update(&scaled, true, &mut speed);
        }
        assert_eq!(player.energy, player.max_energy);
    }

    #[test]
    fn test_flap_sets_velocity_and_cue() {
        let (mut player, _, mut speed) = setup();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut events = Vec::new();
        player.start_charge(&mut speed, &mut events);
        events.clear();

        player.flap(&mut speed, &mut rng, &mut events);
        assert!(!player.charging);
        assert_eq!(speed.current(), 4.0);
        assert_eq!(player.vel_y, -5.0);
        assert_eq!(player.wind, WindState::WindDown);
        assert!(matches!(events.as_slice(), [GameEvent::Flap { variant }] if *variant < FLAP_VARIANTS));
    }

    #[test]
    fn test_flap_blocked_at_top() {
        let (mut player, _, mut speed) = setup();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut events = Vec::new();
        player.pos.y = 0.0;
        player.vel_y = 2.0;
        player.flap(&mut speed, &mut rng, &mut events);
        assert_eq!(player.vel_y, 2.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_falls_to_floor_and_idles() {
        let (mut player, scaled, mut speed) = setup();
        for _ in 0..500 {
            player.update(&scaled, false, &mut speed);
        }
        assert_eq!(player.pos.y, 520.0);
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.wind, WindState::Idle);
    }

    #[test]
    fn test_charging_suspends_gravity() {
        let (mut player, scaled, mut speed) = setup();
        let mut events = Vec::new();
        player.start_charge(&mut speed, &mut events);
        let y = player.pos.y;
        player.update(&scaled, false, &mut speed);
        // Launch velocity applies once, then charging zeroes it
        assert_eq!(player.pos.y, y - 8.0);
        assert_eq!(player.vel_y, 0.0);
        player.update(&scaled, false, &mut speed);
        assert_eq!(player.pos.y, y - 8.0);
        assert_eq!(player.wind, WindState::Charging);
    }

    #[test]
    fn test_top_is_clamped() {
        let (mut player, scaled, mut speed) = setup();
        player.pos.y = 2.0;
        player.vel_y = -5.0;
        player.update(&scaled, false, &mut speed);
        assert_eq!(player.pos.y, 0.0);
        assert!(player.vel_y >= 0.0);
    }

    #[test]
    fn test_release_respects_charge() {
        let (mut player, _, mut speed) = setup();
        player.release();
        assert_eq!(player.wind, WindState::WindUp);
        let mut events = Vec::new();
        player.start_charge(&mut speed, &mut events);
        player.release();
        assert_eq!(player.wind, WindState::Charging);
    }

    #[test]
    fn test_sprite_rows() {
        assert_eq!(WindState::Idle.sprite_row(), 0);
        assert_eq!(WindState::WindDown.sprite_row(), 1);
        assert_eq!(WindState::WindUp.sprite_row(), 2);
        assert_eq!(WindState::Charging.sprite_row(), 3);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Flap,
        Charge,
        Stop,
        Frame { tick: bool },
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Flap),
            Just(Action::Charge),
            Just(Action::Stop),
            any::<bool>().prop_map(|tick| Action::Frame { tick }),
        ]
    }

    proptest! {
        #[test]
        fn prop_energy_and_height_stay_in_bounds(
            actions in proptest::collection::vec(action(), 1..400),
            height in 200.0f32..2000.0,
        ) {
            let tuning = Tuning::default();
            let scaled = Scaled::new(&tuning, height * 1.5, height);
            let mut player = Player::new(&tuning, &scaled);
            let mut speed = ScrollSpeed::new(&scaled);
            let mut rng = Pcg32::seed_from_u64(1);
            let mut events = Vec::new();

            for action in actions {
                match action {
                    Action::Flap => player.flap(&mut speed, &mut rng, &mut events),
                    Action::Charge => player.start_charge(&mut speed, &mut events),
                    Action::Stop => player.stop_charge(&mut speed),
                    Action::Frame { tick } => {
                        player.update(&scaled, tick, &mut speed);
                        prop_assert!(player.pos.y >= 0.0);
                        prop_assert!(player.pos.y <= scaled.height - player.height);
                    }
                }
                prop_assert!(player.energy >= 0 && player.energy <= player.max_energy);
                prop_assert_eq!(player.charging, speed.is_boosted());
                prop_assert!(!player.charging || player.wind == WindState::Charging);
            }
        }
    }
}
