//! Per-frame simulation step
//!
//! Order within a frame is fixed: queued intents, timer, energy ticker,
//! player, then each obstacle followed by its collision check. Collisions
//! always see post-update positions of both circles.

use super::obstacle::Removal;
use super::state::Simulation;
use crate::sanitize_delta;

impl Simulation {
    /// Advance the game by one rendered frame of `delta_ms` milliseconds
    pub fn advance(&mut self, delta_ms: f32) {
        let delta_ms = sanitize_delta(delta_ms);

        self.drain_intents();

        if !self.game_over {
            self.timer_ms += delta_ms;
        }
        self.ticker.tick(delta_ms);
        self.player
            .update(&self.scaled, self.ticker.fired(), &mut self.speed);

        let player_circle = self.player.collision_circle();
        let mut passed = 0;
        let mut hit = false;
        for obstacle in &mut self.obstacles {
            obstacle.update(&self.scaled, self.speed.current(), self.game_over);
            match obstacle.removed {
                Some(Removal::Passed) => passed += 1,
                Some(Removal::Hit) => {}
                None => {
                    if !self.game_over && obstacle.collision_circle().overlaps(&player_circle) {
                        obstacle.mark_hit();
                        hit = true;
                    }
                }
            }
        }

        if !self.game_over {
            self.score += passed;
        }
        // The hit obstacle is still in the collection here, so this resolves as a loss
        if hit {
            self.trigger_game_over();
        }
        self.obstacles.retain(|o| !o.is_removed());
        if self.obstacles.is_empty() {
            self.trigger_game_over();
        }

        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{GameEvent, Intent, Outcome};
    use crate::tuning::Tuning;

    const FRAME_MS: f32 = 16.0;

    fn sim() -> Simulation {
        Simulation::new(Tuning::default(), 1280.0, 720.0, 2024).unwrap()
    }

    /// Rest the player on the floor and park every obstacle along the ceiling
    fn park(sim: &mut Simulation) {
        sim.player.pos.y = sim.player.floor_y(&sim.scaled);
        sim.player.vel_y = 0.0;
        for obstacle in &mut sim.obstacles {
            obstacle.pos.y = 0.0;
            obstacle.vel_y = 0.0;
        }
    }

    fn run_until_over(sim: &mut Simulation, max_frames: u32) {
        for _ in 0..max_frames {
            if sim.game_over {
                return;
            }
            sim.advance(FRAME_MS);
        }
    }

    #[test]
    fn test_win_after_every_obstacle_passes() {
        let mut sim = sim();
        park(&mut sim);
        assert_eq!(sim.obstacles.len(), 6);

        run_until_over(&mut sim, 5000);

        assert!(sim.game_over);
        assert!(sim.obstacles.is_empty());
        assert_eq!(sim.score, 6);
        assert_eq!(sim.outcome, Some(Outcome::Win));
        let time = crate::format_seconds(sim.timer_ms);
        assert_eq!(sim.message2, format!("Collision Time: {} seconds!!", time));
        assert!(sim.drain_events().contains(&GameEvent::Win));
    }

    #[test]
    fn test_collision_loses_and_removes_obstacle() {
        let mut sim = sim();
        park(&mut sim);
        let target = sim.obstacles[0].id;
        sim.obstacles[0].pos = sim.player.pos + Vec2::new(40.0, -40.0);

        sim.advance(FRAME_MS);

        assert!(sim.game_over);
        assert_eq!(sim.outcome, Some(Outcome::Loss));
        assert_eq!(sim.message1, "GAME OVER !!");
        assert_eq!(sim.obstacles.len(), 5);
        assert!(sim.obstacles.iter().all(|o| o.id != target));
        assert_eq!(sim.drain_events(), vec![GameEvent::Lose]);
    }

    #[test]
    fn test_hitting_last_obstacle_is_still_a_loss() {
        let mut sim = sim();
        park(&mut sim);
        sim.obstacles.truncate(1);
        sim.obstacles[0].pos = sim.player.pos + Vec2::new(40.0, -40.0);

        sim.advance(FRAME_MS);

        assert!(sim.obstacles.is_empty());
        assert_eq!(sim.outcome, Some(Outcome::Loss));
    }

    #[test]
    fn test_timer_freezes_after_game_over() {
        let mut sim = sim();
        park(&mut sim);
        sim.advance(FRAME_MS);
        sim.trigger_game_over();
        let frozen = sim.timer_ms;
        let score = sim.score;
        for _ in 0..2000 {
            sim.advance(FRAME_MS);
        }
        assert_eq!(sim.timer_ms, frozen);
        assert_eq!(sim.score, score);
        assert_eq!(sim.outcome, Some(Outcome::Loss));
    }

    #[test]
    fn test_negative_delta_is_absorbed() {
        let mut sim = sim();
        sim.advance(FRAME_MS);
        sim.advance(-500.0);
        sim.advance(f32::NAN);
        assert_eq!(sim.timer_ms, FRAME_MS);
    }

    #[test]
    fn test_charge_speeds_up_obstacles() {
        let mut sim = sim();
        park(&mut sim);
        let x = sim.obstacles[0].pos.x;
        sim.push_intent(Intent::StartCharge);
        sim.advance(FRAME_MS);
        assert!(sim.player.charging);
        assert_eq!(sim.obstacles[0].pos.x, x - 16.0);

        sim.push_intent(Intent::StopCharge);
        sim.advance(FRAME_MS);
        assert_eq!(sim.obstacles[0].pos.x, x - 20.0);
    }

    #[test]
    fn test_energy_follows_ticker_not_frames() {
        let mut sim = sim();
        park(&mut sim);
        // 9 frames of 16ms cross one 150ms interval
        for _ in 0..9 {
            sim.advance(FRAME_MS);
        }
        assert_eq!(sim.player.energy, 30);
        sim.advance(FRAME_MS);
        assert_eq!(sim.player.energy, 31);
        assert_eq!(sim.ticker.total_ticks(), 1);
    }

    #[test]
    fn test_restart_intent_resets_run() {
        let mut sim = sim();
        park(&mut sim);
        sim.advance(FRAME_MS);
        sim.trigger_game_over();
        assert!(sim.frame > 0);
        sim.push_intent(Intent::Restart);
        sim.advance(FRAME_MS);
        // Restart happens before this frame's step
        assert_eq!(sim.frame, 1);
        assert!(!sim.game_over);
        assert_eq!(sim.obstacles.len(), 6);
        assert_eq!(sim.timer_ms, FRAME_MS);
    }

    #[test]
    fn test_falling_to_floor_is_safe() {
        let mut sim = sim();
        park(&mut sim);
        for _ in 0..50 {
            sim.advance(FRAME_MS);
        }
        assert!(!sim.game_over);
        assert!(sim.player.is_touching_bottom(&sim.scaled));
    }
}
