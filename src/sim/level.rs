//! Level layouts
//!
//! Every level shares the same walls, terminals and objective. Cameras and
//! lasers are taken in order from fixed pools, one more of each per level.

use glam::Vec3;

use super::camera::SecurityCamera;
use super::laser::{Laser, LaserMotion};
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState, Objective, Terminal, TerminalKind, Wall};
use crate::tuning::Tuning;

/// Walls as (x, y, z, size_x, size_y, size_z); sizes are full extents
pub const WALL_LAYOUT: [(f32, f32, f32, f32, f32, f32); 7] = [
    // Perimeter
    (0.0, 1.5, -10.0, 20.0, 3.0, 1.0),
    (0.0, 1.5, 10.0, 20.0, 3.0, 1.0),
    (-10.0, 1.5, 0.0, 1.0, 3.0, 20.0),
    (10.0, 1.5, 0.0, 1.0, 3.0, 20.0),
    // Interior cover
    (-3.0, 1.5, -3.0, 1.0, 3.0, 6.0),
    (3.0, 1.5, 3.0, 6.0, 3.0, 1.0),
    (6.0, 1.5, -6.0, 4.0, 3.0, 1.0),
];

/// Camera mounts (x, z) in unlock order
pub const CAMERA_POOL: [(f32, f32); 8] = [
    (-6.0, -6.0),
    (6.0, 0.0),
    (0.0, 6.0),
    (-2.0, 2.0),
    (4.0, -4.0),
    (-7.0, 3.0),
    (2.0, -7.0),
    (8.0, -2.0),
];

/// Lasers (x1, z1, x2, z2, motion) in unlock order
pub const LASER_POOL: [(f32, f32, f32, f32, LaserMotion); 8] = [
    (-1.0, -1.0, 1.0, -1.0, LaserMotion::HorizontalFixed),
    (4.0, -4.0, 4.0, -2.0, LaserMotion::VerticalFixed),
    (-4.0, 4.0, -2.0, 4.0, LaserMotion::HorizontalFixed),
    (-6.0, -6.0, -6.0, -4.0, LaserMotion::VerticalFixed),
    (6.0, 2.0, 8.0, 2.0, LaserMotion::HorizontalFixed),
    (0.0, -8.0, 2.0, -8.0, LaserMotion::HorizontalFixed),
    (-8.0, 0.0, -8.0, 2.0, LaserMotion::VerticalFixed),
    (7.0, -3.0, 7.0, -1.0, LaserMotion::VerticalFixed),
];

pub const CAMERA_TERMINAL_POS: Vec3 = Vec3::new(-7.0, 0.75, 7.0);
pub const LASER_TERMINAL_POS: Vec3 = Vec3::new(7.0, 0.75, -7.0);
pub const OBJECTIVE_POS: Vec3 = Vec3::new(8.0, 1.0, 8.0);

pub fn build_walls() -> Vec<Wall> {
    WALL_LAYOUT
        .iter()
        .map(|&(x, y, z, sx, sy, sz)| {
            Wall::new(Vec3::new(x, y, z), Vec3::new(sx, sy, sz) * 0.5)
        })
        .collect()
}

/// Cameras active on `level`: one per level, capped
pub fn camera_count(level: u32, cap: usize) -> usize {
    (level as usize).min(cap).min(CAMERA_POOL.len())
}

/// Lasers active on `level`: one more than the level, capped
pub fn laser_count(level: u32, cap: usize) -> usize {
    (level as usize + 1).min(cap).min(LASER_POOL.len())
}

pub fn build_cameras(level: u32, cap: usize) -> Vec<SecurityCamera> {
    CAMERA_POOL[..camera_count(level, cap)]
        .iter()
        .map(|&(x, z)| SecurityCamera::new(x, z))
        .collect()
}

pub fn build_lasers(level: u32, cap: usize) -> Vec<Laser> {
    LASER_POOL[..laser_count(level, cap)]
        .iter()
        .map(|&(x1, z1, x2, z2, motion)| Laser::new(x1, z1, x2, z2, motion))
        .collect()
}

/// One terminal per security system
pub fn build_terminals() -> Vec<Terminal> {
    vec![
        Terminal::new(CAMERA_TERMINAL_POS, TerminalKind::Camera),
        Terminal::new(LASER_TERMINAL_POS, TerminalKind::Laser),
    ]
}

/// Seconds allowed on `level`; shrinks each level down to a floor
pub fn time_limit_for_level(level: u32, tuning: &Tuning) -> f32 {
    let shrink = tuning.time_limit_step * level.saturating_sub(1) as f32;
    (tuning.base_time_limit - shrink).max(tuning.min_time_limit)
}

impl GameState {
    /// Advance to the next level, keeping the score
    pub fn next_level(&mut self) {
        self.load_level(self.level + 1);
    }

    /// Back to level 1 with a zero score
    pub fn restart(&mut self) {
        self.score = 0;
        self.load_level(1);
        log::info!("Game restarted");
    }

    /// Rebuild every entity for `level` and resume play
    pub(crate) fn load_level(&mut self, level: u32) {
        let level = level.max(1);
        self.level = level;
        self.walls = build_walls();
        self.cameras = build_cameras(level, self.tuning.max_cameras);
        self.lasers = build_lasers(level, self.tuning.max_lasers);
        self.terminals = build_terminals();
        self.objective = Objective {
            position: OBJECTIVE_POS,
        };
        self.player = Player::default();
        self.hack = None;
        self.hack_lives = self.tuning.hack_lives;
        self.objective_notified = false;

        self.level_start = self.clock;
        self.time_limit = time_limit_for_level(level, &self.tuning);
        self.time_left = self.time_limit;
        self.transition(GamePhase::Playing);

        log::info!(
            "Level {} started: cameras {}, lasers {}, hack lives {}",
            level,
            self.cameras.len(),
            self.lasers.len(),
            self.hack_lives
        );
        self.events.push(GameEvent::LevelStarted {
            level,
            cameras: self.cameras.len(),
            lasers: self.lasers.len(),
            hack_lives: self.hack_lives,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_SPAWN;

    #[test]
    fn test_counts_scale_with_level() {
        let tuning = Tuning::default();
        assert_eq!(build_cameras(1, tuning.max_cameras).len(), 1);
        assert_eq!(build_lasers(1, tuning.max_lasers).len(), 2);
        assert_eq!(build_cameras(5, tuning.max_cameras).len(), 5);
        assert_eq!(build_lasers(5, tuning.max_lasers).len(), 6);
        assert_eq!(build_cameras(12, tuning.max_cameras).len(), 8);
        assert_eq!(build_lasers(7, tuning.max_lasers).len(), 8);
    }

    #[test]
    fn test_counts_respect_tuning_cap() {
        assert_eq!(camera_count(6, 3), 3);
        assert_eq!(laser_count(6, 4), 4);
    }

    #[test]
    fn test_pools_taken_in_order() {
        let cams = build_cameras(3, 8);
        assert_eq!(cams[2].mount_position, Vec3::new(0.0, 0.0, 6.0));
        let lasers = build_lasers(2, 8);
        assert_eq!(lasers[2].motion, LaserMotion::HorizontalFixed);
        assert_eq!(lasers[2].original_start, Vec3::new(-4.0, 0.0, 4.0));
    }

    #[test]
    fn test_time_limit_floor() {
        let tuning = Tuning::default();
        assert_eq!(time_limit_for_level(1, &tuning), 120.0);
        assert_eq!(time_limit_for_level(2, &tuning), 110.0);
        assert_eq!(time_limit_for_level(4, &tuning), 90.0);
        assert_eq!(time_limit_for_level(9, &tuning), 90.0);
    }

    #[test]
    fn test_spawn_clear_of_walls() {
        let player = Player::default();
        assert_eq!(player.position, PLAYER_SPAWN);
        assert!(!player.collides_with_any(&build_walls()));
    }

    #[test]
    fn test_next_level_resets_entities_keeps_score() {
        let mut state = GameState::new(5);
        state.score = 1234;
        state.hack_lives = 0;
        state.terminals[0].hacked = true;
        state.player.position = Vec3::new(3.0, 0.5, 3.0);
        state.phase = GamePhase::Won;
        state.clock = 42.0;

        state.next_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 1234);
        assert_eq!(state.hack_lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.cameras.len(), 2);
        assert_eq!(state.lasers.len(), 3);
        assert!(state.terminals.iter().all(|t| !t.hacked));
        assert_eq!(state.player.position, PLAYER_SPAWN);
        assert_eq!(state.time_left, 110.0);
        assert_eq!(state.level_start, 42.0);
    }

    #[test]
    fn test_restart_resets_level_and_score() {
        let mut state = GameState::new(5);
        state.next_level();
        state.next_level();
        state.score = 900;
        state.phase = GamePhase::GameOver;

        state.restart();
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, 120.0);
        assert_eq!(state.cameras.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
