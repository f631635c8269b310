//! Simulation tick
//!
//! One call per frame. One-shot commands are routed first, then the world
//! advances in a fixed order while the phase is `Playing`.

use super::camera::DetectionStatus;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState};

/// Input intent for a single tick
///
/// Movement flags are held states; the rest are one-shot commands.
#[derive(Debug, Clone, Default)]
pub struct InputIntent {
    pub turn_left: bool,
    pub turn_right: bool,
    /// Move along the facing direction
    pub move_forward: bool,
    pub move_back: bool,
    pub jump: bool,
    /// World-axis strafes (-x, +x, -z, +z)
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub strafe_forward: bool,
    pub strafe_back: bool,
    /// Start a hack at the nearest terminal
    pub interact: bool,
    /// Character typed into an open hack challenge
    pub hack_char: Option<char>,
    pub toggle_view: bool,
    /// Restart after game over, continue after a win
    pub restart: bool,
    pub next_level: bool,
    /// Abandon the hack challenge
    pub cancel: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &InputIntent, dt: f32) {
    state.clock += f64::from(dt.max(0.0));

    route_commands(state, input);

    if matches!(state.phase, GamePhase::Playing | GamePhase::Hacking) {
        update_timer(state);
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.time_left <= 0.0 {
        state.game_over(GameOverReason::TimeExceeded);
        return;
    }

    state.player.update(input, &state.walls);

    if update_cameras(state) {
        state.game_over(GameOverReason::Detected);
        return;
    }

    if update_lasers(state) {
        state.game_over(GameOverReason::HitByLaser);
        return;
    }

    check_objective(state);
}

fn route_commands(state: &mut GameState, input: &InputIntent) {
    if input.cancel {
        state.cancel_hack();
    }
    if input.interact && state.phase == GamePhase::Playing {
        state.try_hack();
    }
    if let Some(c) = input.hack_char {
        state.feed_hack_char(c);
    }
    if input.restart {
        match state.phase {
            GamePhase::GameOver => state.restart(),
            GamePhase::Won => state.next_level(),
            GamePhase::Playing | GamePhase::Hacking => {}
        }
    }
    if input.next_level && state.phase == GamePhase::Won {
        state.next_level();
    }
    if input.toggle_view {
        state.view_mode = state.view_mode.toggled();
        log::debug!("View mode {:?}", state.view_mode);
    }
}

/// Whole seconds left, measured from the level start on the clock
fn update_timer(state: &mut GameState) {
    let elapsed = (state.clock - state.level_start).max(0.0).floor() as f32;
    state.time_left = (state.time_limit - elapsed).max(0.0);
}

/// Returns true when any camera raised the alarm
fn update_cameras(state: &mut GameState) -> bool {
    let now = state.clock;

    if state.camera_system_offline() {
        for cam in &mut state.cameras {
            cam.disable();
            cam.advance_sweep(now);
        }
        return false;
    }

    let target = state.player.position;
    let mut alarm = false;
    for (index, cam) in state.cameras.iter_mut().enumerate() {
        cam.advance_sweep(now);
        let previous = cam.status;
        let status = cam.update_detection(target, &state.walls, now);
        if status != previous {
            log::debug!("Camera {} detection {:?} -> {:?}", index, previous, status);
            state.events.push(GameEvent::DetectionChanged {
                camera: index,
                status,
            });
        }
        if status == DetectionStatus::Alarm {
            alarm = true;
            break;
        }
    }
    alarm
}

/// Returns true when the player touched an active beam
fn update_lasers(state: &mut GameState) -> bool {
    for laser in &mut state.lasers {
        laser.update();
    }

    if state.laser_system_offline() {
        for laser in &mut state.lasers {
            laser.active = false;
        }
        return false;
    }

    let target = state.player.position;
    state.lasers.iter().any(|l| l.collides_with(target))
}

fn check_objective(state: &mut GameState) {
    let distance = state.player.position.distance(state.objective.position);
    if distance >= state.tuning.objective_radius {
        state.objective_notified = false;
        return;
    }

    let camera_hacked = state.camera_system_offline();
    let laser_hacked = state.laser_system_offline();
    if camera_hacked && laser_hacked {
        state.win_level();
        return;
    }

    if !state.objective_notified {
        state.objective_notified = true;
        log::info!(
            "Objective locked: camera system {}, laser system {}",
            if camera_hacked { "offline" } else { "online" },
            if laser_hacked { "offline" } else { "online" },
        );
        state.events.push(GameEvent::ObjectiveLocked {
            camera_hacked,
            laser_hacked,
        });
    }
}
