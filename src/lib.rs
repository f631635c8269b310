//! Cyber Heist - simulation core for a stealth-infiltration minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, sensors, lasers, hacking, game state)
//! - `tuning`: Data-driven match rules
//!
//! Rendering, windowing and raw input live outside this crate. A host drives
//! [`sim::tick`] once per frame and reads a [`sim::Snapshot`] back.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Physics and layout constants
pub mod consts {
    use glam::Vec3;

    /// Player x/z are clamped into [-ARENA_BOUND, ARENA_BOUND]
    pub const ARENA_BOUND: f32 = 9.5;
    /// Spawn point at level start
    pub const PLAYER_SPAWN: Vec3 = Vec3::new(-8.0, 0.5, -8.0);

    /// Player defaults (all per tick, not per second)
    pub const PLAYER_SPEED: f32 = 0.1;
    pub const PLAYER_RADIUS: f32 = 0.5;
    pub const TURN_STEP_DEGREES: f32 = 5.0;
    pub const JUMP_STRENGTH: f32 = 0.35;
    /// Forward nudge applied along facing on takeoff
    pub const JUMP_NUDGE: f32 = 0.05;
    pub const GRAVITY: f32 = -0.008;
    /// Player centre height when standing
    pub const GROUND_HEIGHT: f32 = 0.5;

    /// Security camera defaults
    pub const CAMERA_HEIGHT: f32 = 2.0;
    pub const CAMERA_RANGE: f32 = 5.0;
    pub const CAMERA_FOV_DEGREES: f32 = 60.0;
    /// Seconds of stillness between sweeps
    pub const CAMERA_SWEEP_INTERVAL: f32 = 5.0;
    /// Radians per second while sweeping
    pub const CAMERA_SWEEP_SPEED: f32 = std::f32::consts::FRAC_PI_2;
    /// Angle added to the current heading at each sweep
    pub const CAMERA_SWEEP_STEP: f32 = std::f32::consts::FRAC_PI_2;
    /// Seconds of continuous sight that make up a full detection
    pub const DETECTION_THRESHOLD: f32 = 2.0;
    /// Fraction of the threshold at which the alarm trips
    pub const ALARM_RATIO: f32 = 0.8;
    /// Delta used on a camera's very first update
    pub const DEFAULT_SENSOR_DT: f32 = 0.016;

    /// Laser defaults
    pub const LASER_PHASE_RATE: f32 = 0.02;
    pub const LASER_AMPLITUDE: f32 = 3.0;
    /// Perpendicular distance (and bounding box margin) that counts as contact
    pub const LASER_HIT_RADIUS: f32 = 0.3;
    /// Players above this height clear the beam
    pub const LASER_HEIGHT_THRESHOLD: f32 = 0.8;

    /// Hacking alphabet and sequence lengths (inclusive)
    pub const HACK_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    pub const HACK_MIN_LEN: usize = 4;
    pub const HACK_MAX_LEN: usize = 6;

    /// Fixed simulation step used by the headless host (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Wrap angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU { 0.0 } else { wrapped }
}

/// Unit vector in the horizontal plane for a facing in degrees.
/// Facing 0 looks down +z, 90 looks down +x.
#[inline]
pub fn facing_vector(facing_degrees: f32) -> Vec3 {
    let rad = facing_degrees.to_radians();
    Vec3::new(rad.sin(), 0.0, rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(-0.5 - TAU) + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert!((wrap_angle(-0.25) - (TAU - 0.25)).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_facing_vector() {
        let f = facing_vector(0.0);
        assert!((f.z - 1.0).abs() < 1e-6 && f.x.abs() < 1e-6);
        let f = facing_vector(90.0);
        assert!((f.x - 1.0).abs() < 1e-6 && f.z.abs() < 1e-6);
    }
}
