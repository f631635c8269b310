//! Security cameras
//!
//! A camera sits still for `sweep_interval` seconds, then turns a quarter
//! revolution at `sweep_speed`. It sees the player when they are within range,
//! inside the cone and not hidden behind a wall. Seeing the player starts a
//! detection timer that trips the alarm at `ALARM_RATIO` of the threshold;
//! losing sight for a single tick resets the timer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::{horizontal_distance, segment_intersects_rect};
use super::state::Wall;
use crate::consts::*;
use crate::{normalize_angle, wrap_angle};

/// Result of one detection update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectionStatus {
    #[default]
    None,
    Detecting,
    Alarm,
}

/// A rotating camera on a pole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityCamera {
    /// Base of the pole on the floor
    pub mount_position: Vec3,
    /// Camera head; sight lines start here
    pub sensor_position: Vec3,
    /// Heading in radians, kept in [0, 2π)
    pub sweep_angle: f32,
    pub target_angle: f32,
    pub rotating: bool,
    pub sweep_timer: f32,
    pub sweep_interval: f32,
    pub sweep_speed: f32,
    pub fov_degrees: f32,
    pub range: f32,
    pub disabled: bool,
    pub detecting: bool,
    /// Seconds of continuous sight; zero whenever `detecting` is false
    pub detection_elapsed: f32,
    pub detection_threshold: f32,
    /// Last status reported by `update_detection`
    pub status: DetectionStatus,
    detection_start: Option<f64>,
    last_update: Option<f64>,
}

impl SecurityCamera {
    pub fn new(x: f32, z: f32) -> Self {
        Self {
            mount_position: Vec3::new(x, 0.0, z),
            sensor_position: Vec3::new(x, CAMERA_HEIGHT, z),
            sweep_angle: 0.0,
            target_angle: 0.0,
            rotating: false,
            sweep_timer: 0.0,
            sweep_interval: CAMERA_SWEEP_INTERVAL,
            sweep_speed: CAMERA_SWEEP_SPEED,
            fov_degrees: CAMERA_FOV_DEGREES,
            range: CAMERA_RANGE,
            disabled: false,
            detecting: false,
            detection_elapsed: 0.0,
            detection_threshold: DETECTION_THRESHOLD,
            status: DetectionStatus::None,
            detection_start: None,
            last_update: None,
        }
    }

    /// Point the camera at a heading (radians)
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.sweep_angle = wrap_angle(angle);
        self.target_angle = self.sweep_angle;
        self
    }

    /// Advance the sweep animation to clock time `now`
    pub fn advance_sweep(&mut self, now: f64) {
        let dt = match self.last_update {
            Some(last) => (now - last).max(0.0) as f32,
            None => DEFAULT_SENSOR_DT,
        };
        self.last_update = Some(now);

        if !self.rotating {
            self.sweep_timer += dt;
            if self.sweep_timer >= self.sweep_interval {
                self.rotating = true;
                self.target_angle = self.sweep_angle + CAMERA_SWEEP_STEP;
                self.sweep_timer = 0.0;
            }
            return;
        }

        let diff = normalize_angle(self.target_angle - self.sweep_angle);
        let step = self.sweep_speed * dt;
        if diff.abs() <= step {
            self.sweep_angle = self.target_angle;
            self.rotating = false;
        } else {
            self.sweep_angle += step * diff.signum();
        }
        self.sweep_angle = wrap_angle(self.sweep_angle);
    }

    /// Visibility test against the player position
    pub fn can_see(&self, target: Vec3, walls: &[Wall]) -> bool {
        if self.disabled {
            return false;
        }

        let dx = target.x - self.sensor_position.x;
        let dz = target.z - self.sensor_position.z;
        if horizontal_distance(self.sensor_position, target) > self.range {
            return false;
        }

        // Into the camera's local frame: +x is straight ahead
        let (sin, cos) = self.sweep_angle.sin_cos();
        let local_x = dx * cos - dz * sin;
        let local_z = dx * sin + dz * cos;
        if local_x <= 0.0 {
            return false;
        }

        let off_axis = local_z.abs().atan2(local_x);
        if off_axis > (self.fov_degrees / 2.0).to_radians() {
            return false;
        }

        self.has_clear_line_of_sight(target, walls)
    }

    /// No wall footprint crosses the chord from camera to target
    pub fn has_clear_line_of_sight(&self, target: Vec3, walls: &[Wall]) -> bool {
        !walls
            .iter()
            .any(|w| segment_intersects_rect(self.sensor_position, target, &w.footprint()))
    }

    /// Run the detection timer for one tick at clock time `now`
    pub fn update_detection(&mut self, target: Vec3, walls: &[Wall], now: f64) -> DetectionStatus {
        let status = if self.can_see(target, walls) {
            match self.detection_start {
                Some(start) if self.detecting => {
                    self.detection_elapsed = (now - start).max(0.0) as f32;
                    if self.detection_elapsed / self.detection_threshold >= ALARM_RATIO {
                        DetectionStatus::Alarm
                    } else {
                        DetectionStatus::Detecting
                    }
                }
                _ => {
                    self.detecting = true;
                    self.detection_start = Some(now);
                    self.detection_elapsed = 0.0;
                    DetectionStatus::Detecting
                }
            }
        } else {
            self.reset_detection();
            DetectionStatus::None
        };
        self.status = status;
        status
    }

    /// Detection progress in [0, 1] for HUD colouring
    pub fn detection_progress(&self) -> f32 {
        if self.detection_threshold <= 0.0 {
            return 0.0;
        }
        (self.detection_elapsed / self.detection_threshold).clamp(0.0, 1.0)
    }

    /// Switch the camera off for good (camera terminal hacked)
    pub fn disable(&mut self) {
        self.disabled = true;
        self.reset_detection();
        self.status = DetectionStatus::None;
    }

    fn reset_detection(&mut self) {
        self.detecting = false;
        self.detection_elapsed = 0.0;
        self.detection_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const PLAYER_Y: f32 = GROUND_HEIGHT;

    /// Camera at origin looking down +x
    fn camera() -> SecurityCamera {
        SecurityCamera::new(0.0, 0.0)
    }

    #[test]
    fn test_sees_player_in_cone() {
        assert!(camera().can_see(Vec3::new(3.0, PLAYER_Y, 0.5), &[]));
    }

    #[test]
    fn test_out_of_range() {
        assert!(!camera().can_see(Vec3::new(5.5, PLAYER_Y, 0.0), &[]));
    }

    #[test]
    fn test_behind_camera() {
        assert!(!camera().can_see(Vec3::new(-2.0, PLAYER_Y, 0.0), &[]));
    }

    #[test]
    fn test_outside_fov() {
        // 45 degrees off axis, cone is +-30
        assert!(!camera().can_see(Vec3::new(2.0, PLAYER_Y, 2.0), &[]));
    }

    #[test]
    fn test_disabled_never_sees() {
        let mut cam = camera();
        cam.disable();
        assert!(!cam.can_see(Vec3::new(2.0, PLAYER_Y, 0.0), &[]));
    }

    #[test]
    fn test_wall_blocks_sight() {
        let wall = Wall::new(Vec3::new(2.0, 1.5, 0.0), Vec3::new(0.5, 1.5, 1.0));
        let cam = camera();
        let target = Vec3::new(4.0, PLAYER_Y, 0.0);
        assert!(cam.can_see(target, &[]));
        assert!(!cam.can_see(target, &[wall]));
    }

    #[test]
    fn test_rotated_heading() {
        // Quarter turn: local +x maps to world -z
        let cam = camera().with_angle(FRAC_PI_2);
        assert!(cam.can_see(Vec3::new(0.0, PLAYER_Y, -3.0), &[]));
        assert!(!cam.can_see(Vec3::new(3.0, PLAYER_Y, 0.0), &[]));
    }

    #[test]
    fn test_sweep_waits_then_turns_quarter() {
        let mut cam = camera();
        cam.advance_sweep(0.0);
        // Default delta on first update
        assert!((cam.sweep_timer - DEFAULT_SENSOR_DT).abs() < 1e-6);

        cam.advance_sweep(5.0);
        assert!(cam.rotating);
        assert!((cam.target_angle - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(cam.sweep_angle, 0.0);

        cam.advance_sweep(5.5);
        assert!((cam.sweep_angle - 0.25 * std::f32::consts::PI).abs() < 1e-4);

        cam.advance_sweep(6.5);
        assert!(!cam.rotating);
        assert!((cam.sweep_angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_wraps_past_full_turn() {
        let mut cam = camera().with_angle(1.5 * std::f32::consts::PI);
        cam.advance_sweep(0.0);
        cam.advance_sweep(5.0);
        cam.advance_sweep(7.0);
        assert!(!cam.rotating);
        assert!(cam.sweep_angle.abs() < 1e-4 || (TAU - cam.sweep_angle).abs() < 1e-4);
    }

    #[test]
    fn test_detection_reaches_alarm_at_ratio() {
        let mut cam = camera();
        let target = Vec3::new(2.0, PLAYER_Y, 0.0);

        assert_eq!(cam.update_detection(target, &[], 0.0), DetectionStatus::Detecting);
        assert_eq!(cam.detection_elapsed, 0.0);

        // 0.79 of the threshold
        assert_eq!(cam.update_detection(target, &[], 1.58), DetectionStatus::Detecting);
        // 0.80 of the threshold
        assert_eq!(cam.update_detection(target, &[], 1.6), DetectionStatus::Alarm);
    }

    #[test]
    fn test_occlusion_resets_detection() {
        let wall = Wall::new(Vec3::new(1.0, 1.5, 0.0), Vec3::new(0.25, 1.5, 1.0));
        let mut cam = camera();
        let target = Vec3::new(2.0, PLAYER_Y, 0.0);

        cam.update_detection(target, &[], 0.0);
        cam.update_detection(target, &[], 1.0);
        assert!((cam.detection_elapsed - 1.0).abs() < 1e-6);

        assert_eq!(cam.update_detection(target, &[wall], 1.1), DetectionStatus::None);
        assert!(!cam.detecting);
        assert_eq!(cam.detection_elapsed, 0.0);

        // Sight regained: progress starts over
        assert_eq!(cam.update_detection(target, &[], 1.2), DetectionStatus::Detecting);
        assert_eq!(cam.detection_elapsed, 0.0);
        assert_eq!(cam.update_detection(target, &[], 2.2), DetectionStatus::Detecting);
        assert!((cam.detection_elapsed - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_detection_progress_clamped() {
        let mut cam = camera();
        cam.detecting = true;
        cam.detection_elapsed = 5.0;
        assert_eq!(cam.detection_progress(), 1.0);
    }

    proptest! {
        #[test]
        fn sweep_angle_stays_wrapped(
            start in 0.0f32..TAU,
            steps in prop::collection::vec(0.0f64..0.5, 1..200),
        ) {
            let mut cam = camera().with_angle(start);
            let mut now = 0.0;
            for dt in steps {
                now += dt;
                cam.advance_sweep(now);
                prop_assert!(cam.sweep_angle >= 0.0 && cam.sweep_angle < TAU);
            }
        }

        #[test]
        fn idle_camera_never_detecting_with_progress(
            x in -6.0f32..6.0,
            z in -6.0f32..6.0,
        ) {
            let mut cam = camera();
            cam.update_detection(Vec3::new(x, PLAYER_Y, z), &[], 0.0);
            cam.update_detection(Vec3::new(x, PLAYER_Y, z), &[], 0.5);
            if !cam.detecting {
                prop_assert_eq!(cam.detection_elapsed, 0.0);
            }
        }
    }
}
