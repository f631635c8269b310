//! Laser barriers
//!
//! A laser is a floor-level segment. Its motion is a pure function of a phase
//! that advances by a fixed amount each tick, always measured from the
//! original endpoints so errors never accumulate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, line_distance};
use crate::consts::*;

/// How a laser moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaserMotion {
    #[default]
    Static,
    /// Spins about its midpoint
    Rotating,
    /// Translates back and forth along its normal
    Sliding,
    /// Start pinned, end swings along z
    HorizontalFixed,
    /// Start pinned, end swings along x
    VerticalFixed,
}

/// A laser barrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub original_start: Vec3,
    pub original_end: Vec3,
    pub start: Vec3,
    pub end: Vec3,
    pub active: bool,
    pub motion: LaserMotion,
    pub phase: f32,
    /// Phase advance per tick
    pub phase_rate: f32,
    /// Peak offset for sliding/fixed variants
    pub amplitude: f32,
    pub rotation_center: Vec3,
    pub base_length: f32,
    /// Heading of the original segment on the x/z plane (radians)
    pub base_angle: f32,
}

impl Laser {
    pub fn new(x1: f32, z1: f32, x2: f32, z2: f32, motion: LaserMotion) -> Self {
        let start = Vec3::new(x1, 0.0, z1);
        let end = Vec3::new(x2, 0.0, z2);
        Self {
            original_start: start,
            original_end: end,
            start,
            end,
            active: true,
            motion,
            phase: 0.0,
            phase_rate: LASER_PHASE_RATE,
            amplitude: LASER_AMPLITUDE,
            rotation_center: (start + end) * 0.5,
            base_length: (x2 - x1).hypot(z2 - z1),
            base_angle: (z2 - z1).atan2(x2 - x1),
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.phase += self.phase_rate;

        match self.motion {
            LaserMotion::Static => {}
            LaserMotion::Rotating => {
                let angle = self.base_angle + self.phase;
                let half = self.base_length / 2.0;
                let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * half;
                self.start = self.rotation_center - offset;
                self.end = self.rotation_center + offset;
            }
            LaserMotion::Sliding => {
                let slide = self.phase.sin() * self.amplitude;
                let perp = self.base_angle + std::f32::consts::FRAC_PI_2;
                let offset = Vec3::new(perp.cos(), 0.0, perp.sin()) * slide;
                self.start = self.original_start + offset;
                self.end = self.original_end + offset;
            }
            LaserMotion::HorizontalFixed => {
                self.start = self.original_start;
                self.end = self.original_end + Vec3::Z * (self.phase.sin() * self.amplitude);
            }
            LaserMotion::VerticalFixed => {
                self.start = self.original_start;
                self.end = self.original_end + Vec3::X * (self.phase.sin() * self.amplitude);
            }
        }
    }

    /// Contact test against the player position
    ///
    /// Near the infinite line first, then inside the segment's padded bounding
    /// box so the beam does not reach past its emitters.
    pub fn collides_with(&self, target: Vec3) -> bool {
        if !self.active || target.y > LASER_HEIGHT_THRESHOLD {
            return false;
        }

        match line_distance(target, self.start, self.end) {
            Some(d) if d < LASER_HIT_RADIUS => Rect::bounding(self.start, self.end)
                .expanded(LASER_HIT_RADIUS)
                .contains(target),
            _ => false,
        }
    }
}
