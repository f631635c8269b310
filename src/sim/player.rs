//! Player controller
//!
//! Movement is integrated per tick, not per second: every constant in
//! `consts` for the player is a per-tick quantity.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Wall;
use super::tick::InputIntent;
use crate::consts::*;
use crate::facing_vector;

/// The infiltrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Heading in degrees, kept in [0, 360)
    pub facing_degrees: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: PLAYER_SPAWN,
            facing_degrees: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
        }
    }
}

impl Player {
    /// Horizontal unit vector the player is facing
    pub fn facing(&self) -> Vec3 {
        facing_vector(self.facing_degrees)
    }

    /// Advance one tick from the movement flags of `input`
    pub fn update(&mut self, input: &InputIntent, walls: &[Wall]) {
        let old_pos = self.position;

        if input.turn_left {
            self.facing_degrees = (self.facing_degrees + TURN_STEP_DEGREES).rem_euclid(360.0);
        }
        if input.turn_right {
            self.facing_degrees = (self.facing_degrees - TURN_STEP_DEGREES).rem_euclid(360.0);
        }

        let forward = self.facing();
        if input.move_forward {
            self.position += forward * PLAYER_SPEED;
        }
        if input.move_back {
            self.position -= forward * PLAYER_SPEED;
        }

        // World-axis movement, independent of facing
        if input.strafe_forward {
            self.position.z -= PLAYER_SPEED;
        }
        if input.strafe_back {
            self.position.z += PLAYER_SPEED;
        }
        if input.strafe_left {
            self.position.x -= PLAYER_SPEED;
        }
        if input.strafe_right {
            self.position.x += PLAYER_SPEED;
        }

        if input.jump && self.grounded {
            self.vertical_velocity = JUMP_STRENGTH;
            self.grounded = false;
            self.position += forward * JUMP_NUDGE;
        }

        if !self.grounded {
            self.vertical_velocity += GRAVITY;
            self.position.y += self.vertical_velocity;
            if self.position.y <= GROUND_HEIGHT {
                self.position.y = GROUND_HEIGHT;
                self.vertical_velocity = 0.0;
                self.grounded = true;
            }
        }

        // Full revert on contact, no sliding
        if self.collides_with_any(walls) {
            self.position.x = old_pos.x;
            self.position.z = old_pos.z;
        }

        self.position.x = self.position.x.clamp(-ARENA_BOUND, ARENA_BOUND);
        self.position.z = self.position.z.clamp(-ARENA_BOUND, ARENA_BOUND);
    }

    /// True if the player's footprint overlaps any wall
    pub fn collides_with_any(&self, walls: &[Wall]) -> bool {
        walls
            .iter()
            .any(|w| w.footprint().expanded(PLAYER_RADIUS).contains_strict(self.position))
    }
}
