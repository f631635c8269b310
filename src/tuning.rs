//! Match rules
//!
//! Loaded from JSON by the host. Every field has a default, so a partial file
//! only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::level::{CAMERA_POOL, LASER_POOL};

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Match rules and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timer ===
    /// Seconds allowed on level 1
    pub base_time_limit: f32,
    /// Floor for the shrinking time limit
    pub min_time_limit: f32,
    /// Seconds removed per level
    pub time_limit_step: f32,

    // === Hacking ===
    /// Wrong entries allowed per level, shared by all terminals
    pub hack_lives: u32,
    /// Score for each hacked terminal
    pub hack_bonus: u64,
    pub interact_range: f32,

    // === Scoring ===
    pub time_bonus_per_second: f32,

    // === Level layout ===
    pub max_cameras: usize,
    pub max_lasers: usize,
    pub objective_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_time_limit: 120.0,
            min_time_limit: 90.0,
            time_limit_step: 10.0,

            hack_lives: 2,
            hack_bonus: 500,
            interact_range: 2.0,

            time_bonus_per_second: 10.0,

            max_cameras: CAMERA_POOL.len(),
            max_lasers: LASER_POOL.len(),
            objective_radius: 1.5,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break game invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.base_time_limit > 0.0) {
            return Err(invalid("base_time_limit", "must be positive"));
        }
        if !(self.min_time_limit > 0.0) {
            return Err(invalid("min_time_limit", "must be positive"));
        }
        if self.min_time_limit > self.base_time_limit {
            return Err(invalid(
                "min_time_limit",
                format!(
                    "{} exceeds base_time_limit {}",
                    self.min_time_limit, self.base_time_limit
                ),
            ));
        }
        if !(self.time_limit_step >= 0.0) {
            return Err(invalid("time_limit_step", "must not be negative"));
        }
        if self.hack_lives == 0 {
            return Err(invalid("hack_lives", "must be at least 1"));
        }
        if !(self.interact_range > 0.0) {
            return Err(invalid("interact_range", "must be positive"));
        }
        if !(self.objective_radius > 0.0) {
            return Err(invalid("objective_radius", "must be positive"));
        }
        if !(self.time_bonus_per_second >= 0.0) {
            return Err(invalid("time_bonus_per_second", "must not be negative"));
        }
        if self.max_cameras == 0 || self.max_cameras > CAMERA_POOL.len() {
            return Err(invalid(
                "max_cameras",
                format!("must be in 1..={}", CAMERA_POOL.len()),
            ));
        }
        if self.max_lasers == 0 || self.max_lasers > LASER_POOL.len() {
            return Err(invalid(
                "max_lasers",
                format!("must be in 1..={}", LASER_POOL.len()),
            ));
        }
        Ok(())
    }
}
