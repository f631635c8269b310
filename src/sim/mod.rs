//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only from the simulation clock advanced by `tick`
//! - Seeded RNG only
//! - Stable iteration order (entity vectors, never maps)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod geometry;
pub mod hack;
pub mod laser;
pub mod level;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use camera::{DetectionStatus, SecurityCamera};
pub use geometry::{Rect, line_distance, segment_intersects_rect};
pub use hack::{HackChallenge, HackVerdict};
pub use laser::{Laser, LaserMotion};
pub use level::{build_walls, time_limit_for_level};
pub use player::Player;
pub use snapshot::{Snapshot, ViewCamera, ViewMode, WarningLevel};
pub use state::{
    GameEvent, GameOverReason, GamePhase, GameState, Objective, Terminal, TerminalKind, Wall,
};
pub use tick::{InputIntent, tick};
