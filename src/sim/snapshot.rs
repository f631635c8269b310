//! Read-only render snapshot
//!
//! Everything a renderer or HUD needs to draw one frame, copied out of
//! `GameState` so the simulation stays free of drawing concerns.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::SecurityCamera;
use super::laser::Laser;
use super::state::{GamePhase, GameState, TerminalKind, Wall};

/// Eye height above the player's centre in first person
const FIRST_PERSON_EYE_OFFSET: f32 = 0.4;
const FIRST_PERSON_LOOK_DISTANCE: f32 = 10.0;
const THIRD_PERSON_HEIGHT: f32 = 15.0;
const THIRD_PERSON_BACK_OFFSET: f32 = 3.0;

/// Camera mode for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Top-down chase view
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
        }
    }
}

/// Eye and look-at point for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewCamera {
    pub eye: Vec3,
    pub target: Vec3,
}

impl ViewCamera {
    pub fn for_state(state: &GameState) -> Self {
        let pos = state.player.position;
        match state.view_mode {
            ViewMode::FirstPerson => {
                let eye = pos + Vec3::Y * FIRST_PERSON_EYE_OFFSET;
                Self {
                    eye,
                    target: eye + state.player.facing() * FIRST_PERSON_LOOK_DISTANCE,
                }
            }
            ViewMode::ThirdPerson => Self {
                eye: Vec3::new(pos.x, THIRD_PERSON_HEIGHT, pos.z + THIRD_PERSON_BACK_OFFSET),
                target: Vec3::new(pos.x, 0.0, pos.z),
            },
        }
    }
}

/// HUD colour band for detection progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarningLevel {
    Detected,
    Warning,
    Danger,
    Critical,
    Alarm,
}

impl WarningLevel {
    pub fn from_progress(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        if p < 0.2 {
            WarningLevel::Detected
        } else if p < 0.4 {
            WarningLevel::Warning
        } else if p < 0.6 {
            WarningLevel::Danger
        } else if p < 0.8 {
            WarningLevel::Critical
        } else {
            WarningLevel::Alarm
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraView {
    pub mount_position: Vec3,
    pub sensor_position: Vec3,
    pub sweep_angle: f32,
    pub fov_degrees: f32,
    pub range: f32,
    pub disabled: bool,
    pub detecting: bool,
    /// Detection progress in [0, 1]
    pub progress: f32,
    /// Only set while detecting
    pub warning: Option<WarningLevel>,
}

impl From<&SecurityCamera> for CameraView {
    fn from(cam: &SecurityCamera) -> Self {
        let progress = cam.detection_progress();
        Self {
            mount_position: cam.mount_position,
            sensor_position: cam.sensor_position,
            sweep_angle: cam.sweep_angle,
            fov_degrees: cam.fov_degrees,
            range: cam.range,
            disabled: cam.disabled,
            detecting: cam.detecting,
            progress,
            warning: cam.detecting.then(|| WarningLevel::from_progress(progress)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaserView {
    pub start: Vec3,
    pub end: Vec3,
    pub active: bool,
}

impl From<&Laser> for LaserView {
    fn from(laser: &Laser) -> Self {
        Self {
            start: laser.start,
            end: laser.end,
            active: laser.active,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerminalView {
    pub position: Vec3,
    pub kind: TerminalKind,
    pub hacked: bool,
}

/// Open hack challenge as shown on the terminal screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackView {
    pub kind: TerminalKind,
    pub sequence: String,
    pub input: String,
    pub lives: u32,
}

/// One frame of drawable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub time_left: f32,
    pub hack_lives: u32,
    pub view_mode: ViewMode,
    pub view: ViewCamera,
    /// False in first person
    pub draw_player: bool,
    pub player_position: Vec3,
    pub player_facing_degrees: f32,
    pub walls: Vec<Wall>,
    pub cameras: Vec<CameraView>,
    pub lasers: Vec<LaserView>,
    pub terminals: Vec<TerminalView>,
    pub objective: Vec3,
    pub hack: Option<HackView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let hack = state.hack.as_ref().and_then(|h| {
            state.terminals.get(h.terminal).map(|t| HackView {
                kind: t.kind,
                sequence: h.sequence.clone(),
                input: h.input.clone(),
                lives: state.hack_lives,
            })
        });

        Self {
            phase: state.phase,
            level: state.level,
            score: state.score,
            time_left: state.time_left,
            hack_lives: state.hack_lives,
            view_mode: state.view_mode,
            view: ViewCamera::for_state(state),
            draw_player: state.view_mode == ViewMode::ThirdPerson,
            player_position: state.player.position,
            player_facing_degrees: state.player.facing_degrees,
            walls: state.walls.clone(),
            cameras: state.cameras.iter().map(CameraView::from).collect(),
            lasers: state.lasers.iter().map(LaserView::from).collect(),
            terminals: state
                .terminals
                .iter()
                .map(|t| TerminalView {
                    position: t.position,
                    kind: t.kind,
                    hacked: t.hacked,
                })
                .collect(),
            objective: state.objective.position,
            hack,
        }
    }
}
