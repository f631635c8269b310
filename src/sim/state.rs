//! Game state and core simulation types
//!
//! `GameState` is the orchestrator: it owns every entity of the running match
//! and is passed by `&mut` into [`super::tick`]. There is no global instance.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{DetectionStatus, SecurityCamera};
use super::geometry::Rect;
use super::hack::HackChallenge;
use super::laser::Laser;
use super::player::Player;
use super::snapshot::ViewMode;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player moves, sensors and lasers run
    Playing,
    /// Hack challenge open at a terminal; the world is frozen
    Hacking,
    /// Run ended (detected, hit, out of time or out of hack lives)
    GameOver,
    /// Objective reached with both systems offline
    Won,
}

impl GamePhase {
    /// Transition table. Every pair is listed so adding a phase forces a decision.
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        match (self, next) {
            (Playing, Playing) | (Playing, Hacking) | (Playing, GameOver) | (Playing, Won) => true,
            (Hacking, Playing) | (Hacking, GameOver) => true,
            (Hacking, Hacking) | (Hacking, Won) => false,
            (GameOver, Playing) => true,
            (GameOver, Hacking) | (GameOver, GameOver) | (GameOver, Won) => false,
            (Won, Playing) => true,
            (Won, Hacking) | (Won, GameOver) | (Won, Won) => false,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TimeExceeded,
    Detected,
    HitByLaser,
    OutOfHackLives,
}

/// Static obstacle: blocks movement and camera sight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: Vec3,
    pub half_extent: Vec3,
}

impl Wall {
    pub fn new(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Axis-aligned footprint on the floor
    pub fn footprint(&self) -> Rect {
        Rect::from_center(self.center, self.half_extent)
    }
}

/// Which security system a terminal controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalKind {
    Camera,
    Laser,
}

/// Hackable control terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    pub position: Vec3,
    pub kind: TerminalKind,
    pub hacked: bool,
}

impl Terminal {
    pub fn new(position: Vec3, kind: TerminalKind) -> Self {
        Self {
            position,
            kind,
            hacked: false,
        }
    }
}

/// Win trigger
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Objective {
    pub position: Vec3,
}

/// Discrete events for diagnostics/audio/HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted {
        level: u32,
        cameras: usize,
        lasers: usize,
        hack_lives: u32,
    },
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    GameOver {
        reason: GameOverReason,
    },
    LevelWon {
        score: u64,
        time_bonus: u64,
    },
    DetectionChanged {
        camera: usize,
        status: DetectionStatus,
    },
    HackStarted {
        terminal: usize,
        kind: TerminalKind,
        length: usize,
    },
    HackInput {
        len: usize,
        target_len: usize,
    },
    HackSucceeded {
        kind: TerminalKind,
    },
    HackFailed {
        lives_remaining: u32,
    },
    HackCancelled,
    /// Objective reached but at least one system is still online
    ObjectiveLocked {
        camera_hacked: bool,
        laser_hacked: bool,
    },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible hack sequences
    pub seed: u64,
    /// Match rules
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Hack attempts left, shared by every terminal of the level
    pub hack_lives: u32,
    /// Monotonic simulation clock in seconds
    pub clock: f64,
    /// Clock reading when the current level started
    pub level_start: f64,
    /// Seconds allowed for the current level
    pub time_limit: f32,
    /// Whole seconds remaining
    pub time_left: f32,
    pub view_mode: ViewMode,
    pub player: Player,
    pub walls: Vec<Wall>,
    pub cameras: Vec<SecurityCamera>,
    pub lasers: Vec<Laser>,
    pub terminals: Vec<Terminal>,
    pub objective: Objective,
    /// Open hack challenge, only while `phase == Hacking`
    pub hack: Option<HackChallenge>,
    /// Set while standing on a locked objective so the event fires once
    pub(crate) objective_notified: bool,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new match at level 1 with default rules
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new match at level 1
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            hack_lives: tuning.hack_lives,
            clock: 0.0,
            level_start: 0.0,
            time_limit: tuning.base_time_limit,
            time_left: tuning.base_time_limit,
            view_mode: ViewMode::default(),
            player: Player::default(),
            walls: Vec::new(),
            cameras: Vec::new(),
            lasers: Vec::new(),
            terminals: Vec::new(),
            objective: Objective {
                position: Vec3::ZERO,
            },
            hack: None,
            objective_notified: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        state.load_level(1);
        state
    }

    /// True once the camera terminal has been hacked
    pub fn camera_system_offline(&self) -> bool {
        self.terminals
            .iter()
            .any(|t| t.hacked && t.kind == TerminalKind::Camera)
    }

    /// True once the laser terminal has been hacked
    pub fn laser_system_offline(&self) -> bool {
        self.terminals
            .iter()
            .any(|t| t.hacked && t.kind == TerminalKind::Laser)
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move to `next` if the transition table allows it
    pub(crate) fn transition(&mut self, next: GamePhase) -> bool {
        let from = self.phase;
        if !from.can_transition_to(next) {
            log::warn!("Rejected phase transition {:?} -> {:?}", from, next);
            return false;
        }
        self.phase = next;
        if from != next {
            log::info!("Phase {:?} -> {:?}", from, next);
            self.events.push(GameEvent::PhaseChanged { from, to: next });
        }
        true
    }

    /// End the run
    pub(crate) fn game_over(&mut self, reason: GameOverReason) {
        if self.transition(GamePhase::GameOver) {
            log::info!("Mission failed: {:?}", reason);
            self.events.push(GameEvent::GameOver { reason });
        }
    }

    /// Finish the level and bank the time bonus
    pub(crate) fn win_level(&mut self) {
        if !self.transition(GamePhase::Won) {
            return;
        }
        let time_bonus = (self.time_left.max(0.0) * self.tuning.time_bonus_per_second) as u64;
        self.score += time_bonus;
        log::info!(
            "Mission complete! Score: {}, time bonus: {}",
            self.score,
            time_bonus
        );
        self.events.push(GameEvent::LevelWon {
            score: self.score,
            time_bonus,
        });
    }
}
