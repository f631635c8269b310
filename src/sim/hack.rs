//! Terminal hacking mini-game
//!
//! The player types a random code shown on the terminal. A full-length wrong
//! entry costs one of the level's shared hack lives and clears the input; the
//! code itself stays the same for the retry.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameOverReason, GamePhase, GameState, TerminalKind};
use crate::consts::*;

/// Outcome of one keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HackVerdict {
    /// Buffer not full yet
    Pending,
    Success,
    /// Full-length entry did not match; buffer cleared
    Failure,
}

/// An open hack attempt at one terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackChallenge {
    /// Index into `GameState::terminals`
    pub terminal: usize,
    /// Code to type, uppercase A-Z/0-9
    pub sequence: String,
    pub input: String,
}

impl HackChallenge {
    /// Roll a fresh code of random length
    pub fn generate<R: Rng>(terminal: usize, rng: &mut R) -> Self {
        let len = rng.random_range(HACK_MIN_LEN..=HACK_MAX_LEN);
        let sequence = (0..len)
            .map(|_| HACK_ALPHABET[rng.random_range(0..HACK_ALPHABET.len())] as char)
            .collect();
        Self::with_sequence(terminal, sequence)
    }

    pub fn with_sequence(terminal: usize, sequence: String) -> Self {
        Self {
            terminal,
            sequence: sequence.to_ascii_uppercase(),
            input: String::new(),
        }
    }

    /// Append one character (case-insensitive) and judge a full buffer
    pub fn push_char(&mut self, c: char) -> HackVerdict {
        self.input.push(c.to_ascii_uppercase());
        if self.input.len() < self.sequence.len() {
            return HackVerdict::Pending;
        }
        if self.input.eq_ignore_ascii_case(&self.sequence) {
            HackVerdict::Success
        } else {
            self.input.clear();
            HackVerdict::Failure
        }
    }
}

impl GameState {
    /// Start a hack at the nearest un-hacked terminal in reach.
    /// Returns false (and does nothing) when none qualifies.
    pub fn try_hack(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }

        let player = self.player.position;
        let reach = self.tuning.interact_range;
        let nearest = self
            .terminals
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.hacked)
            .map(|(i, t)| (i, t.position.distance(player)))
            .filter(|&(_, d)| d < reach)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((index, _)) = nearest else {
            return false;
        };
        if !self.transition(GamePhase::Hacking) {
            return false;
        }

        let challenge = HackChallenge::generate(index, &mut self.rng);
        let kind = self.terminals[index].kind;
        log::info!(
            "Hacking {:?} terminal, code length {}, lives {}",
            kind,
            challenge.sequence.len(),
            self.hack_lives
        );
        self.events.push(GameEvent::HackStarted {
            terminal: index,
            kind,
            length: challenge.sequence.len(),
        });
        self.hack = Some(challenge);
        true
    }

    /// Feed one typed character to the open challenge.
    /// Ignored unless hacking and the character is ASCII alphanumeric.
    pub fn feed_hack_char(&mut self, c: char) {
        if self.phase != GamePhase::Hacking || !c.is_ascii_alphanumeric() {
            return;
        }
        let Some(challenge) = self.hack.as_mut() else {
            return;
        };

        let verdict = challenge.push_char(c);
        let terminal = challenge.terminal;
        log::debug!("Hack input: {}", challenge.input);

        match verdict {
            HackVerdict::Pending => {
                self.events.push(GameEvent::HackInput {
                    len: challenge.input.len(),
                    target_len: challenge.sequence.len(),
                });
            }
            HackVerdict::Success => self.complete_hack(terminal),
            HackVerdict::Failure => {
                self.hack_lives = self.hack_lives.saturating_sub(1);
                log::info!("Incorrect sequence, hack lives remaining: {}", self.hack_lives);
                self.events.push(GameEvent::HackFailed {
                    lives_remaining: self.hack_lives,
                });
                if self.hack_lives == 0 {
                    self.hack = None;
                    self.game_over(GameOverReason::OutOfHackLives);
                }
            }
        }
    }

    /// Abandon the open challenge; lives and terminals are untouched
    pub fn cancel_hack(&mut self) {
        if self.phase != GamePhase::Hacking {
            return;
        }
        self.hack = None;
        self.events.push(GameEvent::HackCancelled);
        self.transition(GamePhase::Playing);
    }

    fn complete_hack(&mut self, terminal: usize) {
        let Some(target) = self.terminals.get_mut(terminal) else {
            return;
        };
        target.hacked = true;
        let kind = target.kind;

        match kind {
            TerminalKind::Camera => self.cameras.iter_mut().for_each(|c| c.disable()),
            TerminalKind::Laser => self.lasers.iter_mut().for_each(|l| l.active = false),
        }
        self.score += self.tuning.hack_bonus;
        log::info!("{:?} system disabled", kind);

        self.hack = None;
        self.events.push(GameEvent::HackSucceeded { kind });
        self.transition(GamePhase::Playing);
    }
}
