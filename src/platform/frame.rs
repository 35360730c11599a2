//! Per-frame driver
//!
//! Owns the game state, tunables and key map, and runs one simulation frame
//! per rendered frame. A frame that leaves NaN/infinite values behind is
//! rolled back so a bad frame never corrupts what earlier frames committed.
//!
//! While paused no frames run. Resuming shifts every timestamp in the state
//! by the time spent paused, so charges and flights continue where they
//! stopped.

use thiserror::Error;

use super::input::{KeyCode, KeyEventLog, KeyMap, resolve_all};
use crate::Tunables;
use crate::sim::{ControlState, GameState, PlayerCount, tick};

/// A frame that had to be discarded
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("frame {frame} produced a non-finite {field}, rolled back")]
    NonFinite { frame: u64, field: &'static str },
}

/// Game instance holding all per-session state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    /// Writable by a debug panel between frames
    pub tunables: Tunables,
    pub keymap: KeyMap,
    key_log: KeyEventLog,
    /// Timestamp of the last frame before pausing
    paused_at: Option<f64>,
    pause_key_held: bool,
    rejected_frames: u64,
}

impl Game {
    pub fn new(seed: u64, player_count: PlayerCount) -> Self {
        log::info!("New game (seed {}, {:?} player mode)", seed, player_count);
        Self {
            state: GameState::new(seed, player_count),
            tunables: Tunables::default(),
            keymap: KeyMap::default(),
            key_log: KeyEventLog::default(),
            paused_at: None,
            pause_key_held: false,
            rejected_frames: 0,
        }
    }

    /// Run one frame from raw key state
    pub fn frame(
        &mut self,
        now: f64,
        is_down: impl Fn(KeyCode) -> bool,
    ) -> Result<(), FrameError> {
        let pause_down = is_down(self.keymap.pause);
        if pause_down && !self.pause_key_held {
            self.toggle_pause(now);
        }
        self.pause_key_held = pause_down;
        if self.is_paused() {
            return Ok(());
        }

        let controls = resolve_all(&self.keymap, &is_down);
        self.step(&controls, now)?;
        self.key_log.observe(&self.keymap, &is_down);
        Ok(())
    }

    /// Run one frame from already-resolved controls
    pub fn step(&mut self, controls: &[ControlState; 2], now: f64) -> Result<(), FrameError> {
        if self.is_paused() {
            return Ok(());
        }

        let committed = self.state.clone();
        tick(&mut self.state, controls, &self.tunables, now);

        if let Some(field) = self.state.find_non_finite() {
            let err = FrameError::NonFinite {
                frame: self.state.frame,
                field,
            };
            log::error!("{}", err);
            self.state = committed;
            self.rejected_frames += 1;
            return Err(err);
        }
        Ok(())
    }

    /// Stop running frames. Time is frozen from the last frame on.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.state.now_ms);
            log::info!("Paused at frame {}", self.state.frame);
        }
    }

    /// Continue from a pause, treating `now` as the time of the last frame
    pub fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            let paused_for = (now - paused_at).max(0.0);
            self.state.shift_timers(paused_for);
            log::info!("Resumed after {:.0}ms", paused_for);
        }
    }

    pub fn toggle_pause(&mut self, now: f64) {
        if self.is_paused() {
            self.resume(now);
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Start over with fresh slimes and scores, keeping tunables and keys
    pub fn restart(&mut self, seed: u64) {
        let player_count = self.state.player_count;
        self.state = GameState::new(seed, player_count);
        self.key_log = KeyEventLog::default();
        self.paused_at = None;
        log::info!("Restarted game with seed: {}", seed);
    }

    /// Frames discarded so far
    pub fn rejected_frames(&self) -> u64 {
        self.rejected_frames
    }
}
