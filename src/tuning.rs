//! Designer-facing physics parameters
//!
//! Values are authored in a human-friendly 0..1-ish range and rescaled into
//! simulation units on read. Nothing here is validated: a debug panel may
//! write any number and the simulation uses it verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading tunables supplied by external tooling
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tunables JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable parameters read by the simulation each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Downward pull on a jumping slime
    pub gravity: f32,
    /// Upward velocity at the start of a jump
    pub initial_jump_velocity: f32,
    /// Horizontal speed
    pub move_speed: f32,
    /// Charge rate multiplier (2 = full charge in 1s)
    pub charge_speed: f32,
    /// Ball offset from the slime origin (fraction of canvas width)
    pub ball_offset_x: f32,
    /// Ball offset from the slime origin (fraction of canvas height, negative = up)
    pub ball_offset_y: f32,
    /// Ball size (fraction of canvas width)
    pub ball_size: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            initial_jump_velocity: 0.5,
            move_speed: 0.5,
            charge_speed: 1.0,
            ball_offset_x: 0.0,
            ball_offset_y: -0.12,
            ball_size: 0.03,
        }
    }
}

impl Tunables {
    /// Gravity in normalized units per frame²
    #[inline]
    pub fn effective_gravity(&self) -> f32 {
        self.gravity * GRAVITY_SCALE
    }

    /// Jump take-off velocity in normalized units per frame
    #[inline]
    pub fn effective_jump_velocity(&self) -> f32 {
        self.initial_jump_velocity * JUMP_VELOCITY_SCALE
    }

    /// Horizontal step in normalized units per frame
    #[inline]
    pub fn effective_move_speed(&self) -> f32 {
        self.move_speed * MOVE_SPEED_SCALE
    }

    /// Milliseconds of holding needed for a full charge
    #[inline]
    pub fn max_charge_ms(&self) -> f64 {
        BASE_CHARGE_TIME_MS / self.charge_speed as f64
    }

    /// Parse tunables from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "slime_hoops_tunables";

    /// Load tunables from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tunables) => {
                        log::info!("Loaded tunables from LocalStorage");
                        return tunables;
                    }
                    Err(e) => log::warn!("Ignoring stored tunables: {}", e),
                }
            }
        }

        log::info!("Using default tunables");
        Self::default()
    }

    /// Save tunables to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                log_save_result(storage.set_item(Self::STORAGE_KEY, &json));
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Log the outcome of a storage write; true when it went through
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn log_save_result<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            log::info!("Tunables saved");
            true
        }
        Err(e) => {
            log::warn!("Failed to save tunables: {:?}", e);
            false
        }
    }
}
