//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall-clock milliseconds)
//! - Keyboard input and key mapping
//! - Driving one simulation frame per rendered frame
//! - Draw data for the page

pub mod frame;
pub mod input;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame::{FrameError, Game};
pub use input::{HeldKeys, KeyBindings, KeyCode, KeyMap, PAUSE_KEY, resolve, resolve_all};
pub use view::{FrameView, frame_view};

/// Wall-clock time in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock time in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
