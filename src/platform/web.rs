//! JavaScript bindings
//!
//! The page owns the canvas and the draw loop: it forwards key events, calls
//! `frame()` once per `requestAnimationFrame`, and reads `renderJson()` back
//! to draw slimes, shots and stars.

use wasm_bindgen::prelude::*;

use super::input::HeldKeys;
use super::{Game, frame_view, now_ms};
use crate::Tunables;
use crate::persistence::snapshot;
use crate::sim::{PlayerCount, PlayerId};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Slime Hoops starting...");
}

/// Game handle exported to the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    keys: HeldKeys,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(players: u8) -> WebGame {
        let player_count = if players == 1 {
            PlayerCount::One
        } else {
            PlayerCount::Two
        };
        let mut game = Game::new(now_ms() as u64, player_count);
        game.tunables = Tunables::load();
        WebGame {
            game,
            keys: HeldKeys::default(),
        }
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, code: u32) {
        self.keys.press(code);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, code: u32) {
        self.keys.release(code);
    }

    /// Window blur: forget held keys
    #[wasm_bindgen(js_name = releaseAll)]
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Advance one frame; returns false if the frame was rejected
    pub fn frame(&mut self) -> bool {
        let keys = &self.keys;
        self.game.frame(now_ms(), |k| keys.is_down(k)).is_ok()
    }

    /// Draw data for this frame: sprites, preview arcs, balls, stars
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self) -> Result<String, JsError> {
        let view = frame_view(&self.game.state, self.game.is_paused());
        Ok(serde_json::to_string(&view)?)
    }

    /// Full game state as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(snapshot::to_json(&self.game.state)?)
    }

    #[wasm_bindgen(js_name = tunablesJson)]
    pub fn tunables_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.game.tunables)?)
    }

    /// Replace tunables from the debug panel and persist them
    #[wasm_bindgen(js_name = setTunables)]
    pub fn set_tunables(&mut self, json: &str) -> Result<(), JsError> {
        self.game.tunables = Tunables::from_json(json)?;
        self.game.tunables.save();
        Ok(())
    }

    /// Pretty snapshot for the debug download, see `snapshotFileName`
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(snapshot::to_pretty_json(&self.game.state)?)
    }

    #[wasm_bindgen(js_name = snapshotFileName)]
    pub fn snapshot_file_name(&self) -> String {
        snapshot::file_name(now_ms())
    }

    #[wasm_bindgen(js_name = logSnapshot)]
    pub fn log_snapshot(&self) {
        snapshot::log_snapshot(&self.game.state);
    }

    /// Exit dialog opened (Escape is also handled inside `frame`)
    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.keys.clear();
        self.game.resume(now_ms());
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.game.is_paused()
    }

    pub fn score(&self, player: u8) -> u32 {
        let id = if player == 2 { PlayerId::Two } else { PlayerId::One };
        self.game.state.score(id)
    }

    pub fn restart(&mut self) {
        self.keys.clear();
        self.game.restart(now_ms() as u64);
    }
}
