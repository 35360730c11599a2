//! Keyboard mapping: raw browser key codes -> per-player `ControlState`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{ControlState, PlayerId};

/// Browser `keyCode` value
pub type KeyCode = u32;

/// Keys for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub attack: KeyCode,
}

/// Logical control a key is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Jump,
    Attack,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Left => "left",
            Control::Right => "right",
            Control::Jump => "jump",
            Control::Attack => "attack",
        }
    }
}

/// Escape
pub const PAUSE_KEY: KeyCode = 27;

fn default_pause_key() -> KeyCode {
    PAUSE_KEY
}

/// Key bindings for both players plus the shared pause key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    pub player1: KeyBindings,
    pub player2: KeyBindings,
    /// Toggles pause on press
    #[serde(default = "default_pause_key")]
    pub pause: KeyCode,
}

impl Default for KeyMap {
    /// Player 1: A/D move, W jump, S attack. Player 2: arrow keys. Escape pauses.
    fn default() -> Self {
        Self {
            player1: KeyBindings {
                left: 65,
                right: 68,
                jump: 87,
                attack: 83,
            },
            player2: KeyBindings {
                left: 37,
                right: 39,
                jump: 38,
                attack: 40,
            },
            pause: PAUSE_KEY,
        }
    }
}

impl KeyMap {
    pub fn bindings(&self, player: PlayerId) -> &KeyBindings {
        match player {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    /// Which player/control a key drives, if any
    pub fn control_for(&self, code: KeyCode) -> Option<(PlayerId, Control)> {
        PlayerId::ALL.into_iter().find_map(|player| {
            let b = self.bindings(player);
            let control = if code == b.left {
                Control::Left
            } else if code == b.right {
                Control::Right
            } else if code == b.jump {
                Control::Jump
            } else if code == b.attack {
                Control::Attack
            } else {
                return None;
            };
            Some((player, control))
        })
    }

    /// Every key bound to a player control
    pub fn keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        [&self.player1, &self.player2]
            .into_iter()
            .flat_map(|b| [b.left, b.right, b.jump, b.attack])
    }
}

/// Resolve one player's controls from a "is key down" predicate
pub fn resolve(bindings: &KeyBindings, is_down: impl Fn(KeyCode) -> bool) -> ControlState {
    ControlState::from_buttons(
        is_down(bindings.left),
        is_down(bindings.right),
        is_down(bindings.jump),
        is_down(bindings.attack),
    )
}

/// Resolve both players at once
pub fn resolve_all(map: &KeyMap, is_down: impl Fn(KeyCode) -> bool) -> [ControlState; 2] {
    [resolve(&map.player1, &is_down), resolve(&map.player2, &is_down)]
}

/// Printable label for a key code
pub fn key_label(code: KeyCode) -> String {
    match code {
        37 => "←".to_string(),
        39 => "→".to_string(),
        38 => "↑".to_string(),
        40 => "↓".to_string(),
        PAUSE_KEY => "Esc".to_string(),
        _ => char::from_u32(code)
            .filter(|c| !c.is_control())
            .map(|c| c.to_string())
            .unwrap_or_else(|| code.to_string()),
    }
}

/// Keys currently held, fed by keydown/keyup events
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    down: HashSet<KeyCode>,
}

impl HeldKeys {
    pub fn press(&mut self, code: KeyCode) {
        self.down.insert(code);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.down.remove(&code);
    }

    /// Drop everything (window lost focus, keyups will never arrive)
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.down.contains(&code)
    }
}

/// A game key changing state between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChange {
    pub code: KeyCode,
    pub pressed: bool,
}

/// Tracks bound keys across frames and logs presses and releases
#[derive(Debug, Clone, Default)]
pub struct KeyEventLog {
    previous: HashSet<KeyCode>,
}

impl KeyEventLog {
    /// Compare against last frame; returns (and logs) what changed
    pub fn observe(&mut self, map: &KeyMap, is_down: impl Fn(KeyCode) -> bool) -> Vec<KeyChange> {
        let current: HashSet<KeyCode> = map.keys().filter(|&k| is_down(k)).collect();

        let mut changes: Vec<KeyChange> = current
            .difference(&self.previous)
            .map(|&code| KeyChange {
                code,
                pressed: true,
            })
            .chain(self.previous.difference(&current).map(|&code| KeyChange {
                code,
                pressed: false,
            }))
            .collect();
        changes.sort_by_key(|c| (!c.pressed, c.code));

        for change in &changes {
            let verb = if change.pressed { "pressed" } else { "released" };
            match map.control_for(change.code) {
                Some((player, control)) => log::debug!(
                    "Key {}: {} ({}) - Player {} {}",
                    verb,
                    key_label(change.code),
                    change.code,
                    player.number(),
                    control.as_str()
                ),
                None => log::debug!("Key {}: {} ({})", verb, key_label(change.code), change.code),
            }
        }

        self.previous = current;
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(keys: &[KeyCode]) -> impl Fn(KeyCode) -> bool + '_ {
        move |k| keys.contains(&k)
    }

    #[test]
    fn test_resolve_player_one() {
        let map = KeyMap::default();
        let c = resolve(&map.player1, down(&[68, 87]));
        assert_eq!(c.movement, 1);
        assert!(c.jump);
        assert!(!c.attack);
    }

    #[test]
    fn test_both_directions_cancel() {
        let map = KeyMap::default();
        let c = resolve(&map.player2, down(&[37, 39, 40]));
        assert_eq!(c.movement, 0);
        assert!(c.attack);
    }

    #[test]
    fn test_resolve_all_independent() {
        let map = KeyMap::default();
        let [p1, p2] = resolve_all(&map, down(&[65, 38]));
        assert_eq!(p1.movement, -1);
        assert!(!p1.jump);
        assert_eq!(p2.movement, 0);
        assert!(p2.jump);
    }

    #[test]
    fn test_control_for() {
        let map = KeyMap::default();
        assert_eq!(map.control_for(83), Some((PlayerId::One, Control::Attack)));
        assert_eq!(map.control_for(37), Some((PlayerId::Two, Control::Left)));
        assert_eq!(map.control_for(13), None);
        assert_eq!(map.keys().count(), 8);
        assert_eq!(map.control_for(map.pause), None);
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(37), "←");
        assert_eq!(key_label(65), "A");
        assert_eq!(key_label(13), "13");
        assert_eq!(key_label(PAUSE_KEY), "Esc");
    }

    #[test]
    fn test_keymap_json_without_pause_key() {
        let json = r#"{
            "player1": { "left": 1, "right": 2, "jump": 3, "attack": 4 },
            "player2": { "left": 5, "right": 6, "jump": 7, "attack": 8 }
        }"#;
        let map: KeyMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.pause, PAUSE_KEY);
        assert_eq!(map.player2.attack, 8);
    }

    #[test]
    fn test_held_keys() {
        let mut held = HeldKeys::default();
        held.press(65);
        held.press(87);
        held.release(87);
        assert!(held.is_down(65));
        assert!(!held.is_down(87));
        held.clear();
        assert!(!held.is_down(65));
    }

    #[test]
    fn test_key_event_log_changes() {
        let map = KeyMap::default();
        let mut log = KeyEventLog::default();
        let changes = log.observe(&map, down(&[65, 13]));
        assert_eq!(
            changes,
            vec![KeyChange {
                code: 65,
                pressed: true
            }]
        );

        assert!(log.observe(&map, down(&[65])).is_empty());

        let changes = log.observe(&map, down(&[40]));
        assert_eq!(
            changes,
            vec![
                KeyChange {
                    code: 40,
                    pressed: true
                },
                KeyChange {
                    code: 65,
                    pressed: false
                },
            ]
        );
    }
}
