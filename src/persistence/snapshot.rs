//! JSON snapshots of `GameState`

use thiserror::Error;

use crate::sim::GameState;

/// Snapshot failures
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to serialize game state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("section \"{0}\" not found in game state")]
    UnknownSection(String),
}

/// Compact JSON (for handing state to the renderer)
pub fn to_json(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// Indented JSON (for humans)
pub fn to_pretty_json(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// One top-level field of the state, e.g. "players" or "nets"
pub fn section(state: &GameState, name: &str) -> Result<String, SnapshotError> {
    let value = serde_json::to_value(state)?;
    let part = value
        .get(name)
        .ok_or_else(|| SnapshotError::UnknownSection(name.to_string()))?;
    Ok(serde_json::to_string_pretty(part)?)
}

/// Dump the whole state to the log
pub fn log_snapshot(state: &GameState) {
    match to_pretty_json(state) {
        Ok(json) => log::info!("=== Game State Snapshot ===\n{}", json),
        Err(e) => log::error!("{}", e),
    }
}

/// Dump one section to the log
pub fn log_section(state: &GameState, name: &str) {
    match section(state, name) {
        Ok(json) => log::info!("=== Game State Section: {} ===\n{}", name, json),
        Err(e) => log::error!("{}", e),
    }
}

/// Download file name for a snapshot taken at `now_ms`
pub fn file_name(now_ms: f64) -> String {
    format!("gamestate-{}.json", now_ms as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PlayerCount, PlayerId};

    #[test]
    fn test_snapshot_contains_scores() {
        let mut state = GameState::new(3, PlayerCount::Two);
        state.players[PlayerId::Two.index()].slime.score = 7;
        let json = to_json(&state).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["players"][1]["slime"]["score"], 7);
        assert_eq!(value["seed"], 3);
    }

    #[test]
    fn test_section() {
        let state = GameState::new(3, PlayerCount::One);
        let nets = section(&state, "nets").unwrap();
        let value: serde_json::Value = serde_json::from_str(&nets).unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));
        assert_eq!(value[0]["side"], "Left");
    }

    #[test]
    fn test_unknown_section() {
        let state = GameState::new(3, PlayerCount::One);
        let err = section(&state, "court").unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownSection(ref s) if s == "court"));
        assert_eq!(err.to_string(), "section \"court\" not found in game state");
    }

    #[test]
    fn test_pretty_is_indented() {
        let state = GameState::new(3, PlayerCount::Two);
        assert!(to_pretty_json(&state).unwrap().contains("\n  \"seed\""));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(1234.9), "gamestate-1234.json");
    }
}
