//! Frame-stepped game simulation
//!
//! All gameplay logic lives here. This module stays free of platform code:
//! - Controls arrive already resolved as `ControlState`
//! - Tunables are passed in per frame, never read from a global
//! - Randomness comes from the seeded `RngState` only
//! - No rendering dependencies; the renderer only reads `GameState`

pub mod bezier;
pub mod control;
pub mod motion;
pub mod particles;
pub mod shot;
pub mod state;
pub mod tick;

pub use bezier::QuadBezier;
pub use control::ControlState;
pub use motion::{AttackTransition, charge_level, update_slime};
pub use shot::{ShotOutcome, advance_shot, head_position, shot_duration};
pub use state::{
    Animation, GameEvent, GameState, Net, Player, PlayerCount, PlayerId, Shot, Side, Slime, Star,
};
pub use tick::tick;
