//! What the page draws each frame
//!
//! Flattens `GameState` into pixel-space draw data: which sprite and frame
//! each slime shows, the sampled preview arc for a held charge, balls in
//! flight and the star bursts.

use glam::Vec2;
use serde::Serialize;

use crate::consts::HIT_FRAME_COUNT;
use crate::sim::{Animation, GameState, PlayerId, Star};
use crate::to_pixels;

/// Points per trajectory preview polyline
pub const PREVIEW_POINTS: usize = 24;

#[derive(Debug, Clone, Serialize)]
pub struct SlimeView {
    pub player: PlayerId,
    /// Pixels
    pub pos: Vec2,
    pub animation: Animation,
    /// Frame within the current animation's sprite sheet (hit only)
    pub hit_frame: u32,
    pub charge: f32,
    pub score: u32,
}

/// Aiming arc shown while a player charges
#[derive(Debug, Clone, Serialize)]
pub struct PreviewView {
    pub player: PlayerId,
    pub points: Vec<Vec2>,
    pub charge: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub owner: PlayerId,
    pub pos: Vec2,
    pub squish: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub paused: bool,
    pub slimes: Vec<SlimeView>,
    pub previews: Vec<PreviewView>,
    pub balls: Vec<BallView>,
    /// Net positions in pixels, indexed by `Side::index`
    pub nets: [Vec2; 2],
    pub stars: Vec<Star>,
}

/// Build the draw data for the current state
pub fn frame_view(state: &GameState, paused: bool) -> FrameView {
    let canvas = state.canvas;
    let now = state.now_ms;
    let active = state
        .players
        .iter()
        .filter(|p| state.player_count.is_active(p.id));

    let mut slimes = Vec::new();
    let mut previews = Vec::new();
    let mut balls = Vec::new();
    for player in active {
        let slime = &player.slime;
        let animation = slime.animation();
        slimes.push(SlimeView {
            player: player.id,
            pos: to_pixels(slime.pos, canvas),
            animation,
            hit_frame: match animation {
                Animation::Hit => slime.hit_frame(now, HIT_FRAME_COUNT),
                _ => 0,
            },
            charge: slime.charge.level,
            score: slime.score,
        });

        if let Some(armed) = player.armed.as_ref().filter(|_| slime.charge.is_charging) {
            previews.push(PreviewView {
                player: player.id,
                points: armed.path.sample(PREVIEW_POINTS),
                charge: slime.charge.level,
            });
        }

        balls.extend(player.shots.iter().map(|shot| BallView {
            owner: player.id,
            pos: shot.current,
            squish: shot.squish,
        }));
    }

    FrameView {
        paused,
        slimes,
        previews,
        balls,
        nets: [
            to_pixels(state.nets[0].pos, canvas),
            to_pixels(state.nets[1].pos, canvas),
        ],
        stars: state.nets.iter().flat_map(|n| n.stars.iter().cloned()).collect(),
    }
}
