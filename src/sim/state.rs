//! Game state and core simulation types
//!
//! Everything the renderer draws and the snapshot exporter serializes lives here.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bezier::QuadBezier;
use crate::consts::*;

/// Player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Side of the court this player starts on
    pub fn home_side(self) -> Side {
        match self {
            PlayerId::One => Side::Left,
            PlayerId::Two => Side::Right,
        }
    }

    /// Side whose net this player shoots at
    pub fn target_side(self) -> Side {
        self.home_side().opposite()
    }

    /// 1-based number for display and logs
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Court side, also indexes the nets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Single player (only player one moves) or head-to-head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerCount {
    One,
    #[default]
    Two,
}

impl PlayerCount {
    pub fn is_active(self, player: PlayerId) -> bool {
        match self {
            PlayerCount::One => player == PlayerId::One,
            PlayerCount::Two => true,
        }
    }
}

/// Vertical motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Jump {
    pub is_jumping: bool,
    /// Positive = moving up (subtracted from y)
    pub velocity: f32,
}

/// Shot charge accumulated while attack is held
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub is_charging: bool,
    /// 0..=1
    pub level: f32,
    pub started_at: f64,
}

/// Hit animation state (cosmetic, co-occurs with charging)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub is_hitting: bool,
    pub started_at: f64,
}

/// Sprite sheet a slime should be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Idle,
    Move,
    Jump,
    Hit,
}

/// A player-controlled slime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slime {
    /// Normalized canvas position (x clamped to [MIN_X, MAX_X])
    pub pos: Vec2,
    /// Resting y to land back on
    pub base_ground_y: f32,
    pub jump: Jump,
    pub charge: Charge,
    pub hit: Hit,
    pub score: u32,
    /// Moved horizontally during the last frame
    #[serde(default)]
    pub moving: bool,
}

impl Slime {
    pub fn new(x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x.clamp(MIN_X, MAX_X), ground_y),
            base_ground_y: ground_y,
            jump: Jump::default(),
            charge: Charge::default(),
            hit: Hit::default(),
            score: 0,
            moving: false,
        }
    }

    /// Which animation the renderer should play.
    ///
    /// Hitting wins over everything so a held charge keeps the windup pose
    /// even mid-jump.
    pub fn animation(&self) -> Animation {
        if self.hit.is_hitting {
            Animation::Hit
        } else if self.jump.is_jumping {
            Animation::Jump
        } else if self.moving {
            Animation::Move
        } else {
            Animation::Idle
        }
    }

    /// Current frame of the hit sprite, frozen on the last frame while charging
    pub fn hit_frame(&self, now: f64, frame_count: u32) -> u32 {
        let last = frame_count.saturating_sub(1);
        if self.charge.is_charging {
            return last;
        }
        let elapsed = (now - self.hit.started_at).max(0.0);
        let frame = (elapsed * ANIMATION_FPS / 1000.0).floor() as u32;
        frame.min(last)
    }
}

/// A basketball shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub owner: PlayerId,
    /// In flight (false while armed or once retired)
    pub active: bool,
    pub start_time: f64,
    /// Flight time in ms
    pub duration: f64,
    /// Flight plan in pixel space
    pub path: QuadBezier,
    /// Live position in pixels
    pub current: Vec2,
    pub has_hit_wall: bool,
    pub bounce_time: f64,
    pub bounce_lifetime: f64,
    pub velocity: Vec2,
    /// Visual squash (1.0 = round)
    pub squish: f32,
    pub charge_at_release: f32,
}

impl Shot {
    /// Create an armed (not yet released) shot
    pub fn armed(owner: PlayerId, start: Vec2, target: Vec2) -> Self {
        Self {
            owner,
            active: false,
            start_time: 0.0,
            duration: SHOT_BASE_DURATION_MS,
            path: QuadBezier::new(start, start, target),
            current: start,
            has_hit_wall: false,
            bounce_time: 0.0,
            bounce_lifetime: BOUNCE_LIFETIME_MS,
            velocity: Vec2::ZERO,
            squish: 1.0,
            charge_at_release: 0.0,
        }
    }

    /// Flight progress in [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0) as f32
    }
}

/// Celebratory star particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// 0-1, decays linearly over the lifespan
    pub opacity: f32,
    pub created_at: f64,
    pub lifespan: f64,
}

impl Star {
    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }
}

/// A basketball net and the stars bursting from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    pub side: Side,
    /// Normalized canvas position
    pub pos: Vec2,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub stars: Vec<Star>,
}

impl Net {
    pub fn new(side: Side) -> Self {
        let (x, y) = match side {
            Side::Left => LEFT_NET,
            Side::Right => RIGHT_NET,
        };
        Self {
            side,
            pos: Vec2::new(x, y),
            stars: Vec::new(),
        }
    }
}

/// Everything one player owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub slime: Slime,
    /// Shot tracking the current charge, at most one
    pub armed: Option<Shot>,
    /// Released shots still in flight or bouncing
    pub shots: Vec<Shot>,
}

impl Player {
    pub fn new(id: PlayerId, x: f32) -> Self {
        Self {
            id,
            slime: Slime::new(x, GROUND_Y),
            armed: None,
            shots: Vec::new(),
        }
    }
}

/// Notable things that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ChargeStarted { player: PlayerId },
    ShotReleased { player: PlayerId, charge: f32, duration: f64 },
    /// Released before any charge accumulated
    ShotFizzled { player: PlayerId },
    WallBounce { player: PlayerId },
    Scored { player: PlayerId, score: u32 },
    ShotExpired { player: PlayerId },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator on the next stream, so each burst is reproducible
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub player_count: PlayerCount,
    /// Logical canvas size in pixels
    pub canvas: Vec2,
    pub players: [Player; 2],
    /// Indexed by `Side::index`
    pub nets: [Net; 2],
    /// Frames simulated so far
    pub frame: u64,
    /// Timestamp of the last frame (ms)
    pub now_ms: f64,
    /// Events from the last frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with slimes at their starting spots
    pub fn new(seed: u64, player_count: PlayerCount) -> Self {
        let (x1, x2) = match player_count {
            PlayerCount::One => (SINGLE_PLAYER_X, RIGHT_PLAYER_X),
            PlayerCount::Two => (LEFT_PLAYER_X, RIGHT_PLAYER_X),
        };
        Self {
            seed,
            rng_state: RngState::new(seed),
            player_count,
            canvas: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            players: [Player::new(PlayerId::One, x1), Player::new(PlayerId::Two, x2)],
            nets: [Net::new(Side::Left), Net::new(Side::Right)],
            frame: 0,
            now_ms: 0.0,
            events: Vec::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn net(&self, side: Side) -> &Net {
        &self.nets[side.index()]
    }

    pub fn score(&self, id: PlayerId) -> u32 {
        self.player(id).slime.score
    }

    /// Move every wall-clock timestamp forward by `ms`.
    ///
    /// Used when resuming from a pause so charges, flights, bounces and star
    /// fades pick up where they left off.
    pub fn shift_timers(&mut self, ms: f64) {
        for player in self.players.iter_mut() {
            player.slime.charge.started_at += ms;
            player.slime.hit.started_at += ms;
            for shot in player.armed.iter_mut().chain(player.shots.iter_mut()) {
                shot.start_time += ms;
                shot.bounce_time += ms;
            }
        }
        for star in self.nets.iter_mut().flat_map(|n| n.stars.iter_mut()) {
            star.created_at += ms;
        }
        self.now_ms += ms;
    }

    /// Name of the first field holding a NaN or infinity, if any
    pub fn find_non_finite(&self) -> Option<&'static str> {
        for player in &self.players {
            let slime = &player.slime;
            if !slime.pos.is_finite() {
                return Some("slime position");
            }
            if !slime.jump.velocity.is_finite() {
                return Some("jump velocity");
            }
            if !slime.charge.level.is_finite() {
                return Some("charge level");
            }
            let shots = player.armed.iter().chain(player.shots.iter());
            for shot in shots {
                if !shot.current.is_finite() || !shot.velocity.is_finite() {
                    return Some("shot motion");
                }
                if !shot.path.is_finite() {
                    return Some("shot path");
                }
            }
        }
        for net in &self.nets {
            if net.stars.iter().any(|s| !s.pos.is_finite()) {
                return Some("star position");
            }
        }
        None
    }
}
