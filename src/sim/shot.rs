//! Basketball shots: aiming while charging, release, flight, bounce, scoring
//!
//! While a slime charges, its armed shot is re-aimed every frame from the
//! slime's head at the opposing net so the renderer can preview the arc.
//! Releasing the charge puts that same shot into flight. A shot that reaches
//! its net scores; one that clips the top wall bounces off and fades away.

use glam::Vec2;

use super::bezier::QuadBezier;
use super::motion::AttackTransition;
use super::particles;
use super::state::{GameEvent, GameState, Player, Shot, Slime};
use crate::Tunables;
use crate::consts::*;
use crate::to_pixels;

/// What happened to a shot during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    InFlight,
    Bounced,
    Scored,
    Expired,
}

/// Flight time for a given release charge: 1500ms at 0, 500ms at 1
#[inline]
pub fn shot_duration(level: f32) -> f64 {
    SHOT_BASE_DURATION_MS - level as f64 * SHOT_CHARGE_DURATION_MS
}

/// Where the ball sits above a slime, in pixels
pub fn head_position(slime: &Slime, tunables: &Tunables, canvas: Vec2) -> Vec2 {
    to_pixels(
        slime.pos + Vec2::new(tunables.ball_offset_x, tunables.ball_offset_y),
        canvas,
    )
}

/// Run the shot system for both players
pub fn update_shots(
    state: &mut GameState,
    transitions: &[AttackTransition; 2],
    tunables: &Tunables,
    now: f64,
) {
    let GameState {
        players,
        nets,
        rng_state,
        events,
        canvas,
        ..
    } = state;
    let canvas = *canvas;

    for player in players.iter_mut() {
        let target_side = player.id.target_side();
        let target = to_pixels(nets[target_side.index()].pos, canvas);

        match transitions[player.id.index()] {
            AttackTransition::Released { level } => release(player, level, now, events),
            _ if player.slime.charge.is_charging => {
                aim_armed(player, tunables, canvas, target);
            }
            _ => {}
        }

        for shot in player.shots.iter_mut() {
            match advance_shot(shot, now) {
                ShotOutcome::InFlight => {}
                ShotOutcome::Bounced => events.push(GameEvent::WallBounce { player: player.id }),
                ShotOutcome::Expired => events.push(GameEvent::ShotExpired { player: player.id }),
                ShotOutcome::Scored => {
                    player.slime.score += 1;
                    let mut rng = rng_state.next_rng();
                    particles::burst(
                        &mut nets[target_side.index()].stars,
                        shot.path.target,
                        now,
                        &mut rng,
                    );
                    events.push(GameEvent::Scored {
                        player: player.id,
                        score: player.slime.score,
                    });
                }
            }
        }
        player.shots.retain(|s| s.active);
    }
}

/// Keep the armed shot pointed from the slime's head at the target net
fn aim_armed(player: &mut Player, tunables: &Tunables, canvas: Vec2, target: Vec2) {
    let head = head_position(&player.slime, tunables, canvas);
    let level = player.slime.charge.level;
    let owner = player.id;

    let shot = player
        .armed
        .get_or_insert_with(|| Shot::armed(owner, head, target));
    shot.current = head;
    shot.charge_at_release = level;
    shot.path = QuadBezier::lob(head, target)
        // Degenerate aim: keep a flat path rather than dividing by zero
        .unwrap_or_else(|| QuadBezier::new(head, head, target));
}

/// Put the armed shot into flight and consume the charge
fn release(player: &mut Player, level: f32, now: f64, events: &mut Vec<GameEvent>) {
    let armed = player.armed.take();
    match armed {
        Some(mut shot) if level > 0.0 => {
            shot.active = true;
            shot.start_time = now;
            shot.charge_at_release = level;
            shot.duration = shot_duration(level);
            shot.current = shot.path.start;
            events.push(GameEvent::ShotReleased {
                player: player.id,
                charge: level,
                duration: shot.duration,
            });
            player.shots.push(shot);
        }
        _ => events.push(GameEvent::ShotFizzled { player: player.id }),
    }
    player.slime.charge.level = 0.0;
}

/// Advance an in-flight shot by one frame
pub fn advance_shot(shot: &mut Shot, now: f64) -> ShotOutcome {
    if !shot.active {
        return ShotOutcome::Expired;
    }

    if shot.has_hit_wall {
        shot.velocity.y += BOUNCE_GRAVITY;
        shot.current += shot.velocity * BOUNCE_STEP;

        let since_bounce = now - shot.bounce_time;
        let recovery = (since_bounce / SQUISH_RECOVERY_MS).clamp(0.0, 1.0) as f32;
        shot.squish = BOUNCE_SQUISH + (1.0 - BOUNCE_SQUISH) * recovery;

        if since_bounce > shot.bounce_lifetime {
            shot.active = false;
            return ShotOutcome::Expired;
        }
        return ShotOutcome::InFlight;
    }

    let t = shot.progress(now);
    shot.current = shot.path.point(t);
    if shot.path.chord() >= MIN_TRAJECTORY_DISTANCE {
        shot.velocity = shot.path.derivative(t);
    }

    if shot.current.y <= 0.0 {
        shot.has_hit_wall = true;
        shot.bounce_time = now;
        shot.velocity.y = -shot.velocity.y;
        shot.squish = BOUNCE_SQUISH;
        return ShotOutcome::Bounced;
    }

    if t >= 1.0 {
        shot.active = false;
        return ShotOutcome::Scored;
    }

    ShotOutcome::InFlight
}
