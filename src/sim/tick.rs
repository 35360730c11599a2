//! Per-frame simulation step
//!
//! Order within a frame: slime motion -> shots (arm, release, fly, score)
//! -> star bursts. Timers read the wall clock passed in as `now`; positions
//! integrate a fixed step per frame.

use super::control::ControlState;
use super::motion::{self, AttackTransition};
use super::particles;
use super::shot;
use super::state::{GameEvent, GameState};
use crate::Tunables;

/// Advance the game by one rendered frame
pub fn tick(state: &mut GameState, controls: &[ControlState; 2], tunables: &Tunables, now: f64) {
    state.events.clear();
    state.frame += 1;
    state.now_ms = now;

    let player_count = state.player_count;
    let mut transitions = [AttackTransition::None; 2];
    for player in state.players.iter_mut() {
        if !player_count.is_active(player.id) {
            continue;
        }
        let index = player.id.index();
        let transition = motion::update_slime(&mut player.slime, &controls[index], tunables, now);
        if transition == AttackTransition::Started {
            state.events.push(GameEvent::ChargeStarted { player: player.id });
        }
        transitions[index] = transition;
    }

    shot::update_shots(state, &transitions, tunables, now);

    for net in state.nets.iter_mut() {
        particles::update_stars(&mut net.stars, now);
    }

    for event in &state.events {
        log_event(event);
    }
}

fn log_event(event: &GameEvent) {
    match *event {
        GameEvent::Scored { player, score } => {
            log::info!("Player {} scores! ({})", player.number(), score);
        }
        GameEvent::ShotReleased {
            player,
            charge,
            duration,
        } => {
            log::debug!(
                "Player {} shot at charge {:.2} ({}ms flight)",
                player.number(),
                charge,
                duration
            );
        }
        other => log::debug!("{:?}", other),
    }
}
